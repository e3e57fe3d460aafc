use crate::{CardEntry, Language, NotificationId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host is up; restores the saved language and performs the first load.
    Startup { saved_language: Option<Language> },
    /// User clicked one of the `lang-{code}` toggles.
    LanguageSelected(Language),
    /// User clicked Refresh.
    RefreshClicked,
    /// User clicked Try Again on the error card.
    RetryClicked,
    /// User clicked Read More (`show_detailed = true`) or Read Less on one card.
    ToggleSummary { card_id: String, show_detailed: bool },
    /// Card source answered a `FetchCards` effect.
    CardsLoaded {
        request_id: RequestId,
        result: Result<Vec<CardEntry>, String>,
    },
    /// Background poller reported the current document count.
    CountChecked(Result<usize, String>),
    /// Auto-dismiss timer for a notification fired.
    NotificationExpired { id: NotificationId },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
