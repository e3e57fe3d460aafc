pub const REFRESH_BUTTON: &str = "refresh-btn";
pub const NOTIFICATION: &str = "new-file-notification";
pub const NOTIFICATION_TEXT: &str = "notification-text";
pub const LOADING: &str = "loading";
pub const CARDS_CONTAINER: &str = "cards-container";

pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";

/// `data-action` values; the host's command vocabulary uses the same words.
pub const ACTION_LANG: &str = "lang";
pub const ACTION_REFRESH: &str = "refresh";
pub const ACTION_RETRY: &str = "retry";
pub const ACTION_MORE: &str = "more";
pub const ACTION_LESS: &str = "less";
pub const ACTION_QUIT: &str = "quit";

pub fn language_button_id(code: &str) -> String {
    format!("lang-{code}")
}

pub fn summary_short_id(card_id: &str) -> String {
    format!("summary-short-{card_id}")
}

pub fn summary_detailed_id(card_id: &str) -> String {
    format!("summary-detailed-{card_id}")
}
