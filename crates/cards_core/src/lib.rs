//! Knowledge cards core: pure view-state machine and view-model helpers.
mod card;
mod effect;
mod i18n;
mod language;
mod msg;
mod state;
mod update;
mod view_model;

pub use card::{alternate_podcast_file, card_dom_id, CardEntry, LocalizedSummary};
pub use effect::Effect;
pub use i18n::{labels, Labels};
pub use language::{Language, UnknownLanguage};
pub use msg::Msg;
pub use state::{
    AppState, LoadKind, LoadState, Notification, NotificationId, NotificationKind, RequestId,
};
pub use update::update;
pub use view_model::{AppViewModel, CardView, NotificationView, PodcastView};
