use std::time::Duration;

use crate::{Language, NotificationId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Request the full card set; answered with `Msg::CardsLoaded`.
    FetchCards { request_id: RequestId },
    PersistLanguage(Language),
    /// Send `Msg::NotificationExpired { id }` once `after` has elapsed.
    ScheduleDismiss { id: NotificationId, after: Duration },
}
