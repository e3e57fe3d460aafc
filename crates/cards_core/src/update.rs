use std::time::Duration;

use cards_logging::{cards_debug, cards_info, cards_warn};

use crate::i18n::{self, labels};
use crate::{AppState, Effect, LoadKind, LoadState, Msg, NotificationKind};

const CHECKING_DURATION: Duration = Duration::from_millis(2000);
const NO_NEW_FILES_DURATION: Duration = Duration::from_millis(2000);
const FILES_LOADED_DURATION: Duration = Duration::from_millis(3000);
const REFRESH_FAILED_DURATION: Duration = Duration::from_millis(3000);
const FILES_DETECTED_DURATION: Duration = Duration::from_millis(4000);

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Startup { saved_language } => {
            if let Some(language) = saved_language {
                state.set_language(language);
            }
            if state.load_state() != LoadState::Idle {
                cards_debug!("Startup: a load was already requested, not fetching again");
                return (state, Vec::new());
            }
            let request_id = state.begin_load(LoadKind::Initial);
            vec![Effect::FetchCards { request_id }]
        }
        Msg::LanguageSelected(language) => {
            if state.set_language(language) {
                vec![Effect::PersistLanguage(language)]
            } else {
                Vec::new()
            }
        }
        Msg::RefreshClicked => {
            if state.pending().is_some() {
                cards_info!("Refresh ignored; a load is already in flight");
                return (state, Vec::new());
            }
            let text = labels(state.language()).checking_for_new_files.to_string();
            let id = state.notify(NotificationKind::Info, text, CHECKING_DURATION);
            let request_id = state.begin_load(LoadKind::Refresh);
            vec![
                Effect::ScheduleDismiss {
                    id,
                    after: CHECKING_DURATION,
                },
                Effect::FetchCards { request_id },
            ]
        }
        Msg::RetryClicked => {
            if state.pending().is_some() {
                return (state, Vec::new());
            }
            let request_id = state.begin_load(LoadKind::Initial);
            vec![Effect::FetchCards { request_id }]
        }
        Msg::ToggleSummary {
            card_id,
            show_detailed,
        } => {
            if state.has_card(&card_id) {
                state.set_expanded(&card_id, show_detailed);
            } else {
                cards_warn!("Could not find summary panes for card {}", card_id);
            }
            Vec::new()
        }
        Msg::CardsLoaded { request_id, result } => {
            let Some(pending) = state.take_pending(request_id) else {
                cards_debug!("Dropping stale card load result {}", request_id);
                return (state, Vec::new());
            };
            let language = state.language();
            match result {
                Ok(cards) => {
                    let previous = state.cards().len();
                    let count = cards.len();
                    let added = state.replace_cards(cards);
                    cards_info!("Loaded {} knowledge cards ({} new)", count, added);
                    if pending.kind == LoadKind::Refresh && added == 0 && count < previous {
                        cards_debug!("Refresh dropped {} cards", previous - count);
                        Vec::new()
                    } else if pending.kind == LoadKind::Refresh {
                        let (kind, text, duration) = if added > 0 {
                            (
                                NotificationKind::Success,
                                i18n::files_loaded(language, added),
                                FILES_LOADED_DURATION,
                            )
                        } else {
                            (
                                NotificationKind::Info,
                                labels(language).no_new_files.to_string(),
                                NO_NEW_FILES_DURATION,
                            )
                        };
                        let id = state.notify(kind, text, duration);
                        vec![Effect::ScheduleDismiss {
                            id,
                            after: duration,
                        }]
                    } else {
                        Vec::new()
                    }
                }
                Err(message) => {
                    cards_warn!("Loading knowledge cards failed: {}", message);
                    state.fail_load(message);
                    if pending.kind == LoadKind::Refresh {
                        let text = labels(language).refresh_failed.to_string();
                        let id =
                            state.notify(NotificationKind::Error, text, REFRESH_FAILED_DURATION);
                        vec![Effect::ScheduleDismiss {
                            id,
                            after: REFRESH_FAILED_DURATION,
                        }]
                    } else {
                        Vec::new()
                    }
                }
            }
        }
        Msg::CountChecked(Ok(count)) => {
            let known = state.last_known_count();
            if count == known {
                return (state, Vec::new());
            }
            // Detection only: the held cards stay as they are until the user refreshes.
            state.set_last_known_count(count);
            let language = state.language();
            let text = if count > known {
                i18n::files_detected(language, count - known)
            } else {
                i18n::files_removed(language, known - count)
            };
            let id = state.notify(NotificationKind::Info, text, FILES_DETECTED_DURATION);
            vec![Effect::ScheduleDismiss {
                id,
                after: FILES_DETECTED_DURATION,
            }]
        }
        Msg::CountChecked(Err(message)) => {
            cards_warn!("Auto-check failed (source may be down): {}", message);
            Vec::new()
        }
        Msg::NotificationExpired { id } => {
            state.dismiss_notification(id);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
