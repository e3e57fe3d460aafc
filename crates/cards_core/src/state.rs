use std::collections::BTreeSet;
use std::time::Duration;

use crate::view_model::{AppViewModel, CardView, NotificationView};
use crate::{CardEntry, Language};

pub type RequestId = u64;
pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Why a fetch was issued; only refreshes report a result notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Initial,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub text: String,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingLoad {
    pub(crate) request_id: RequestId,
    pub(crate) kind: LoadKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    language: Language,
    cards: Vec<CardEntry>,
    last_known_count: usize,
    load: LoadState,
    last_error: Option<String>,
    /// Dom ids of cards currently showing the detailed summary pane.
    expanded: BTreeSet<String>,
    notification: Option<Notification>,
    pending: Option<PendingLoad>,
    next_request_id: RequestId,
    next_notification_id: NotificationId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let cards = self
            .cards
            .iter()
            .map(|card| {
                let expanded = self.expanded.contains(&card.dom_id());
                CardView::project(card, self.language, expanded)
            })
            .collect();

        AppViewModel {
            language: self.language,
            load_state: self.load,
            loading: self.load == LoadState::Loading,
            cards,
            last_known_count: self.last_known_count,
            error: self.last_error.clone(),
            notification: self.notification.as_ref().map(NotificationView::from),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn cards(&self) -> &[CardEntry] {
        &self.cards
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn is_expanded(&self, card_id: &str) -> bool {
        self.expanded.contains(card_id)
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn pending(&self) -> Option<PendingLoad> {
        self.pending
    }

    pub(crate) fn set_language(&mut self, language: Language) -> bool {
        if self.language == language {
            return false;
        }
        self.language = language;
        self.mark_dirty();
        true
    }

    pub(crate) fn begin_load(&mut self, kind: LoadKind) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending = Some(PendingLoad { request_id, kind });
        self.load = LoadState::Loading;
        self.mark_dirty();
        request_id
    }

    /// Clears the pending load if `request_id` matches it.
    pub(crate) fn take_pending(&mut self, request_id: RequestId) -> Option<PendingLoad> {
        match self.pending {
            Some(pending) if pending.request_id == request_id => self.pending.take(),
            _ => None,
        }
    }

    /// Replaces the held cards wholesale and returns how many filenames are new.
    pub(crate) fn replace_cards(&mut self, cards: Vec<CardEntry>) -> usize {
        let previous: BTreeSet<&str> = self.cards.iter().map(|c| c.filename.as_str()).collect();
        let added = cards
            .iter()
            .filter(|c| !previous.contains(c.filename.as_str()))
            .count();
        self.last_known_count = cards.len();
        self.cards = cards;
        self.expanded.clear();
        self.load = LoadState::Loaded;
        self.last_error = None;
        self.mark_dirty();
        added
    }

    pub(crate) fn fail_load(&mut self, message: String) {
        self.load = LoadState::Error;
        self.last_error = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn last_known_count(&self) -> usize {
        self.last_known_count
    }

    pub(crate) fn set_last_known_count(&mut self, count: usize) {
        self.last_known_count = count;
    }

    pub(crate) fn has_card(&self, card_id: &str) -> bool {
        self.cards.iter().any(|card| card.dom_id() == card_id)
    }

    pub(crate) fn set_expanded(&mut self, card_id: &str, show_detailed: bool) -> bool {
        let changed = if show_detailed {
            self.expanded.insert(card_id.to_string())
        } else {
            self.expanded.remove(card_id)
        };
        if changed {
            self.mark_dirty();
        }
        changed
    }

    pub(crate) fn notify(
        &mut self,
        kind: NotificationKind,
        text: String,
        duration: Duration,
    ) -> NotificationId {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        self.notification = Some(Notification {
            id,
            kind,
            text,
            duration,
        });
        self.mark_dirty();
        id
    }

    pub(crate) fn dismiss_notification(&mut self, id: NotificationId) {
        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
            self.mark_dirty();
        }
    }
}
