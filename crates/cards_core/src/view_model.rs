use std::time::Duration;

use crate::card::alternate_podcast_file;
use crate::{CardEntry, Language, LoadState, Notification, NotificationId, NotificationKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub language: Language,
    pub load_state: LoadState,
    pub loading: bool,
    pub cards: Vec<CardView>,
    pub last_known_count: usize,
    pub error: Option<String>,
    pub notification: Option<NotificationView>,
}

/// A card projected into one language, ready for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub dom_id: String,
    pub filename: String,
    pub title: String,
    pub summary_short: String,
    pub summary_detailed: String,
    pub insights: Vec<String>,
    pub podcast: Option<PodcastView>,
    pub processed_at: Option<String>,
    pub failed: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastView {
    pub file: String,
    pub alternate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub text: String,
    pub duration: Duration,
}

impl CardView {
    pub fn project(card: &CardEntry, language: Language, expanded: bool) -> Self {
        let (summary_short, summary_detailed) = card
            .summary_for(language)
            .map(|s| (s.short.clone(), s.detailed.clone()))
            .unwrap_or_default();

        let podcast = card
            .podcast_file
            .as_deref()
            .filter(|file| !file.trim().is_empty())
            .map(|file| PodcastView {
                file: file.to_string(),
                alternate: alternate_podcast_file(file),
            });

        Self {
            dom_id: card.dom_id(),
            filename: card.filename.clone(),
            title: card.title.clone(),
            summary_short,
            summary_detailed,
            insights: card.insights_for(language).to_vec(),
            podcast,
            processed_at: card.processed_at.clone(),
            failed: card.failed,
            expanded,
        }
    }
}

impl From<&Notification> for NotificationView {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            text: notification.text.clone(),
            duration: notification.duration,
        }
    }
}
