use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryText {
    pub short: String,
    pub detailed: String,
}

/// One knowledge card as served by `GET {base}/knowledge-cards`.
///
/// Summary and insight maps are keyed by language code (`en`, `th`).
/// Unknown fields such as the server's `mtime` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardRecord {
    pub filename: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: BTreeMap<String, SummaryText>,
    #[serde(default)]
    pub insights: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub podcast_file: Option<String>,
    #[serde(default)]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardsResponse {
    pub success: bool,
    #[serde(default)]
    pub cards: Option<Vec<CardRecord>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub total: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CardsLoaded {
        request_id: RequestId,
        result: Result<Vec<CardRecord>, SourceError>,
    },
    /// Poller tick result.
    CountChecked(Result<usize, SourceError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SourceError {
    pub kind: FailureKind,
    pub message: String,
}

impl SourceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Body was not the expected JSON shape.
    Malformed,
    /// Server answered `success: false`.
    Unsuccessful,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::Unsuccessful => write!(f, "unsuccessful response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
