use std::sync::Arc;
use std::time::Duration;

use cards_logging::{cards_debug, cards_warn};
use futures_util::StreamExt;

use crate::catalog::{error_record, process_document, Catalog};
use crate::{CardRecord, CardsResponse, EngineEvent, FailureKind, SourceError};

/// Filenames served by the static source when no list is configured.
pub const DEFAULT_FILES: [&str; 4] = [
    "Maximization of Steel Ladle Free Open Rate.pdf",
    "SecondaryTemperatureControl.pdf",
    "the-learning-organization-how-to-accelerate-ai-adoption_final2.pdf",
    "Data mining technicque for failure prediction.pdf",
];

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait CardSource: Send + Sync {
    /// The full card set, in display order.
    async fn fetch_cards(&self) -> Result<Vec<CardRecord>, SourceError>;

    /// How many documents the source currently holds.
    async fn count(&self) -> Result<usize, SourceError> {
        self.fetch_cards().await.map(|cards| cards.len())
    }
}

/// Hardcoded file list processed against the content catalog.
#[derive(Debug, Clone)]
pub struct StaticCardSource {
    files: Vec<String>,
    catalog: Arc<Catalog>,
}

impl StaticCardSource {
    pub fn new(files: Vec<String>, catalog: Arc<Catalog>) -> Self {
        Self { files, catalog }
    }

    pub fn with_default_files(catalog: Arc<Catalog>) -> Self {
        Self::new(DEFAULT_FILES.iter().map(|f| f.to_string()).collect(), catalog)
    }

    fn pdf_files(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(String::as_str)
            .filter(|name| is_pdf(name))
    }
}

#[async_trait::async_trait]
impl CardSource for StaticCardSource {
    async fn fetch_cards(&self) -> Result<Vec<CardRecord>, SourceError> {
        let cards = self
            .pdf_files()
            .map(|filename| {
                process_document(&self.catalog, filename).unwrap_or_else(|err| {
                    cards_warn!("Error processing {}: {}", filename, err);
                    error_record(filename)
                })
            })
            .collect();
        Ok(cards)
    }

    async fn count(&self) -> Result<usize, SourceError> {
        Ok(self.pdf_files().count())
    }
}

fn is_pdf(name: &str) -> bool {
    name.len() > 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".pdf"))
}

/// `GET {base_url}/knowledge-cards` on the external card server.
#[derive(Debug, Clone)]
pub struct HttpCardSource {
    settings: SourceSettings,
}

impl HttpCardSource {
    pub fn new(settings: SourceSettings) -> Self {
        Self { settings }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/knowledge-cards",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn build_client(&self) -> Result<reqwest::Client, SourceError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SourceError::new(FailureKind::Network, err.to_string()))
    }

    async fn fetch_response(&self) -> Result<CardsResponse, SourceError> {
        let url = self.endpoint();
        let parsed = reqwest::Url::parse(&url)
            .map_err(|err| SourceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("API request failed: {status}"),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(SourceError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(SourceError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        cards_debug!("GET {} returned {} bytes", url, body.len());

        let payload: CardsResponse = serde_json::from_slice(&body)
            .map_err(|err| SourceError::new(FailureKind::Malformed, err.to_string()))?;
        if !payload.success {
            let message = payload
                .error
                .clone()
                .unwrap_or_else(|| "Invalid API response".to_string());
            return Err(SourceError::new(FailureKind::Unsuccessful, message));
        }
        if payload.cards.is_none() {
            return Err(SourceError::new(
                FailureKind::Malformed,
                "response has no cards",
            ));
        }
        Ok(payload)
    }
}

#[async_trait::async_trait]
impl CardSource for HttpCardSource {
    async fn fetch_cards(&self) -> Result<Vec<CardRecord>, SourceError> {
        let payload = self.fetch_response().await?;
        Ok(payload.cards.unwrap_or_default())
    }

    async fn count(&self) -> Result<usize, SourceError> {
        let payload = self.fetch_response().await?;
        let listed = payload.cards.as_ref().map_or(0, Vec::len);
        Ok(payload.total.unwrap_or(listed))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        return SourceError::new(FailureKind::Timeout, err.to_string());
    }
    SourceError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::is_pdf;

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(is_pdf("a.pdf"));
        assert!(is_pdf("REPORT.PDF"));
        assert!(!is_pdf(".pdf"));
        assert!(!is_pdf("notes.txt"));
        assert!(!is_pdf("ไฟล์"));
    }
}
