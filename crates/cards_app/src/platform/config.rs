use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cards_engine::{
    CardSource, Catalog, CatalogError, HttpCardSource, SourceSettings, StaticCardSource,
    DEFAULT_FILES,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Cli;
use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Where cards come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceConfig {
    /// Fixed file list matched against a content catalog (bundled one if `catalog` is unset).
    Static {
        files: Vec<String>,
        #[serde(default)]
        catalog: Option<PathBuf>,
    },
    /// Card server exposing `GET {base_url}/knowledge-cards`.
    Http { base_url: String },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Static {
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub source: SourceConfig,
    /// 0 disables the background count check.
    pub poll_secs: u64,
    pub output_dir: PathBuf,
    pub page_filename: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = SourceSettings::default();
        Self {
            source: SourceConfig::default(),
            poll_secs: cards_engine::DEFAULT_POLL_INTERVAL.as_secs(),
            output_dir: PathBuf::from("output"),
            page_filename: "index.html".to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_response_bytes: fetch.max_bytes,
            log: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_ron_str(text: &str) -> Result<Self, String> {
        ron::from_str(text).map_err(|err| err.to_string())
    }

    /// Command-line flags win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.api {
            self.source = SourceConfig::Http {
                base_url: base_url.clone(),
            };
        }
        if let Some(out) = &cli.out {
            self.output_dir = out.clone();
        }
        if let Some(secs) = cli.poll_secs {
            self.poll_secs = secs;
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        (self.poll_secs > 0).then(|| Duration::from_secs(self.poll_secs))
    }

    pub fn card_source(&self) -> Result<Arc<dyn CardSource>, ConfigError> {
        let source: Arc<dyn CardSource> = match &self.source {
            SourceConfig::Static { files, catalog } => {
                let catalog = match catalog {
                    Some(path) => Catalog::load(path)?,
                    None => Catalog::builtin()?,
                };
                Arc::new(StaticCardSource::new(files.clone(), Arc::new(catalog)))
            }
            SourceConfig::Http { base_url } => Arc::new(HttpCardSource::new(SourceSettings {
                base_url: base_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_bytes: self.max_response_bytes,
            })),
        };
        Ok(source)
    }
}
