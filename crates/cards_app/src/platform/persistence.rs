use std::path::{Path, PathBuf};

use cards_core::Language;
use cards_engine::AtomicFileWriter;
use cards_logging::{cards_error, cards_info, cards_warn};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".cards_state.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(rename = "kbapp_language", default)]
    language: Option<String>,
}

/// Saved display language, if any. Unreadable or unknown values are logged and ignored.
pub(crate) fn load_language(state_dir: &Path) -> Option<Language> {
    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    let content = match writer.read(STATE_FILENAME) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            cards_warn!("Failed to read saved preferences in {:?}: {}", state_dir, err);
            return None;
        }
    };

    let state: PersistedState = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            cards_warn!("Failed to parse saved preferences in {:?}: {}", state_dir, err);
            return None;
        }
    };

    let code = state.language?;
    match code.parse::<Language>() {
        Ok(language) => {
            cards_info!("Restored language preference {}", language);
            Some(language)
        }
        Err(err) => {
            cards_warn!("Ignoring saved language: {}", err);
            None
        }
    }
}

pub(crate) fn save_language(state_dir: &Path, language: Language) {
    let state = PersistedState {
        language: Some(language.code().to_string()),
    };

    let content = match ron::ser::to_string_pretty(&state, ron::ser::PrettyConfig::new()) {
        Ok(text) => text,
        Err(err) => {
            cards_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    if let Err(err) = writer.write(STATE_FILENAME, &content) {
        cards_error!("Failed to save preferences to {:?}: {}", state_dir, err);
    }
}
