use std::collections::BTreeMap;

use crate::Language;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalizedSummary {
    pub short: String,
    pub detailed: String,
}

/// One source document as held by the view state. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardEntry {
    pub filename: String,
    pub title: String,
    pub summary: BTreeMap<Language, LocalizedSummary>,
    pub insights: BTreeMap<Language, Vec<String>>,
    pub podcast_file: Option<String>,
    pub processed_at: Option<String>,
    /// Set on the placeholder substituted for a document that failed processing.
    pub failed: bool,
}

impl CardEntry {
    pub fn dom_id(&self) -> String {
        card_dom_id(&self.filename)
    }

    /// Summary for `lang`, falling back to whichever language the card does carry.
    pub fn summary_for(&self, lang: Language) -> Option<&LocalizedSummary> {
        self.summary
            .get(&lang)
            .or_else(|| self.summary.values().next())
    }

    pub fn insights_for(&self, lang: Language) -> &[String] {
        self.insights
            .get(&lang)
            .or_else(|| self.insights.values().next())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Element id for a card: every character outside `[A-Za-z0-9]` becomes `_`.
pub fn card_dom_id(filename: &str) -> String {
    filename
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Mp3 companion for a wav podcast; `None` for any other format.
pub fn alternate_podcast_file(podcast_file: &str) -> Option<String> {
    let (stem, ext) = podcast_file.rsplit_once('.')?;
    if ext.eq_ignore_ascii_case("wav") && !stem.is_empty() {
        Some(format!("{stem}.mp3"))
    } else {
        None
    }
}
