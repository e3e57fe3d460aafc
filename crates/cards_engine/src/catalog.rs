//! Bundled document catalog and the lookup that turns a filename into a card.
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CardRecord, SummaryText};

/// Languages every processed card must carry.
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "th"];

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.ron");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub filename: String,
    pub summary: BTreeMap<String, SummaryText>,
    #[serde(default)]
    pub insights: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub podcast_file: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    documents: Vec<CatalogRecord>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {message}")]
    Read { path: String, message: String },
    #[error("invalid catalog: {0}")]
    Parse(String),
    #[error("catalog lists {0:?} more than once")]
    Duplicate(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("empty filename")]
    EmptyFilename,
    #[error("{filename}: no summary for language {language}")]
    MissingSummary { filename: String, language: String },
    #[error("{filename}: no insights for language {language}")]
    MissingInsights { filename: String, language: String },
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: HashMap<String, CatalogRecord>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_ron_str(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|err| CatalogError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_ron_str(&text)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            ron::from_str(text).map_err(|err| CatalogError::Parse(err.to_string()))?;
        Self::from_records(file.documents)
    }

    pub fn from_records(
        records: impl IntoIterator<Item = CatalogRecord>,
    ) -> Result<Self, CatalogError> {
        let mut map = HashMap::new();
        for record in records {
            if map.contains_key(&record.filename) {
                return Err(CatalogError::Duplicate(record.filename));
            }
            map.insert(record.filename.clone(), record);
        }
        Ok(Self { records: map })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Never fails: a miss yields the "analysis in progress" placeholder.
    pub fn lookup(&self, filename: &str) -> CatalogRecord {
        self.records
            .get(filename)
            .cloned()
            .unwrap_or_else(|| placeholder_record(filename))
    }
}

pub fn placeholder_record(filename: &str) -> CatalogRecord {
    let summary = BTreeMap::from([
        (
            "en".to_string(),
            SummaryText {
                short: format!("Summary for {filename} - Content analysis in progress..."),
                detailed: format!(
                    "Detailed analysis for {filename} is currently being processed. This document \
                     contains valuable information that requires thorough examination. Please \
                     check back later for a complete summary and insights."
                ),
            },
        ),
        (
            "th".to_string(),
            SummaryText {
                short: format!("สรุปสำหรับ {filename} - กำลังวิเคราะห์เนื้อหา..."),
                detailed: format!(
                    "การวิเคราะห์โดยละเอียดสำหรับ {filename} กำลังดำเนินการอยู่ \
                     เอกสารนี้มีข้อมูลที่มีค่าซึ่งต้องการการตรวจสอบอย่างละเอียด \
                     กรุณากลับมาตรวจสอบอีกครั้งเพื่อดูสรุปและข้อมูลเชิงลึกที่สมบูรณ์"
                ),
            },
        ),
    ]);
    let insights = BTreeMap::from([
        (
            "en".to_string(),
            vec!["Insights generation in progress...".to_string()],
        ),
        ("th".to_string(), vec!["กำลังสร้างข้อมูลเชิงลึก...".to_string()]),
    ]);
    CatalogRecord {
        filename: filename.to_string(),
        summary,
        insights,
        podcast_file: None,
    }
}

/// Card substituted for a document whose processing failed.
pub fn error_record(filename: &str) -> CardRecord {
    let summary = BTreeMap::from([
        (
            "en".to_string(),
            SummaryText {
                short: "Error processing file".to_string(),
                detailed: "Error processing file details".to_string(),
            },
        ),
        (
            "th".to_string(),
            SummaryText {
                short: "เกิดข้อผิดพลาดในการประมวลผลไฟล์".to_string(),
                detailed: "รายละเอียดข้อผิดพลาดในการประมวลผลไฟล์".to_string(),
            },
        ),
    ]);
    let insights = BTreeMap::from([
        (
            "en".to_string(),
            vec!["Unable to generate insights".to_string()],
        ),
        (
            "th".to_string(),
            vec!["ไม่สามารถสร้างข้อมูลเชิงลึกได้".to_string()],
        ),
    ]);
    CardRecord {
        filename: filename.to_string(),
        title: format_title(filename),
        summary,
        insights,
        podcast_file: None,
        processed_at: None,
        error: true,
    }
}

pub fn process_document(catalog: &Catalog, filename: &str) -> Result<CardRecord, ProcessError> {
    if filename.trim().is_empty() {
        return Err(ProcessError::EmptyFilename);
    }
    let record = catalog.lookup(filename);
    for language in SUPPORTED_LANGUAGES {
        if !record.summary.contains_key(language) {
            return Err(ProcessError::MissingSummary {
                filename: filename.to_string(),
                language: language.to_string(),
            });
        }
        if !record.insights.contains_key(language) {
            return Err(ProcessError::MissingInsights {
                filename: filename.to_string(),
                language: language.to_string(),
            });
        }
    }
    Ok(CardRecord {
        filename: filename.to_string(),
        title: format_title(filename),
        summary: record.summary,
        insights: record.insights,
        podcast_file: record.podcast_file,
        processed_at: None,
        error: false,
    })
}

/// `"the-learning_organization.pdf"` -> `"The Learning Organization"`.
pub fn format_title(filename: &str) -> String {
    let stem = filename.replacen(".pdf", "", 1);
    let mut title = String::with_capacity(stem.len());
    let mut at_word_start = true;
    for c in stem.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if at_word_start && c.is_ascii_alphanumeric() {
            title.push(c.to_ascii_uppercase());
        } else {
            title.push(c);
        }
        at_word_start = !c.is_ascii_alphanumeric();
    }
    title
}
