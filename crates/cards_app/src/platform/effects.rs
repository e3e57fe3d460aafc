use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use cards_core::{CardEntry, Effect, Language, LocalizedSummary, Msg};
use cards_engine::{format_title, CardRecord, EngineEvent, EngineHandle, EventSink};
use cards_logging::{cards_debug, cards_info, cards_warn};

use super::persistence;

/// Carries out the effects returned by `update`.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>, state_dir: PathBuf) -> Self {
        Self {
            engine,
            msg_tx,
            state_dir,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCards { request_id } => {
                    cards_info!("FetchCards request_id={}", request_id);
                    self.engine.fetch_cards(request_id);
                }
                Effect::PersistLanguage(language) => {
                    persistence::save_language(&self.state_dir, language);
                }
                Effect::ScheduleDismiss { id, after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = msg_tx.send(Msg::NotificationExpired { id });
                    });
                }
            }
        }
    }
}

/// Feeds engine events back into the message loop.
pub struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl MsgSink {
    pub fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
        Self { msg_tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.msg_tx.send(map_event(event));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CardsLoaded { request_id, result } => Msg::CardsLoaded {
            request_id,
            result: result
                .map(|records| records.into_iter().map(map_record).collect())
                .map_err(|err| {
                    cards_warn!("Load {} failed: {}", request_id, err);
                    err.to_string()
                }),
        },
        EngineEvent::CountChecked(result) => {
            Msg::CountChecked(result.map_err(|err| err.to_string()))
        }
    }
}

fn map_record(record: CardRecord) -> CardEntry {
    let title = if record.title.trim().is_empty() {
        format_title(&record.filename)
    } else {
        record.title
    };

    let summary = by_language(&record.filename, record.summary, |text| LocalizedSummary {
        short: text.short,
        detailed: text.detailed,
    });
    let insights = by_language(&record.filename, record.insights, |items| items);

    CardEntry {
        filename: record.filename,
        title,
        summary,
        insights,
        podcast_file: record.podcast_file,
        processed_at: record.processed_at,
        failed: record.error,
    }
}

fn by_language<T, U>(
    filename: &str,
    entries: BTreeMap<String, T>,
    convert: impl Fn(T) -> U,
) -> BTreeMap<Language, U> {
    entries
        .into_iter()
        .filter_map(|(code, value)| match Language::from_code(&code) {
            Some(language) => Some((language, convert(value))),
            None => {
                cards_debug!("{}: skipping unsupported language {:?}", filename, code);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards_engine::SummaryText;
    use pretty_assertions::assert_eq;

    fn record() -> CardRecord {
        CardRecord {
            filename: "steel-ladle_report.pdf".to_string(),
            summary: BTreeMap::from([
                (
                    "en".to_string(),
                    SummaryText {
                        short: "s".to_string(),
                        detailed: "d".to_string(),
                    },
                ),
                (
                    "fr".to_string(),
                    SummaryText {
                        short: "court".to_string(),
                        detailed: "long".to_string(),
                    },
                ),
            ]),
            insights: BTreeMap::from([("th".to_string(), vec!["ก".to_string()])]),
            podcast_file: Some("x.wav".to_string()),
            error: true,
            ..CardRecord::default()
        }
    }

    #[test]
    fn record_maps_to_entry_keeping_supported_languages() {
        let entry = map_record(record());

        assert_eq!(entry.title, "Steel Ladle Report");
        assert_eq!(entry.summary.keys().copied().collect::<Vec<_>>(), vec![Language::En]);
        assert_eq!(entry.insights[&Language::Th], vec!["ก".to_string()]);
        assert_eq!(entry.podcast_file.as_deref(), Some("x.wav"));
        assert!(entry.failed);
    }

    #[test]
    fn server_title_is_kept() {
        let entry = map_record(CardRecord {
            title: "Ladle Study".to_string(),
            ..record()
        });
        assert_eq!(entry.title, "Ladle Study");
    }

    #[test]
    fn engine_events_become_messages() {
        let msg = map_event(EngineEvent::CardsLoaded {
            request_id: 3,
            result: Ok(vec![record()]),
        });
        match msg {
            Msg::CardsLoaded { request_id, result } => {
                assert_eq!(request_id, 3);
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(
            map_event(EngineEvent::CountChecked(Ok(5))),
            Msg::CountChecked(Ok(5))
        );
    }
}
