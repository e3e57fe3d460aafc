//! Knowledge cards engine: card sources, content catalog and background IO.
mod catalog;
mod engine;
mod persist;
mod poller;
mod source;
mod types;

pub use catalog::{
    error_record, format_title, placeholder_record, process_document, Catalog, CatalogError,
    CatalogRecord, ProcessError, SUPPORTED_LANGUAGES,
};
pub use engine::{EngineError, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use poller::{run_poller, DEFAULT_POLL_INTERVAL};
pub use source::{
    CardSource, ChannelEventSink, EventSink, HttpCardSource, SourceSettings, StaticCardSource,
    DEFAULT_FILES,
};
pub use types::{
    CardRecord, CardsResponse, EngineEvent, FailureKind, RequestId, SourceError, SummaryText,
};
