use std::sync::Arc;
use std::time::Duration;

use cards_logging::cards_debug;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::source::{CardSource, EventSink};
use crate::EngineEvent;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Count check every `period`, first one a full period after start.
///
/// Only reports; applying new cards is left to an explicit refresh. Runs for
/// as long as the runtime that owns it.
pub async fn run_poller(source: Arc<dyn CardSource>, period: Duration, sink: Arc<dyn EventSink>) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let result = source.count().await;
        match &result {
            Ok(count) => cards_debug!("Poll found {} documents", count),
            Err(err) => cards_debug!("Poll failed: {}", err),
        }
        sink.emit(EngineEvent::CountChecked(result));
    }
}
