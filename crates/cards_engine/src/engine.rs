use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use cards_logging::{cards_debug, cards_info};

use crate::poller::run_poller;
use crate::source::{CardSource, EventSink};
use crate::{EngineEvent, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    FetchCards { request_id: RequestId },
}

/// Owns the IO thread; dropping the handle stops it along with the poller.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        source: Arc<dyn CardSource>,
        poll_interval: Option<Duration>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            if let Some(period) = poll_interval {
                cards_info!("Polling card source every {:?}", period);
                runtime.spawn(run_poller(source.clone(), period, sink.clone()));
            }
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), command, sink.as_ref()).await;
                });
            }
            cards_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn fetch_cards(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::FetchCards { request_id });
    }
}

async fn handle_command(source: &dyn CardSource, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::FetchCards { request_id } => {
            let result = source.fetch_cards().await;
            sink.emit(EngineEvent::CardsLoaded { request_id, result });
        }
    }
}
