use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use cards_core::{update, AppState, AppViewModel, LoadState, Msg};
use cards_engine::{ensure_output_dir, AtomicFileWriter, EngineHandle};
use cards_logging::{cards_debug, cards_error, cards_info, cards_warn};

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::{EffectRunner, MsgSink};
use super::ui::commands::{parse_command, Command, CommandError};
use super::ui::render::render_page;
use super::{logging, persistence};

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_cli(&cli);
    ensure_output_dir(&config.output_dir)
        .with_context(|| format!("preparing output directory {:?}", config.output_dir))?;
    logging::initialize(config.log, &config.output_dir);
    cards_info!("Starting with source {:?}", config.source);

    let source = config.card_source()?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let engine = EngineHandle::new(
        source,
        config.poll_interval(),
        Arc::new(MsgSink::new(msg_tx.clone())),
    )?;
    let effects = EffectRunner::new(engine, msg_tx.clone(), config.output_dir.clone());
    let page = PageWriter::new(&config);
    println!(
        "Rendering to {}",
        config.output_dir.join(&config.page_filename).display()
    );

    let saved_language = persistence::load_language(&config.output_dir);
    let _ = msg_tx.send(Msg::Startup { saved_language });

    let quit = Arc::new(AtomicBool::new(false));
    spawn_command_reader(msg_tx, quit.clone());

    let state = AppState::new();
    page.write(&state.view());
    let state = run_loop(state, &msg_rx, &effects, &page, &quit);

    cards_info!("Shutting down with {} cards", state.cards().len());
    Ok(())
}

/// Dispatches until input has ended and no load is still in flight.
fn run_loop(
    mut state: AppState,
    msg_rx: &mpsc::Receiver<Msg>,
    effects: &EffectRunner,
    page: &PageWriter,
    quit: &AtomicBool,
) -> AppState {
    while let Ok(msg) = msg_rx.recv() {
        state = dispatch(state, msg, effects, page);
        if quit.load(Ordering::SeqCst) && state.load_state() != LoadState::Loading {
            break;
        }
    }
    state
}

fn dispatch(state: AppState, msg: Msg, effects: &EffectRunner, page: &PageWriter) -> AppState {
    let (mut state, effect_list) = update(state, msg);
    effects.enqueue(effect_list);
    if state.consume_dirty() {
        page.write(&state.view());
    }
    state
}

struct PageWriter {
    writer: AtomicFileWriter,
    filename: String,
}

impl PageWriter {
    fn new(config: &AppConfig) -> Self {
        Self {
            writer: AtomicFileWriter::new(config.output_dir.clone()),
            filename: config.page_filename.clone(),
        }
    }

    fn write(&self, view: &AppViewModel) {
        match self.writer.write(&self.filename, &render_page(view)) {
            Ok(path) => cards_debug!("Rendered {} cards to {:?}", view.cards.len(), path),
            Err(err) => cards_error!("Failed to write page {}: {}", self.filename, err),
        }
    }
}

/// Reads one command per line until `quit` or end of input, then flags shutdown.
fn spawn_command_reader(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    cards_warn!("Stopped reading commands: {}", err);
                    break;
                }
            };
            match parse_command(&line) {
                Ok(Command::Dispatch(msg)) => {
                    if msg_tx.send(msg).is_err() {
                        return;
                    }
                }
                Ok(Command::Quit) => break,
                Err(CommandError::Empty) => {}
                Err(err) => eprintln!("{err}"),
            }
        }
        quit.store(true, Ordering::SeqCst);
        let _ = msg_tx.send(Msg::NoOp);
    });
}
