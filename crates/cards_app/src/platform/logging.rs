//! Logger setup for the knowledge cards host.
//!
//! The log file sits next to the rendered page so one output directory holds
//! everything a run produced. Stdout carries host messages, so terminal
//! logging goes to stderr.

use std::fs::File;
use std::path::{Path, PathBuf};

use cards_logging::NOISY_TARGETS;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "cards.log";

/// Where the host sends log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogDestination {
    /// `cards.log` in the output directory.
    #[default]
    File,
    /// Stderr only.
    Terminal,
    /// Both of the above.
    Both,
}

pub fn log_path(output_dir: &Path) -> PathBuf {
    output_dir.join(LOG_FILE)
}

/// Install the global logger. A second call is a no-op.
pub fn initialize(destination: LogDestination, output_dir: &Path) {
    let _ = CombinedLogger::init(build_loggers(destination, output_dir));
}

/// Falls back to stderr when the log file cannot be created, so a run is never silent.
fn build_loggers(destination: LogDestination, output_dir: &Path) -> Vec<Box<dyn SharedLogger>> {
    let level = LevelFilter::Info;
    let config = build_config();

    let file_logger = match destination {
        LogDestination::File | LogDestination::Both => {
            create_file_logger(level, config.clone(), &log_path(output_dir))
        }
        LogDestination::Terminal => None,
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination != LogDestination::File || file_logger.is_none() {
        loggers.push(TermLogger::new(
            level,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let Some(file_logger) = file_logger {
        loggers.push(file_logger);
    }
    loggers
}

fn build_config() -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error);
    for target in NOISY_TARGETS {
        builder.add_filter_ignore_str(target);
    }
    builder.build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_destination_creates_log_beside_page() {
        let temp = TempDir::new().unwrap();
        let loggers = build_loggers(LogDestination::File, temp.path());
        assert_eq!(loggers.len(), 1);
        assert!(log_path(temp.path()).exists());
    }

    #[test]
    fn both_destination_installs_two_loggers() {
        let temp = TempDir::new().unwrap();
        assert_eq!(build_loggers(LogDestination::Both, temp.path()).len(), 2);
    }

    #[test]
    fn terminal_destination_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        assert_eq!(build_loggers(LogDestination::Terminal, temp.path()).len(), 1);
        assert!(!log_path(temp.path()).exists());
    }

    #[test]
    fn unwritable_log_directory_falls_back_to_stderr() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let loggers = build_loggers(LogDestination::File, &missing);
        assert_eq!(loggers.len(), 1);
        assert!(!log_path(&missing).exists());
    }
}
