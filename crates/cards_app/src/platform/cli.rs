use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "knowledge-cards")]
#[command(about = "Render bilingual knowledge cards for a document folder", long_about = None)]
#[command(version)]
pub struct Cli {
    /// RON configuration file; every field is optional.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of a card server, e.g. http://localhost:8080/api.
    #[arg(long)]
    pub api: Option<String>,

    /// Directory receiving the rendered page and saved preferences.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Seconds between background count checks; 0 disables polling.
    #[arg(long)]
    pub poll_secs: Option<u64>,

    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}
