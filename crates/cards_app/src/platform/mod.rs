//! Headless host: owns the view state, runs effects and writes the rendered page.
mod app;
pub mod cli;
mod config;
mod effects;
mod logging;
mod persistence;
mod ui;

pub use app::run_app;
