//! CLI module for tldw.

pub mod commands;
mod output;
pub mod preflight;
pub mod prompt;

pub use output::Output;

use crate::config::{Settings, SummaryStrategy};
use clap::Parser;
use std::path::PathBuf;

/// tldw - Too Long; Didn't Watch
///
/// Fetches the captions of a YouTube video, asks a language model for a
/// structured summary, and writes it to summary_<video_id>.txt and .json.
#[derive(Parser, Debug)]
#[command(name = "tldw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YouTube URL or 11-character video ID (prompted for when omitted)
    pub input: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory to write the summary files to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Language model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// How to handle transcripts over the input limit (truncate, chunked)
    #[arg(short, long)]
    pub strategy: Option<SummaryStrategy>,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Load settings from `--config` or the default location, then apply flag overrides.
    pub fn load_settings(&self) -> crate::error::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from(Some(&PathBuf::from(path)))?,
            None => Settings::load()?,
        };
        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(dir) = &self.output_dir {
            settings.general.output_dir = dir.clone();
        }
        if let Some(model) = &self.model {
            settings.summary.model = model.clone();
        }
        if let Some(strategy) = self.strategy {
            settings.summary.strategy = strategy;
        }
    }

    /// Log filter level: `-v` flags win over the configured level.
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self.verbose {
            0 => configured,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
