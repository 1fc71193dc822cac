//! tldw - Too Long; Didn't Watch
//!
//! Turns a YouTube video into a short structured summary: the video's
//! captions are fetched, sent to a language model with a fixed instruction
//! template, and the result is written to `summary_<video_id>.txt` and
//! `summary_<video_id>.json`.
//!
//! # Architecture
//!
//! - `video` - Video ID extraction from URLs
//! - `transcript` - Caption retrieval and assembly
//! - `summary` - Prompting, input limits, retries and result parsing
//! - `output` - Summary files
//! - `orchestrator` - Pipeline coordination
//! - `config` - Settings, prompts and credentials
//!
//! # Example
//!
//! ```rust,no_run
//! use tldw::config::{Credentials, Settings};
//! use tldw::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::from_env()?;
//!     let orchestrator = Orchestrator::new(settings, &credentials)?;
//!
//!     let report = orchestrator.run("https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("Wrote {}", report.text_path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod output;
pub mod summary;
pub mod transcript;
pub mod video;

pub use error::{Result, TldwError};
