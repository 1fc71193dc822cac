//! Configuration module for tldw.
//!
//! Handles loading application settings, prompt templates and the API credential.

mod credentials;
mod prompts;
mod settings;

pub use credentials::{Credentials, API_KEY_ENV};
pub use prompts::{Prompts, SummaryPrompts};
pub use settings::{
    GeneralSettings, PromptSettings, Settings, SummarySettings, SummaryStrategy,
    TranscriptSettings,
};
