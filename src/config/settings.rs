//! Configuration settings for tldw.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcript: TranscriptSettings,
    pub summary: SummarySettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory the summary files are written to.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Caption retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Caption languages to try, in order of preference.
    pub languages: Vec<String>,
    /// Keep inline formatting tags in caption text.
    pub preserve_formatting: bool,
    /// Timeout for the caption request.
    pub timeout_seconds: u64,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            preserve_formatting: false,
            timeout_seconds: 30,
        }
    }
}

/// How transcripts longer than the model input limit are handled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStrategy {
    /// Cut the transcript at `max_input_chars` and warn.
    #[default]
    Truncate,
    /// Summarize overlapping windows, then combine the partial summaries.
    Chunked,
}

impl std::str::FromStr for SummaryStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(SummaryStrategy::Truncate),
            "chunked" | "chunk" => Ok(SummaryStrategy::Chunked),
            _ => Err(format!("Unknown summary strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for SummaryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryStrategy::Truncate => write!(f, "truncate"),
            SummaryStrategy::Chunked => write!(f, "chunked"),
        }
    }
}

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    /// Chat completion model.
    pub model: String,
    /// Alternative OpenAI-compatible API base URL.
    pub api_base: Option<String>,
    /// Timeout for each completion request.
    pub timeout_seconds: u64,
    pub temperature: f32,
    /// Largest transcript (in characters) sent in a single request.
    pub max_input_chars: usize,
    pub strategy: SummaryStrategy,
    /// Window size for the chunked strategy.
    pub chunk_chars: usize,
    /// Overlap between consecutive windows.
    pub chunk_overlap: usize,
    /// Attempts per request when the provider fails transiently.
    pub max_attempts: u32,
    /// Base delay for exponential backoff between attempts.
    pub retry_base_delay_ms: u64,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_base: None,
            timeout_seconds: 90,
            temperature: 0.3,
            max_input_chars: 100_000,
            strategy: SummaryStrategy::Truncate,
            chunk_chars: 8000,
            chunk_overlap: 400,
            max_attempts: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory holding a `summary.toml` that overrides the default prompts.
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if !config_path.exists() {
            if path.is_some() {
                return Err(crate::error::TldwError::Config(format!(
                    "Config file not found: {}",
                    config_path.display()
                )));
            }
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            crate::error::TldwError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        Self::from_toml(&content).map_err(|e| {
            crate::error::TldwError::Config(format!("{}: {}", config_path.display(), e))
        })
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tldw")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }
}
