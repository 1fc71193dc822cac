//! Transcript summarization with a language model.
//!
//! The [`Summarizer`] builds prompts from a [`TranscriptDocument`], keeps the
//! input within the configured limit (truncating or summarizing in windows),
//! retries transient provider failures with exponential backoff, and parses
//! the result into a [`SummaryResult`].

mod openai;
mod result;
mod window;

pub use openai::OpenAiCompletionProvider;
pub use result::{SummaryResult, SummarySections};
pub use window::{chunk_text, truncate_to_chars};

use crate::config::{Prompts, SummarySettings, SummaryStrategy};
use crate::error::{Result, TldwError};
use crate::transcript::TranscriptDocument;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A single prompt sent to the language model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

/// Trait for language model backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion, returning the model's text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Name of the model answering requests.
    fn model(&self) -> &str;
}

/// Outcome of summarizing one transcript.
#[derive(Debug, Clone)]
pub struct Summary {
    pub result: SummaryResult,
    pub model: String,
    /// Whether part of the transcript was left out to fit the input limit.
    pub truncated: bool,
}

pub struct Summarizer {
    provider: Arc<dyn CompletionProvider>,
    prompts: Prompts,
    settings: SummarySettings,
}

impl Summarizer {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        prompts: Prompts,
        settings: SummarySettings,
    ) -> Result<Self> {
        if settings.max_input_chars == 0 {
            return Err(TldwError::Config("summary.max_input_chars must be positive".into()));
        }
        if settings.chunk_chars == 0 || settings.chunk_overlap >= settings.chunk_chars {
            return Err(TldwError::Config(
                "summary.chunk_overlap must be smaller than a positive summary.chunk_chars".into(),
            ));
        }

        Ok(Self {
            provider,
            prompts,
            settings,
        })
    }

    #[instrument(skip(self, transcript), fields(video_id = %transcript.video_id()))]
    pub async fn summarize(&self, transcript: &TranscriptDocument) -> Result<Summary> {
        let video_id = transcript.video_id().as_str();
        let char_count = transcript.char_count();
        let limit = self.settings.max_input_chars;

        let (text, truncated) = if char_count <= limit {
            (self.summarize_single(video_id, transcript.text()).await?, false)
        } else {
            match self.settings.strategy {
                SummaryStrategy::Truncate => {
                    let (kept, _) = truncate_to_chars(transcript.text(), limit);
                    warn!(
                        "Transcript has {} characters, only the first {} are summarized",
                        char_count,
                        kept.chars().count()
                    );
                    (self.summarize_single(video_id, kept).await?, true)
                }
                SummaryStrategy::Chunked => self.summarize_chunked(video_id, transcript.text()).await?,
            }
        };

        Ok(Summary {
            result: SummaryResult::from_text(text),
            model: self.provider.model().to_string(),
            truncated,
        })
    }

    async fn summarize_single(&self, video_id: &str, transcript: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("video_id".to_string(), video_id.to_string());
        vars.insert("transcript".to_string(), transcript.to_string());

        let request = self.request(&self.prompts.summary.user, &vars);
        self.complete_with_retry(&request).await
    }

    /// Summarize overlapping windows, then combine the partial summaries.
    /// Returns the final text and whether the combine step had to truncate.
    async fn summarize_chunked(&self, video_id: &str, transcript: &str) -> Result<(String, bool)> {
        let windows = chunk_text(
            transcript,
            self.settings.chunk_chars,
            self.settings.chunk_overlap,
        );
        info!("Summarizing transcript in {} windows", windows.len());

        let mut partials = Vec::with_capacity(windows.len());
        for (i, window) in windows.iter().enumerate() {
            let mut vars = HashMap::new();
            vars.insert("video_id".to_string(), video_id.to_string());
            vars.insert("part".to_string(), (i + 1).to_string());
            vars.insert("parts".to_string(), windows.len().to_string());
            vars.insert("chunk".to_string(), window.to_string());

            let request = self.request(&self.prompts.summary.chunk_user, &vars);
            partials.push(self.complete_with_retry(&request).await?);
            debug!("Window {}/{} summarized", i + 1, windows.len());
        }

        let joined = partials
            .iter()
            .enumerate()
            .map(|(i, s)| format!("Part {}:\n{}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n\n");
        let (summaries, truncated) = truncate_to_chars(&joined, self.settings.max_input_chars);
        if truncated {
            warn!("Window summaries exceed the input limit and were truncated");
        }

        let mut vars = HashMap::new();
        vars.insert("video_id".to_string(), video_id.to_string());
        vars.insert("summaries".to_string(), summaries.to_string());

        let request = self.request(&self.prompts.summary.combine_user, &vars);
        Ok((self.complete_with_retry(&request).await?, truncated))
    }

    fn request(&self, template: &str, vars: &HashMap<String, String>) -> CompletionRequest {
        CompletionRequest {
            system: self.prompts.render_with_custom(&self.prompts.summary.system, vars),
            user: self.prompts.render_with_custom(template, vars),
        }
    }

    /// Send a request, retrying transient failures with exponential backoff.
    async fn complete_with_retry(&self, request: &CompletionRequest) -> Result<String> {
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.provider.complete(request).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = Duration::from_millis(
                        self.settings
                            .retry_base_delay_ms
                            .saturating_mul(1u64 << attempt.min(16)),
                    );
                    warn!(
                        "Attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt, max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
