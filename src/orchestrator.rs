//! Pipeline orchestrator for tldw.
//!
//! Runs the stages in order (normalize the input, fetch the transcript,
//! summarize it, write the files) and reports which stage failed.

use crate::config::{Credentials, Prompts, Settings};
use crate::error::TldwError;
use crate::output::{OutputWriter, SummaryRecord};
use crate::summary::{CompletionProvider, OpenAiCompletionProvider, Summarizer, SummaryResult};
use crate::transcript::{TranscriptProvider, TranscriptRetriever, YoutubeTranscriptProvider};
use crate::video::{VideoId, VideoIdParser};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Startup,
    Normalization,
    TranscriptFetch,
    Summarization,
    FileWrite,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Startup => write!(f, "startup"),
            Stage::Normalization => write!(f, "normalization"),
            Stage::TranscriptFetch => write!(f, "transcript fetch"),
            Stage::Summarization => write!(f, "summarization"),
            Stage::FileWrite => write!(f, "file write"),
        }
    }
}

/// A failed run: the stage that failed and why.
#[derive(Error, Debug)]
#[error("{stage} failed: {error}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub error: TldwError,
}

impl PipelineError {
    pub fn new(stage: Stage, error: TldwError) -> Self {
        Self { stage, error }
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.error.hint()
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub video_id: VideoId,
    pub text_path: PathBuf,
    pub json_path: PathBuf,
    pub transcript_chars: usize,
    pub truncated: bool,
    pub model: String,
    pub summary: SummaryResult,
}

/// The main orchestrator for the tldw pipeline.
pub struct Orchestrator {
    parser: VideoIdParser,
    retriever: TranscriptRetriever,
    summarizer: Summarizer,
    writer: OutputWriter,
}

impl Orchestrator {
    /// Create an orchestrator talking to YouTube and the OpenAI API.
    pub fn new(settings: Settings, credentials: &Credentials) -> crate::error::Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let transcripts: Arc<dyn TranscriptProvider> =
            Arc::new(YoutubeTranscriptProvider::new(&settings.transcript)?);
        let completions: Arc<dyn CompletionProvider> =
            Arc::new(OpenAiCompletionProvider::new(credentials, &settings.summary)?);

        info!(
            "Using {} ({} strategy)",
            settings.summary.model, settings.summary.strategy
        );
        Self::with_components(settings, prompts, transcripts, completions)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        transcripts: Arc<dyn TranscriptProvider>,
        completions: Arc<dyn CompletionProvider>,
    ) -> crate::error::Result<Self> {
        let retriever = TranscriptRetriever::new(transcripts, settings.transcript.languages.clone());
        let summarizer = Summarizer::new(completions, prompts, settings.summary.clone())?;
        let writer = OutputWriter::new(settings.output_dir());

        Ok(Self {
            parser: VideoIdParser::new(),
            retriever,
            summarizer,
            writer,
        })
    }

    pub async fn run(&self, input: &str) -> Result<RunReport, PipelineError> {
        self.run_with_progress(input, |_| {}).await
    }

    /// Run the pipeline, calling `on_stage` as each stage starts.
    #[instrument(skip(self, on_stage), fields(input = %input))]
    pub async fn run_with_progress<F>(&self, input: &str, on_stage: F) -> Result<RunReport, PipelineError>
    where
        F: Fn(Stage),
    {
        on_stage(Stage::Normalization);
        let video_id = self
            .parser
            .parse(input)
            .map_err(|e| PipelineError::new(Stage::Normalization, e))?;
        info!("Video ID: {}", video_id);

        on_stage(Stage::TranscriptFetch);
        let transcript = self
            .retriever
            .retrieve(&video_id)
            .await
            .map_err(|e| PipelineError::new(Stage::TranscriptFetch, e))?;
        info!("Transcript has {} characters", transcript.char_count());

        on_stage(Stage::Summarization);
        let summary = self
            .summarizer
            .summarize(&transcript)
            .await
            .map_err(|e| PipelineError::new(Stage::Summarization, e))?;

        on_stage(Stage::FileWrite);
        let record = SummaryRecord {
            video_id: video_id.to_string(),
            source_url: input.trim().to_string(),
            model: summary.model.clone(),
            generated_at: Utc::now(),
            summary: summary.result.text.clone(),
            sections: summary.result.sections.clone(),
            transcript_chars: transcript.char_count(),
            truncated: summary.truncated,
        };
        let files = self
            .writer
            .write(&record)
            .map_err(|e| PipelineError::new(Stage::FileWrite, e))?;

        Ok(RunReport {
            video_id,
            text_path: files.text_path,
            json_path: files.json_path,
            transcript_chars: record.transcript_chars,
            truncated: record.truncated,
            model: summary.model,
            summary: summary.result,
        })
    }
}
