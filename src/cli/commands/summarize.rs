//! Summarize command implementation.

use crate::cli::{preflight, prompt, Cli, Output};
use crate::config::{Credentials, Settings, SummaryStrategy, API_KEY_ENV};
use crate::error::TldwError;
use crate::orchestrator::{Orchestrator, PipelineError, RunReport, Stage};
use anyhow::{Context, Result};
use std::io;

/// Run the summarize command.
pub async fn run_summarize(cli: &Cli, settings: Settings) -> Result<RunReport> {
    let strategy = settings.summary.strategy;

    // Before the prompt, so a missing key fails without asking for input
    let orchestrator = startup(settings, std::env::var(API_KEY_ENV).ok(), Orchestrator::new)?;

    let input = match &cli.input {
        Some(input) => input.clone(),
        None => prompt::read_input(&mut io::stdin().lock(), &mut io::stdout())
            .context("Failed to read input")?,
    };

    let spinner = Output::spinner("Reading input...");
    let result = orchestrator
        .run_with_progress(&input, |stage| spinner.set_message(stage_message(stage)))
        .await;
    spinner.finish_and_clear();
    let report = result?;

    if report.truncated {
        Output::warning(&truncation_warning(strategy, report.transcript_chars));
    }

    print_summary(&report);
    Output::success(&format!("Summary of {} written", report.video_id));
    Output::kv("Text", &report.text_path.display().to_string());
    Output::kv("JSON", &report.json_path.display().to_string());

    Ok(report)
}

/// Check the credential and settings, then build the orchestrator with
/// `build`. Nothing is built when a check fails.
pub fn startup<F>(
    settings: Settings,
    api_key: Option<String>,
    build: F,
) -> std::result::Result<Orchestrator, PipelineError>
where
    F: FnOnce(Settings, &Credentials) -> crate::error::Result<Orchestrator>,
{
    let at_startup = |e: TldwError| PipelineError::new(Stage::Startup, e);

    let credentials = preflight::check(&settings, api_key).map_err(at_startup)?;
    build(settings, &credentials).map_err(at_startup)
}

fn truncation_warning(strategy: SummaryStrategy, transcript_chars: usize) -> String {
    match strategy {
        SummaryStrategy::Truncate => format!(
            "Transcript was too long ({} characters); only the beginning was summarized.",
            transcript_chars
        ),
        SummaryStrategy::Chunked => format!(
            "Transcript ({} characters) was summarized in windows, but the window summaries \
             exceeded the input limit; the final pass only saw the first ones.",
            transcript_chars
        ),
    }
}

fn stage_message(stage: Stage) -> &'static str {
    match stage {
        Stage::Startup => "Starting...",
        Stage::Normalization => "Reading input...",
        Stage::TranscriptFetch => "Fetching transcript...",
        Stage::Summarization => "Summarizing...",
        Stage::FileWrite => "Writing files...",
    }
}

fn print_summary(report: &RunReport) {
    let sections = &report.summary.sections;

    if let Some(overview) = &sections.overview {
        Output::header("Overview");
        println!("{}", overview);
    }
    if !sections.suggested_chapters.is_empty() {
        Output::header("Suggested Chapters");
        for chapter in &sections.suggested_chapters {
            Output::list_item(chapter);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use crate::summary::{CompletionProvider, CompletionRequest};
    use crate::transcript::{CaptionFragment, TranscriptProvider};
    use crate::video::VideoId;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingTranscripts {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TranscriptProvider for CountingTranscripts {
        async fn fetch(
            &self,
            _video_id: &VideoId,
            _languages: &[String],
        ) -> crate::error::Result<Vec<CaptionFragment>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![CaptionFragment::new("Hello world", 0.0, 1.0)])
        }
    }

    #[derive(Default)]
    struct CountingCompletions {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionProvider for CountingCompletions {
        async fn complete(&self, _request: &CompletionRequest) -> crate::error::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("Overview: short".to_string())
        }

        fn model(&self) -> &str {
            "counting-model"
        }
    }

    struct Stubs {
        transcripts: Arc<CountingTranscripts>,
        completions: Arc<CountingCompletions>,
        builds: AtomicUsize,
    }

    impl Stubs {
        fn new() -> Self {
            Self {
                transcripts: Arc::default(),
                completions: Arc::default(),
                builds: AtomicUsize::new(0),
            }
        }

        fn build(&self, settings: Settings, _: &Credentials) -> crate::error::Result<Orchestrator> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            Orchestrator::with_components(
                settings,
                Prompts::default(),
                self.transcripts.clone(),
                self.completions.clone(),
            )
        }
    }

    #[test]
    fn test_missing_key_makes_no_calls() {
        let stubs = Stubs::new();

        let err = startup(Settings::default(), None, |s, c| stubs.build(s, c))
            .err()
            .expect("startup should fail without a key");

        assert_eq!(err.stage, Stage::Startup);
        assert!(matches!(err.error, TldwError::Authentication(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
        assert_eq!(stubs.builds.load(Ordering::SeqCst), 0);
        assert_eq!(stubs.transcripts.calls.load(Ordering::SeqCst), 0);
        assert_eq!(stubs.completions.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blank_key_is_treated_as_missing() {
        let stubs = Stubs::new();

        let err = startup(Settings::default(), Some("   ".into()), |s, c| stubs.build(s, c))
            .err()
            .expect("startup should fail with a blank key");

        assert!(matches!(err.error, TldwError::Authentication(_)));
        assert_eq!(stubs.builds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_startup_with_key_runs_through_built_components() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.general.output_dir = dir.path().to_string_lossy().into_owned();
        let stubs = Stubs::new();

        let orchestrator =
            startup(settings, Some("sk-test".into()), |s, c| stubs.build(s, c)).unwrap();
        orchestrator.run("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(stubs.builds.load(Ordering::SeqCst), 1);
        assert_eq!(stubs.transcripts.calls.load(Ordering::SeqCst), 1);
        assert_eq!(stubs.completions.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_truncation_warning_matches_strategy() {
        let cut = truncation_warning(SummaryStrategy::Truncate, 150_000);
        assert!(cut.contains("150000 characters"));
        assert!(cut.contains("only the beginning"));

        let chunked = truncation_warning(SummaryStrategy::Chunked, 150_000);
        assert!(chunked.contains("window summaries"));
        assert!(!chunked.contains("only the beginning"));
    }
}
