//! Transcript retrieval.
//!
//! A [`TranscriptProvider`] returns timed caption fragments for a video; the
//! [`TranscriptRetriever`] turns them into a single [`TranscriptDocument`].

mod youtube;

pub use youtube::YoutubeTranscriptProvider;

use crate::error::{Result, TldwError};
use crate::video::VideoId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// One timed unit of caption text as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionFragment {
    pub text: String,
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

impl CaptionFragment {
    pub fn new(text: impl Into<String>, start_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            text: text.into(),
            start_seconds,
            duration_seconds,
        }
    }
}

/// The full transcript of one video.
#[derive(Debug, Clone)]
pub struct TranscriptDocument {
    video_id: VideoId,
    fragments: Vec<CaptionFragment>,
    text: String,
}

impl TranscriptDocument {
    /// Build a document from fragments in provider order.
    ///
    /// Each fragment is trimmed and its inner whitespace collapsed; empty
    /// fragments are dropped and the rest joined with a single space.
    pub fn from_fragments(video_id: VideoId, fragments: Vec<CaptionFragment>) -> Self {
        let text = fragments
            .iter()
            .map(|f| collapse_whitespace(&f.text))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            video_id,
            fragments,
            text,
        }
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn fragments(&self) -> &[CaptionFragment] {
        &self.fragments
    }

    /// The concatenated transcript text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the transcript text in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trait for caption sources.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch caption fragments for a video, trying `languages` in order.
    async fn fetch(&self, video_id: &VideoId, languages: &[String]) -> Result<Vec<CaptionFragment>>;
}

/// Fetches and assembles transcripts.
pub struct TranscriptRetriever {
    provider: Arc<dyn TranscriptProvider>,
    languages: Vec<String>,
}

impl TranscriptRetriever {
    pub fn new(provider: Arc<dyn TranscriptProvider>, languages: Vec<String>) -> Self {
        Self { provider, languages }
    }

    /// Fetch the transcript for a video. No caching: every call hits the provider.
    #[instrument(skip(self), fields(video_id = %video_id))]
    pub async fn retrieve(&self, video_id: &VideoId) -> Result<TranscriptDocument> {
        debug!("Requesting captions in {:?}", self.languages);
        let fragments = self.provider.fetch(video_id, &self.languages).await?;

        let document = TranscriptDocument::from_fragments(video_id.clone(), fragments);
        if document.text().is_empty() {
            return Err(TldwError::NoTranscriptFound {
                video_id: video_id.to_string(),
                languages: self.languages.clone(),
            });
        }

        info!(
            "Fetched {} caption fragments ({} chars)",
            document.fragments().len(),
            document.char_count()
        );
        Ok(document)
    }
}
