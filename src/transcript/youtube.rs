//! YouTube caption provider backed by `yt-transcript-rs`.

use super::{CaptionFragment, TranscriptProvider};
use crate::config::TranscriptSettings;
use crate::error::{Result, Service, TldwError};
use crate::video::VideoId;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

/// Fetches captions straight from YouTube's player data.
pub struct YoutubeTranscriptProvider {
    api: YouTubeTranscriptApi,
    preserve_formatting: bool,
    timeout: Duration,
}

impl YoutubeTranscriptProvider {
    pub fn new(settings: &TranscriptSettings) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TldwError::Config(format!("Failed to initialise the transcript client: {}", e))
        })?;

        Ok(Self {
            api,
            preserve_formatting: settings.preserve_formatting,
            timeout: Duration::from_secs(settings.timeout_seconds),
        })
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptProvider {
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn fetch(&self, video_id: &VideoId, languages: &[String]) -> Result<Vec<CaptionFragment>> {
        let langs: Vec<&str> = languages.iter().map(String::as_str).collect();

        let request = self
            .api
            .fetch_transcript(video_id.as_str(), &langs, self.preserve_formatting);

        let transcript = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| {
                TldwError::transient(
                    Service::Transcript,
                    format!("no response within {}s", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| classify_error(video_id, languages, e))?;

        debug!(
            "Got {} snippets in {} (generated: {})",
            transcript.snippets.len(),
            transcript.language_code,
            transcript.is_generated
        );

        Ok(transcript
            .snippets
            .into_iter()
            .map(|s| CaptionFragment::new(s.text, s.start, s.duration))
            .collect())
    }
}

/// Map the library's failure reasons onto the error taxonomy.
///
/// Only failures of the request itself are transient; problems with the
/// video or its captions will not change on a retry.
fn classify_error(video_id: &VideoId, languages: &[String], err: CouldNotRetrieveTranscript) -> TldwError {
    use CouldNotRetrieveTranscriptReason as Reason;

    let unavailable = |reason: String| TldwError::VideoUnavailable {
        video_id: video_id.to_string(),
        reason,
    };

    match &err.reason {
        Some(Reason::TranscriptsDisabled) => TldwError::TranscriptDisabled {
            video_id: video_id.to_string(),
        },
        Some(Reason::NoTranscriptFound { .. })
        | Some(Reason::TranslationUnavailable(_))
        | Some(Reason::TranslationLanguageUnavailable(_)) => TldwError::NoTranscriptFound {
            video_id: video_id.to_string(),
            languages: languages.to_vec(),
        },
        Some(Reason::VideoUnavailable) => unavailable("the video is no longer available".into()),
        Some(Reason::VideoUnplayable { reason, .. }) => unavailable(format!(
            "the video is unplayable ({})",
            reason.as_deref().unwrap_or("no reason given")
        )),
        Some(Reason::AgeRestricted) => unavailable("the video is age-restricted".into()),
        Some(Reason::InvalidVideoId) => unavailable("YouTube does not recognise this ID".into()),
        Some(Reason::IpBlocked(_))
        | Some(Reason::RequestBlocked(_))
        | Some(Reason::YouTubeRequestFailed(_))
        | Some(Reason::YouTubeDataUnparsable(_))
        | Some(Reason::FailedToCreateConsentCookie)
        | None => TldwError::transient(Service::Transcript, err.to_string()),
    }
}
