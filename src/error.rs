//! Error types for tldw.

use std::path::PathBuf;
use thiserror::Error;

/// Which external collaborator produced a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Transcript,
    Completion,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Transcript => write!(f, "transcript service"),
            Service::Completion => write!(f, "language model service"),
        }
    }
}

/// Library-level error type for tldw operations.
#[derive(Error, Debug)]
pub enum TldwError {
    #[error("Invalid input: could not extract a video ID from '{0}'")]
    InvalidInput(String),

    #[error("Transcripts are disabled for video {video_id}")]
    TranscriptDisabled { video_id: String },

    #[error("No transcript found for video {video_id} in languages [{}]", languages.join(", "))]
    NoTranscriptFound {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("Video {video_id} cannot be used: {reason}")]
    VideoUnavailable { video_id: String, reason: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("The {service} failed: {message}")]
    TransientProvider { service: Service, message: String },

    #[error("The language model service rejected the request: {0}")]
    ProviderRejected(String),

    #[error("Could not write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TldwError {
    /// Shorthand for a transient failure of a collaborator.
    pub fn transient(service: Service, message: impl Into<String>) -> Self {
        TldwError::TransientProvider {
            service,
            message: message.into(),
        }
    }

    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, TldwError::TransientProvider { .. })
    }

    /// A suggestion for the operator, if one applies to this kind of failure.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TldwError::InvalidInput(_) => {
                Some("Paste a full YouTube URL (watch, youtu.be, embed) or an 11-character video ID.")
            }
            TldwError::TranscriptDisabled { .. } => Some("Try another video with captions enabled."),
            TldwError::NoTranscriptFound { .. } => {
                Some("Try another video, or add a language to transcript.languages in the config.")
            }
            TldwError::VideoUnavailable { .. } => {
                Some("Check the link, or pick a public video that plays without signing in.")
            }
            TldwError::Authentication(_) => {
                Some("Set your key with: export OPENAI_API_KEY='sk-...'")
            }
            TldwError::TransientProvider { .. } => Some("This is usually temporary; run the command again."),
            TldwError::Filesystem { .. } => Some("Check that the output directory exists and is writable."),
            TldwError::QuotaExceeded(_) | TldwError::ProviderRejected(_) | TldwError::Config(_) => None,
        }
    }
}

/// Result type alias for tldw operations.
pub type Result<T> = std::result::Result<T, TldwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_errors_are_retryable() {
        assert!(TldwError::transient(Service::Completion, "timeout").is_transient());
        assert!(!TldwError::QuotaExceeded("billing".into()).is_transient());
        assert!(!TldwError::Authentication("bad key".into()).is_transient());
    }

    #[test]
    fn filesystem_error_names_path() {
        let err = TldwError::Filesystem {
            path: PathBuf::from("/nope/summary_abc.txt"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/nope/summary_abc.txt"));
    }

    #[test]
    fn no_transcript_lists_languages() {
        let err = TldwError::NoTranscriptFound {
            video_id: "dQw4w9WgXcQ".into(),
            languages: vec!["en".into(), "de".into()],
        };
        assert_eq!(
            err.to_string(),
            "No transcript found for video dQw4w9WgXcQ in languages [en, de]"
        );
    }
}
