//! Writing summaries to disk.
//!
//! Each run produces `summary_<video_id>.txt` with the summary text and
//! `summary_<video_id>.json` with the same text plus metadata. Existing files
//! for the same video are overwritten.

use crate::error::{Result, TldwError};
use crate::summary::SummarySections;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The JSON document written next to the plain-text summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub video_id: String,
    pub source_url: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
    /// Summary text, identical to the contents of the `.txt` file.
    pub summary: String,
    pub sections: SummarySections,
    pub transcript_chars: usize,
    pub truncated: bool,
}

/// Paths of the files produced for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub text_path: PathBuf,
    pub json_path: PathBuf,
}

pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File paths used for a video, whether or not they exist yet.
    pub fn paths_for(&self, video_id: &str) -> WrittenFiles {
        WrittenFiles {
            text_path: self.dir.join(format!("summary_{}.txt", video_id)),
            json_path: self.dir.join(format!("summary_{}.json", video_id)),
        }
    }

    /// Write both files for `record`, creating the output directory if needed.
    pub fn write(&self, record: &SummaryRecord) -> Result<WrittenFiles> {
        std::fs::create_dir_all(&self.dir).map_err(|source| TldwError::Filesystem {
            path: self.dir.clone(),
            source,
        })?;

        let files = self.paths_for(&record.video_id);

        write_file(&files.text_path, record.summary.as_bytes())?;

        let json = serde_json::to_string_pretty(record).map_err(|e| TldwError::Filesystem {
            path: files.json_path.clone(),
            source: std::io::Error::other(e),
        })?;
        write_file(&files.json_path, json.as_bytes())?;

        debug!(
            "Wrote {} and {}",
            files.text_path.display(),
            files.json_path.display()
        );
        Ok(files)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| TldwError::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(summary: &str) -> SummaryRecord {
        SummaryRecord {
            video_id: "dQw4w9WgXcQ".to_string(),
            source_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            model: "gpt-4o-mini".to_string(),
            generated_at: Utc::now(),
            summary: summary.to_string(),
            sections: SummarySections {
                overview: Some("X".to_string()),
                key_takeaways: vec!["a".to_string()],
                suggested_chapters: vec!["c".to_string()],
            },
            transcript_chars: 42,
            truncated: false,
        }
    }

    #[test]
    fn test_writes_text_and_json() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());
        let summary = "Overview: X\nTakeaways: ...\nChapters: ...";

        let files = writer.write(&record(summary)).unwrap();

        assert_eq!(files.text_path, dir.path().join("summary_dQw4w9WgXcQ.txt"));
        assert_eq!(std::fs::read_to_string(&files.text_path).unwrap(), summary);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&files.json_path).unwrap()).unwrap();
        assert_eq!(json["video_id"], "dQw4w9WgXcQ");
        assert_eq!(json["summary"], summary);
        assert_eq!(json["source_url"], "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(json["sections"]["overview"], "X");
        assert!(json["generated_at"].as_str().is_some());
    }

    #[test]
    fn test_rerun_overwrites_previous_files() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path());

        writer.write(&record("first run, a much longer summary")).unwrap();
        let files = writer.write(&record("second")).unwrap();

        assert_eq!(std::fs::read_to_string(&files.text_path).unwrap(), "second");
        let parsed: SummaryRecord =
            serde_json::from_str(&std::fs::read_to_string(&files.json_path).unwrap()).unwrap();
        assert_eq!(parsed.summary, "second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let dir = tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("nested").join("out"));

        let files = writer.write(&record("text")).unwrap();
        assert!(files.json_path.exists());
    }

    #[test]
    fn test_unwritable_location_names_the_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file in the way").unwrap();
        let writer = OutputWriter::new(&blocker);

        let err = writer.write(&record("text")).unwrap_err();

        match err {
            TldwError::Filesystem { path, .. } => assert_eq!(path, blocker),
            other => panic!("expected filesystem error, got {other:?}"),
        }
    }
}
