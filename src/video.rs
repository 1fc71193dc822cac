//! Video reference normalization.
//!
//! Turns whatever the operator pasted (a watch URL, a short link, an embed
//! link or a bare ID) into a canonical YouTube video ID before any network
//! call is made.

use crate::error::{Result, TldwError};
use regex::Regex;

/// A canonical 11-character YouTube video ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for VideoId {
    type Err = TldwError;

    fn from_str(s: &str) -> Result<Self> {
        parse_video_id(s)
    }
}

/// Extracts video IDs from the URL shapes YouTube hands out.
pub struct VideoIdParser {
    video_id_regex: Regex,
}

impl VideoIdParser {
    pub fn new() -> Self {
        let video_id_regex = Regex::new(
            r"(?x)
            ^(?:
                (?:https?://)?
                (?:(?:www|m|music)\.)?
                (?:
                    youtube(?:-nocookie)?\.com/
                    (?:
                        (?:embed|v|e|shorts|live)/
                        |
                        watch/?\?(?:\S*?&)?v=
                    )
                    |
                    youtu\.be/
                )
                ([A-Za-z0-9_-]{11})
                (?:[?&\#/]\S*)?
            |
                # Bare video ID
                ([A-Za-z0-9_-]{11})
            )$
        ",
        )
        .expect("Invalid regex");

        Self { video_id_regex }
    }

    /// Extract the video ID, or `None` if the input matches no accepted shape.
    pub fn extract(&self, input: &str) -> Option<VideoId> {
        let caps = self.video_id_regex.captures(input.trim())?;

        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| VideoId(m.as_str().to_string()))
    }

    pub fn parse(&self, input: &str) -> Result<VideoId> {
        self.extract(input)
            .ok_or_else(|| TldwError::InvalidInput(input.trim().to_string()))
    }
}

impl Default for VideoIdParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse operator input into a [`VideoId`].
pub fn parse_video_id(input: &str) -> Result<VideoId> {
    VideoIdParser::new().parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_all_shapes_yield_same_id() {
        let inputs = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ",
            "www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?feature=shared&v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc123",
            "youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?start=10",
            "https://youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
            "  dQw4w9WgXcQ\n",
        ];

        for input in inputs {
            let id = parse_video_id(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(id.as_str(), ID, "input: {input}");
        }
    }

    #[test]
    fn test_ids_with_dash_and_underscore() {
        assert_eq!(parse_video_id("5_EJwYeQusM").unwrap().as_str(), "5_EJwYeQusM");
        assert_eq!(
            parse_video_id("https://youtu.be/wXVvfFMTyz-?feature=shared").unwrap().as_str(),
            "wXVvfFMTyz-"
        );
    }

    #[test]
    fn test_invalid_inputs() {
        for input in [
            "",
            "not-a-video-id",
            "dQw4w9WgXc",
            "dQw4w9WgXcQQ",
            "https://vimeo.com/123456789",
            "https://www.youtube.com/watch?list=PL123",
            "https://www.youtube.com/watch?v=short",
            "hello world!",
        ] {
            match parse_video_id(input) {
                Err(TldwError::InvalidInput(offending)) => assert_eq!(offending, input.trim()),
                other => panic!("expected InvalidInput for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_display_is_bare_id() {
        let id: VideoId = ID.parse().unwrap();
        assert_eq!(id.to_string(), ID);
        assert_eq!(id.as_str(), ID);
    }
}
