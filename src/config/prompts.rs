//! Prompt templates for tldw.
//!
//! The defaults can be replaced by a `summary.toml` in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("Invalid regex"))
}

/// Collection of all prompt templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for video summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    /// Final structured summary. Variables: `video_id`, `transcript`.
    pub user: String,
    /// Per-window summary for the chunked strategy. Variables: `video_id`, `part`, `parts`, `chunk`.
    pub chunk_user: String,
    /// Combines window summaries. Variables: `video_id`, `summaries`.
    pub combine_user: String,
}

const STRUCTURE: &str = r#"The output MUST be Markdown in exactly this format:

**Overview:**
[A short, engaging overview of the entire video, 3-4 lines.]

**Key Takeaways:**
* [5 to 7 key takeaways, one per bullet]

**Suggested Chapters:**
* [Chapter Title 1]
* [Chapter Title 2]
* [Chapter Title 3]

Suggest exactly 3 chapters. Use only information present in the material."#;

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: "You are an expert video summarizer. You write concise, factual summaries of video transcripts."
                .to_string(),

            user: format!(
                r#"Summarize the transcript of the video '{{{{video_id}}}}'.

{STRUCTURE}

---
Transcript:
{{{{transcript}}}}
---

Please generate the summary now."#
            ),

            chunk_user: r#"Please provide a concise summary of the following video transcript chunk (part {{part}} of {{parts}}).
Focus on the main topics, key arguments, and any conclusions.

Transcript chunk:
---
{{chunk}}
---

Concise summary:"#
                .to_string(),

            combine_user: format!(
                r#"You will be given a series of summaries from sequential chunks of the transcript of the video '{{{{video_id}}}}'.
Synthesize them into one cohesive, well-formatted final output.

{STRUCTURE}

---
Chunk summaries:
{{{{summaries}}}}
---

Please generate the final, synthesized summary now."#
            ),
        }
    }
}

impl Prompts {
    /// Load prompts, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path).map_err(|e| {
                    crate::error::TldwError::Config(format!("{}: {}", summary_path.display(), e))
                })?;
                prompts.summary = toml::from_str(&content).map_err(|e| {
                    crate::error::TldwError::Config(format!("{}: {}", summary_path.display(), e))
                })?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are substituted in one pass over the template, so text
    /// inserted for one variable is never scanned for others. Unknown
    /// placeholders are left as written.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.summary.system.is_empty());
        assert!(prompts.summary.user.contains("{{transcript}}"));
        assert!(prompts.summary.user.contains("**Suggested Chapters:**"));
        assert!(prompts.summary.combine_user.contains("{{summaries}}"));
        assert!(prompts.summary.chunk_user.contains("{{chunk}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let template = "Video {{video_id}}:\n{{transcript}}\n{{missing}}";
        // fresh maps get fresh hash seeds, so iteration order varies
        for _ in 0..16 {
            let mut vars = HashMap::new();
            vars.insert("video_id".to_string(), "dQw4w9WgXcQ".to_string());
            vars.insert(
                "transcript".to_string(),
                "the speaker literally says {{video_id}} and {{unknown}}".to_string(),
            );
            assert_eq!(
                Prompts::render(template, &vars),
                "Video dQw4w9WgXcQ:\nthe speaker literally says {{video_id}} and {{unknown}}\n{{missing}}"
            );
        }
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("audience".to_string(), "engineers".to_string());
        custom.insert("video_id".to_string(), "ignored".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("video_id".to_string(), "abc".to_string());

        let out = prompts.render_with_custom("{{video_id}} for {{audience}}", &vars);
        assert_eq!(out, "abc for engineers");
    }

    #[test]
    fn test_custom_dir_overrides_summary_prompts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("summary.toml"),
            "system = \"Be brief.\"\nuser = \"Sum up {{transcript}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.summary.system, "Be brief.");
        assert_eq!(prompts.summary.user, "Sum up {{transcript}}");
        // unset keys fall back to defaults
        assert!(prompts.summary.combine_user.contains("{{summaries}}"));
    }
}
