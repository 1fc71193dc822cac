//! Best-effort parsing of generated summaries.
//!
//! The model is asked for a fixed Markdown layout but nothing guarantees it
//! follows it, so parsing never fails: whatever cannot be recognised is
//! simply left out of the parsed sections while the raw text is kept intact.

use serde::{Deserialize, Serialize};

/// The generated summary: raw text plus whatever structure could be recovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// The model output, verbatim.
    pub text: String,
    pub sections: SummarySections,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarySections {
    pub overview: Option<String>,
    pub key_takeaways: Vec<String>,
    pub suggested_chapters: Vec<String>,
}

impl SummaryResult {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let sections = parse_sections(&text);
        Self { text, sections }
    }

    /// Whether all three sections were recognised.
    pub fn is_structured(&self) -> bool {
        self.sections.overview.is_some()
            && !self.sections.key_takeaways.is_empty()
            && !self.sections.suggested_chapters.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Overview,
    Takeaways,
    Chapters,
}

const HEADINGS: &[(&str, Section)] = &[
    ("overview", Section::Overview),
    ("summary", Section::Overview),
    ("key takeaways", Section::Takeaways),
    ("takeaways", Section::Takeaways),
    ("key points", Section::Takeaways),
    ("suggested chapters", Section::Chapters),
    ("chapters", Section::Chapters),
];

fn is_markup(c: char) -> bool {
    c == '*' || c == '_'
}

/// Recognise a section heading, returning the section and any text after the colon.
fn heading(line: &str) -> Option<(Section, &str)> {
    let cleaned = line
        .trim()
        .trim_start_matches('#')
        .trim_start()
        .trim_start_matches(is_markup)
        .trim_start();

    for (name, section) in HEADINGS {
        let matches = cleaned
            .get(..name.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(name));
        if !matches {
            continue;
        }

        let rest = cleaned[name.len()..].trim_start_matches(is_markup).trim_start();
        if rest.is_empty() {
            return Some((*section, ""));
        }
        if let Some(inline) = rest.strip_prefix(':') {
            return Some((*section, inline.trim_start_matches(is_markup).trim()));
        }
    }
    None
}

/// Strip a bullet or number marker from a list line.
fn list_item(line: &str) -> &str {
    let line = line.trim();
    for marker in ["* ", "- ", "+ ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim();
        }
    }

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim();
        }
    }
    line
}

fn is_rule(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == '-' || c == '*' || c == '_' || c == '=')
}

fn parse_sections(text: &str) -> SummarySections {
    let mut overview: Vec<&str> = Vec::new();
    let mut sections = SummarySections::default();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        if let Some((section, inline)) = heading(line) {
            current = Some(section);
            if !inline.is_empty() {
                match section {
                    Section::Overview => overview.push(inline),
                    Section::Takeaways => sections.key_takeaways.push(inline.to_string()),
                    Section::Chapters => sections.suggested_chapters.push(inline.to_string()),
                }
            }
            continue;
        }

        if line.trim().is_empty() || is_rule(line) {
            continue;
        }

        match current {
            Some(Section::Overview) => overview.push(list_item(line)),
            Some(Section::Takeaways) => sections.key_takeaways.push(list_item(line).to_string()),
            Some(Section::Chapters) => sections.suggested_chapters.push(list_item(line).to_string()),
            None => {}
        }
    }

    if !overview.is_empty() {
        sections.overview = Some(overview.join(" "));
    }
    sections
}
