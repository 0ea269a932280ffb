//! Generation modes and their prompts.

use std::fmt;
use std::str::FromStr;

/// Kind of content to generate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GenerationMode {
    /// Structured outline for a topic.
    Outline,
    /// Complete post with a title.
    #[default]
    Full,
    /// Two-sentence excerpt of a text.
    Summary,
}

impl GenerationMode {
    /// All modes.
    pub const ALL: [Self; 3] = [Self::Outline, Self::Full, Self::Summary];

    /// Lowercase mode name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Full => "full",
            Self::Summary => "summary",
        }
    }

    /// Build the prompt for `topic`.
    ///
    /// For [`GenerationMode::Summary`] the topic is the text to summarize.
    #[must_use]
    pub fn prompt(self, topic: &str) -> String {
        match self {
            Self::Outline => format!(
                r#"Create a structured blog post outline for the topic: "{topic}". Use Markdown format."#
            ),
            Self::Summary => format!(
                r#"Summarize the following text into a catchy 2-sentence excerpt for a blog card: "{topic}""#
            ),
            Self::Full => format!(
                r#"Write a comprehensive, engaging blog post about "{topic}". The tone should be professional yet accessible. Use Markdown formatting. Include a title."#
            ),
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized generation mode name.
#[derive(Debug, thiserror::Error)]
#[error("unknown generation mode: {0} (expected outline, full or summary)")]
pub struct UnknownMode(pub String);

impl FromStr for GenerationMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMode(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outline_prompt() {
        assert_eq!(
            GenerationMode::Outline.prompt("Rust"),
            r#"Create a structured blog post outline for the topic: "Rust". Use Markdown format."#
        );
    }

    #[test]
    fn test_summary_prompt_wraps_text() {
        let prompt = GenerationMode::Summary.prompt("Long body");
        assert!(prompt.starts_with("Summarize the following text"));
        assert!(prompt.ends_with(r#": "Long body""#));
    }

    #[test]
    fn test_full_prompt_asks_for_title() {
        let prompt = GenerationMode::Full.prompt("Agents");
        assert!(prompt.contains(r#"about "Agents""#));
        assert!(prompt.ends_with("Include a title."));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("outline".parse::<GenerationMode>().unwrap(), GenerationMode::Outline);
        assert_eq!(" SUMMARY ".parse::<GenerationMode>().unwrap(), GenerationMode::Summary);
        assert!("essay".parse::<GenerationMode>().is_err());
    }
}
