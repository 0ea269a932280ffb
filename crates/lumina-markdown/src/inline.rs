//! Inline span parsing for a single line of text.
//!
//! Recognizes `**bold**`, `*italic*`, `` `code` `` and `[label](url)`. At each
//! position the alternatives are tried in that order, interiors are matched
//! lazily and never re-scanned, and nothing crosses a line boundary.

use std::sync::LazyLock;

use regex::Regex;

static INLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\*\*(?P<bold>.*?)\*\*|\*(?P<italic>.*?)\*|`(?P<code>.*?)`|\[(?P<label>.*?)\]\((?P<url>.*?)\)",
    )
    .unwrap()
});

/// A styled run of text within a line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Span {
    /// Unstyled text, delimiters of unmatched markers included verbatim.
    Text(String),
    /// `**text**`
    Bold(String),
    /// `*text*`
    Italic(String),
    /// `` `text` ``
    Code(String),
    /// `[label](url)`
    Link {
        /// Visible link text.
        label: String,
        /// Link target.
        url: String,
    },
}

/// Split a line into styled spans.
///
/// Never fails: text that only looks like an opener stays in a [`Span::Text`].
/// Markers with an empty interior (such as a bare `**`) are also kept as text.
///
/// # Examples
///
/// ```
/// use lumina_markdown::{Span, parse_inline};
///
/// let spans = parse_inline("a **b** c");
/// assert_eq!(
///     spans,
///     vec![
///         Span::Text("a ".to_owned()),
///         Span::Bold("b".to_owned()),
///         Span::Text(" c".to_owned()),
///     ]
/// );
/// ```
#[must_use]
pub fn parse_inline(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut last = 0;

    for caps in INLINE_RE.captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        plain.push_str(&line[last..whole.start()]);
        last = whole.end();

        let span = if let Some(m) = caps.name("bold") {
            non_empty(m.as_str()).map(|t| Span::Bold(t.to_owned()))
        } else if let Some(m) = caps.name("italic") {
            non_empty(m.as_str()).map(|t| Span::Italic(t.to_owned()))
        } else if let Some(m) = caps.name("code") {
            non_empty(m.as_str()).map(|t| Span::Code(t.to_owned()))
        } else {
            match (caps.name("label"), caps.name("url")) {
                (Some(label), Some(url)) => Some(Span::Link {
                    label: label.as_str().to_owned(),
                    url: url.as_str().to_owned(),
                }),
                _ => None,
            }
        };

        match span {
            Some(span) => {
                flush_text(&mut spans, &mut plain);
                spans.push(span);
            }
            None => plain.push_str(whole.as_str()),
        }
    }

    plain.push_str(&line[last..]);
    flush_text(&mut spans, &mut plain);
    spans
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

fn flush_text(spans: &mut Vec<Span>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(Span::Text(std::mem::take(plain)));
    }
}
