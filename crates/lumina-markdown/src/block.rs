//! Block-level rendering of the markdown subset.
//!
//! Content is first split into prose and fenced segments using the shortest
//! enclosing pair of triple backticks. Fenced segments become code blocks;
//! prose is classified line by line.

use std::sync::LazyLock;

use regex::Regex;

use crate::highlight::highlight_lines;
use crate::inline::{Span, parse_inline};
use crate::util::slugify;

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(?P<alt>.*?)\]\((?P<url>.*?)\)").unwrap());

/// Language reported for fenced blocks without a tag.
pub const DEFAULT_LANGUAGE: &str = "text";

const FENCE: &str = "```";

/// A rendered block of content.
///
/// List items are independent blocks; consecutive items are not grouped into a
/// list container.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Block {
    /// `#`, `##` or `###` heading.
    Heading {
        /// Heading level (1-3).
        level: u8,
        /// Heading text without the marker.
        text: String,
        /// Anchor ID for linking.
        anchor: String,
    },
    /// Ordinary line of text.
    Paragraph(Vec<Span>),
    /// `> ` quoted line.
    Blockquote(Vec<Span>),
    /// `- ` list item.
    ListItem(Vec<Span>),
    /// `![alt](url)` image line.
    Image {
        /// Alternative text.
        alt: String,
        /// Image source URL.
        url: String,
    },
    /// Fenced code block.
    CodeBlock {
        /// Lowercased language tag, [`DEFAULT_LANGUAGE`] when absent.
        language: String,
        /// Raw code between the fences.
        source: String,
        /// Highlighted markup, one entry per source line.
        lines: Vec<String>,
    },
    /// Empty or whitespace-only line.
    Blank,
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    /// Anchor ID for linking.
    pub id: String,
    /// Heading text.
    pub text: String,
    /// Heading level (1-3).
    pub level: u8,
}

/// A piece of content after fence splitting.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Prose(&'a str),
    /// Text between the opening and closing fence markers.
    Fenced(&'a str),
}

/// Render content into blocks.
///
/// Pure and total: malformed markers degrade to paragraphs.
///
/// # Examples
///
/// ```
/// use lumina_markdown::{Block, render};
///
/// let blocks = render("```js\nconst x = 1;\n```");
/// assert!(matches!(
///     &blocks[..],
///     [Block::CodeBlock { language, source, .. }] if language == "js" && source == "const x = 1;"
/// ));
/// ```
#[must_use]
pub fn render(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for segment in split_fences(content) {
        match segment {
            Segment::Fenced(inner) => blocks.push(code_block(inner)),
            Segment::Prose(text) => blocks.extend(text.split('\n').map(classify_line)),
        }
    }
    blocks
}

/// Extract the heading outline of content.
///
/// Yields exactly the headings [`render`] produces, in order; headings inside
/// fenced code are ignored.
#[must_use]
pub fn extract_headings(content: &str) -> Vec<Heading> {
    split_fences(content)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Prose(text) => Some(text),
            Segment::Fenced(_) => None,
        })
        .flat_map(|text| text.split('\n'))
        .filter_map(|line| {
            heading_parts(line).map(|(level, text)| Heading {
                id: slugify(text),
                text: text.to_owned(),
                level,
            })
        })
        .collect()
}

/// Split content into alternating prose and fenced segments.
///
/// Zero-length prose segments (content starting or ending with a fence, or two
/// adjacent fences) are dropped.
fn split_fences(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in FENCE_RE.find_iter(content) {
        if m.start() > last {
            segments.push(Segment::Prose(&content[last..m.start()]));
        }
        let inner = &content[m.start() + FENCE.len()..m.end() - FENCE.len()];
        segments.push(Segment::Fenced(inner));
        last = m.end();
    }

    if last < content.len() {
        segments.push(Segment::Prose(&content[last..]));
    }
    segments
}

/// Build a code block from the text between the fences.
///
/// The first line is the language tag. A fence written on a single line has
/// no tag and its whole interior is code. The newline before the closing fence
/// is not part of the code.
fn code_block(inner: &str) -> Block {
    let (tag, body) = match inner.split_once('\n') {
        Some((tag, body)) => (tag, body.strip_suffix('\n').unwrap_or(body)),
        None => ("", inner),
    };

    let tag = tag.trim().to_lowercase();
    let language = if tag.is_empty() {
        DEFAULT_LANGUAGE.to_owned()
    } else {
        tag
    };

    Block::CodeBlock {
        language,
        source: body.to_owned(),
        lines: highlight_lines(body),
    }
}

/// Classify a single prose line. First match wins.
fn classify_line(line: &str) -> Block {
    if let Some((level, text)) = heading_parts(line) {
        return Block::Heading {
            level,
            text: text.to_owned(),
            anchor: slugify(text),
        };
    }

    if let Some(rest) = line.strip_prefix("> ") {
        return Block::Blockquote(parse_inline(rest));
    }

    if line.starts_with("![")
        && let Some(caps) = IMAGE_RE.captures(line)
    {
        return Block::Image {
            alt: caps["alt"].to_owned(),
            url: caps["url"].to_owned(),
        };
    }

    if let Some(rest) = line.strip_prefix("- ") {
        return Block::ListItem(parse_inline(rest));
    }

    if line.trim().is_empty() {
        return Block::Blank;
    }

    Block::Paragraph(parse_inline(line))
}

/// Split a heading line into level and text.
fn heading_parts(line: &str) -> Option<(u8, &str)> {
    [(1, "# "), (2, "## "), (3, "### ")]
        .into_iter()
        .find_map(|(level, marker)| line.strip_prefix(marker).map(|text| (level, text)))
}
