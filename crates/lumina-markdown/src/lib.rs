//! Markdown-subset renderer for Lumina posts.
//!
//! This crate turns post content into typed [`Block`]s and extracts the
//! heading outline used for the table of contents.
//!
//! # Architecture
//!
//! - [`render`]: splits fenced code from prose and classifies each prose line
//! - [`parse_inline`]: splits a line into bold/italic/code/link [`Span`]s
//! - [`highlight`]: single-pass tokenizer producing HTML-safe code markup
//! - [`render_html`]: HTML backend shared by the detail view and editor preview
//!
//! Every function here is pure and total. Malformed markers degrade to plain
//! paragraphs and text rather than failing.
//!
//! # Example
//!
//! ```
//! use lumina_markdown::{extract_headings, render_to_html};
//!
//! let content = "# Hello\n\n**Bold** text";
//! let html = render_to_html(content);
//! let toc = extract_headings(content);
//! assert_eq!(toc[0].id, "hello");
//! assert!(html.contains("<strong>Bold</strong>"));
//! ```

mod block;
mod highlight;
mod html;
mod inline;
mod util;

pub use block::{Block, DEFAULT_LANGUAGE, Heading, extract_headings, render};
pub use highlight::{TokenKind, highlight, highlight_lines};
pub use html::{render_html, render_to_html};
pub use inline::{Span, parse_inline};
pub use util::{escape_html, slugify};
