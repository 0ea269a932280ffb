//! HTML backend for rendered blocks.
//!
//! Produces semantic HTML5 for the detail view and the editor preview. Both
//! call sites go through [`render_html`], so the same content always yields
//! the same markup.

use crate::block::{Block, render};
use crate::inline::Span;
use crate::util::push_escaped;

/// Render blocks to HTML.
///
/// Produces:
/// - `<h1>`..`<h3>` with `id` anchors
/// - `<p>`, `<blockquote>` and `<br>` for prose
/// - one `<ul><li>` per list item
/// - `<img>` for images
/// - `<pre><code>` with highlighted markup for code blocks
#[must_use]
pub fn render_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        push_block(&mut out, block);
    }
    out
}

/// Render content straight to HTML.
///
/// # Examples
///
/// ```
/// use lumina_markdown::render_to_html;
///
/// assert_eq!(
///     render_to_html("## Hi\n**x**"),
///     r#"<h2 id="hi">Hi</h2><p><strong>x</strong></p>"#
/// );
/// ```
#[must_use]
pub fn render_to_html(content: &str) -> String {
    render_html(&render(content))
}

fn push_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading {
            level,
            text,
            anchor,
        } => {
            let tag = format!("h{level}");
            out.push('<');
            out.push_str(&tag);
            out.push_str(r#" id=""#);
            push_escaped(out, anchor);
            out.push_str(r#"">"#);
            push_escaped(out, text);
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        Block::Paragraph(spans) => wrap(out, "<p>", spans, "</p>"),
        Block::Blockquote(spans) => wrap(out, "<blockquote>", spans, "</blockquote>"),
        Block::ListItem(spans) => wrap(out, "<ul><li>", spans, "</li></ul>"),
        Block::Image { alt, url } => {
            out.push_str(r#"<img src=""#);
            push_escaped(out, url);
            out.push_str(r#"" alt=""#);
            push_escaped(out, alt);
            out.push_str(r#"">"#);
        }
        Block::CodeBlock {
            language, lines, ..
        } => {
            out.push_str(r#"<pre><code class="language-"#);
            push_escaped(out, language);
            out.push_str(r#"" data-lang=""#);
            push_escaped(out, language);
            out.push_str(r#"">"#);
            // Lines are already escaped by the highlighter.
            out.push_str(&lines.join("\n"));
            out.push_str("</code></pre>");
        }
        Block::Blank => out.push_str("<br>"),
    }
}

fn wrap(out: &mut String, open: &str, spans: &[Span], close: &str) {
    out.push_str(open);
    push_spans(out, spans);
    out.push_str(close);
}

fn push_spans(out: &mut String, spans: &[Span]) {
    for span in spans {
        match span {
            Span::Text(text) => push_escaped(out, text),
            Span::Bold(text) => push_tagged(out, "strong", text),
            Span::Italic(text) => push_tagged(out, "em", text),
            Span::Code(text) => push_tagged(out, "code", text),
            Span::Link { label, url } => {
                out.push_str(r#"<a href=""#);
                push_escaped(out, url);
                out.push_str(r#"" target="_blank" rel="noreferrer">"#);
                push_escaped(out, label);
                out.push_str("</a>");
            }
        }
    }
}

fn push_tagged(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    push_escaped(out, text);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
