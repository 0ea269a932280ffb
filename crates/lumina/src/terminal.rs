//! Plain-text rendering of blocks for the terminal.

use std::fmt::Write;

use lumina_markdown::{Block, Span};

/// Render blocks as plain text, one or more lines per block.
pub(crate) fn render_terminal(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        push_block(&mut out, block);
    }
    out
}

fn push_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, text, .. } => {
            out.push_str(text);
            out.push('\n');
            let rule = match level {
                1 => '=',
                2 => '-',
                _ => '~',
            };
            out.extend(std::iter::repeat_n(rule, text.chars().count()));
            out.push('\n');
        }
        Block::Paragraph(spans) => push_line(out, "", spans),
        Block::Blockquote(spans) => push_line(out, "│ ", spans),
        Block::ListItem(spans) => push_line(out, "• ", spans),
        Block::Image { alt, url } => {
            let _ = writeln!(out, "[image: {alt}] {url}");
        }
        Block::CodeBlock {
            language, source, ..
        } => {
            let _ = writeln!(out, "┌─ {language}");
            for line in source.split('\n') {
                let _ = writeln!(out, "│ {line}");
            }
            out.push_str("└─\n");
        }
        Block::Blank => out.push('\n'),
    }
}

fn push_line(out: &mut String, prefix: &str, spans: &[Span]) {
    out.push_str(prefix);
    for span in spans {
        match span {
            Span::Text(text) | Span::Bold(text) | Span::Italic(text) => out.push_str(text),
            Span::Code(text) => {
                let _ = write!(out, "`{text}`");
            }
            Span::Link { label, url } => {
                let _ = write!(out, "{label} <{url}>");
            }
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_markdown::render;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_headings_are_underlined() {
        assert_eq!(
            render_terminal(&render("# Title\n## 你好")),
            "Title\n=====\n你好\n--\n"
        );
    }

    #[test]
    fn test_inline_markers_are_flattened() {
        assert_eq!(
            render_terminal(&render("**a** *b* `c` [d](e)")),
            "a b `c` d <e>\n"
        );
    }

    #[test]
    fn test_prose_prefixes() {
        assert_eq!(
            render_terminal(&render("> q\n- i\n\n![alt](p.png)")),
            "│ q\n• i\n\n[image: alt] p.png\n"
        );
    }

    #[test]
    fn test_code_block_shows_raw_source() {
        assert_eq!(
            render_terminal(&render("```rs\nlet a = \"<x>\";\n```")),
            "┌─ rs\n│ let a = \"<x>\";\n└─\n"
        );
    }
}
