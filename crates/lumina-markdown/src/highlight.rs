//! Syntax highlighting for fenced code blocks.
//!
//! A single left-to-right tokenizer classifies the raw source and escapes each
//! token as it is emitted. Because classification never looks at generated
//! markup, a digit inside a string or a keyword inside a comment stays part of
//! the enclosing token, and `class="..."` attributes are never re-matched.

use crate::util::push_escaped;

/// Keywords wrapped in a `keyword` span.
const KEYWORDS: &[&str] = &[
    "const",
    "let",
    "var",
    "function",
    "return",
    "import",
    "export",
    "from",
    "class",
    "interface",
    "type",
    "async",
    "await",
    "if",
    "else",
    "for",
    "while",
    "try",
    "catch",
    "throw",
    "new",
    "void",
];

/// Literal words wrapped in a `literal` span.
const LITERALS: &[&str] = &["true", "false", "null", "undefined"];

/// Classification of a highlighted token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Double- or single-quoted string literal.
    String,
    /// `//` comment running to the end of the line.
    Comment,
    /// Reserved word.
    Keyword,
    /// `true`, `false`, `null` or `undefined`.
    Literal,
    /// Whole-word run of decimal digits.
    Number,
}

impl TokenKind {
    /// CSS class emitted for this token kind.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::String => "hl-string",
            Self::Comment => "hl-comment",
            Self::Keyword => "hl-keyword",
            Self::Literal => "hl-literal",
            Self::Number => "hl-number",
        }
    }
}

/// Highlight source code into HTML-safe markup.
///
/// Every HTML metacharacter in `code` is escaped; recognized tokens are wrapped
/// in `<span class="hl-...">`. Newlines are preserved as-is and never fall
/// inside a span.
///
/// # Examples
///
/// ```
/// use lumina_markdown::highlight;
///
/// assert_eq!(
///     highlight("let x = 1;"),
///     r#"<span class="hl-keyword">let</span> x = <span class="hl-number">1</span>;"#
/// );
/// ```
#[must_use]
pub fn highlight(code: &str) -> String {
    let mut out = String::with_capacity(code.len() * 2);
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < code.len() {
        let rest = &code[pos..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        let token = if rest.starts_with("//") {
            let end = rest.find('\n').unwrap_or(rest.len());
            Some((TokenKind::Comment, end))
        } else if c == '"' || c == '\'' {
            string_end(rest, c).map(|end| (TokenKind::String, end))
        } else if is_word_byte(c) {
            let end = rest
                .find(|ch: char| !is_word_byte(ch))
                .unwrap_or(rest.len());
            let word = &rest[..end];
            match classify_word(word) {
                Some(kind) => Some((kind, end)),
                None => {
                    // Identifiers are skipped whole, digits included.
                    pos += end;
                    continue;
                }
            }
        } else {
            None
        };

        match token {
            Some((kind, len)) => {
                push_escaped(&mut out, &code[plain_start..pos]);
                push_span(&mut out, kind, &rest[..len]);
                pos += len;
                plain_start = pos;
            }
            None => pos += c.len_utf8(),
        }
    }

    push_escaped(&mut out, &code[plain_start..]);
    out
}

/// Highlight source code and split the markup into lines.
#[must_use]
pub fn highlight_lines(code: &str) -> Vec<String> {
    highlight(code).split('\n').map(str::to_owned).collect()
}

fn push_span(out: &mut String, kind: TokenKind, text: &str) {
    out.push_str(r#"<span class=""#);
    out.push_str(kind.css_class());
    out.push_str(r#"">"#);
    push_escaped(out, text);
    out.push_str("</span>");
}

/// Byte length of a string literal starting at `rest[0] == quote`, including
/// both quotes. Backslash escapes are honored; literals never span lines.
fn string_end(rest: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in rest.char_indices().skip(1) {
        match c {
            '\n' => return None,
            '\\' if !escaped => escaped = true,
            c if c == quote && !escaped => return Some(i + c.len_utf8()),
            _ => escaped = false,
        }
    }
    None
}

fn classify_word(word: &str) -> Option<TokenKind> {
    if KEYWORDS.contains(&word) {
        Some(TokenKind::Keyword)
    } else if LITERALS.contains(&word) {
        Some(TokenKind::Literal)
    } else if word.bytes().all(|b| b.is_ascii_digit()) {
        Some(TokenKind::Number)
    } else {
        None
    }
}

fn is_word_byte(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
