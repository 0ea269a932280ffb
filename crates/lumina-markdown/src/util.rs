//! Shared utility functions for markdown rendering.

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    push_escaped(&mut result, s);
    result
}

/// Append `s` to `out` with HTML special characters escaped.
pub(crate) fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}

/// Convert heading text to an anchor slug.
///
/// Lowercases the text and replaces every run of characters that are not word
/// characters (ASCII letters and digits, `_`, or CJK unified ideographs
/// U+4E00..=U+9FA5) with a single `-`. Other scripts, accented letters
/// included, count as separators. Hyphens already in the text belong to such
/// a run, so `a - b` and `a-b` both become `a-b`. Leading and trailing separators are
/// kept as a single hyphen.
///
/// # Examples
///
/// ```
/// use lumina_markdown::slugify;
///
/// assert_eq!(slugify("Hello, World! 你好"), "hello-world-你好");
/// assert_eq!(slugify("snake_case"), "snake_case");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_separator = false;

    for c in text.to_lowercase().chars() {
        if is_word_char(c) {
            result.push(c);
            in_separator = false;
        } else if !in_separator {
            result.push('-');
            in_separator = true;
        }
    }

    result
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("snake_case"), "snake_case");
    }

    #[test]
    fn test_slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("Hello, World! 你好"), "hello-world-你好");
    }

    #[test]
    fn test_slugify_keeps_edge_separators() {
        assert_eq!(slugify("What's New?"), "what-s-new-");
        assert_eq!(slugify("  Spaces"), "-spaces");
    }

    #[test]
    fn test_slugify_non_cjk_scripts_are_separators() {
        assert_eq!(slugify("Café Menu"), "caf-menu");
        assert_eq!(slugify("こんにちは World"), "-world");
        assert_eq!(slugify("Ünïcode 한국어 ٣"), "-n-code-");
    }

    #[test]
    fn test_slugify_cjk_only() {
        assert_eq!(slugify("为什么 学习"), "为什么-学习");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }
}
