//! Markdown formatting insertion for the editor toolbar.

use std::ops::Range;

/// Wrap the `selection` of `content` with `prefix` and `suffix`.
///
/// Returns the new text and the selection shifted to cover the original
/// selected text inside the markers. `selection` is a byte range; it is
/// clamped to the content and to character boundaries.
///
/// # Examples
///
/// ```
/// use lumina_editor::insert_format;
///
/// let (text, selection) = insert_format("make this bold", 5..9, "**", "**");
/// assert_eq!(text, "make **this** bold");
/// assert_eq!(&text[selection], "this");
/// ```
#[must_use]
pub fn insert_format(
    content: &str,
    selection: Range<usize>,
    prefix: &str,
    suffix: &str,
) -> (String, Range<usize>) {
    let end = floor_boundary(content, selection.end);
    let start = floor_boundary(content, selection.start.min(end));

    let mut text = String::with_capacity(content.len() + prefix.len() + suffix.len());
    text.push_str(&content[..start]);
    text.push_str(prefix);
    text.push_str(&content[start..end]);
    text.push_str(suffix);
    text.push_str(&content[end..]);

    (text, start + prefix.len()..end + prefix.len())
}

fn floor_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
