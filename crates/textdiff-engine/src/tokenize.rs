//! Line tokenizer.
//!
//! Lines are borrowed slices of the input and keep their exact content: no
//! whitespace trimming, and a `\r` before the `\n` stays part of the line.

/// Split `text` literally on `'\n'`.
///
/// `""` yields one empty line and a trailing newline yields a trailing empty
/// line, so the result always has one more element than `text` has newlines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// The lines of `text` as they take part in a diff.
///
/// Same as [`split_lines`] except that a final empty element is dropped: a
/// terminating newline does not add a blank line, and the empty text has no
/// lines at all.
pub fn diff_lines(text: &str) -> Vec<&str> {
    let mut lines = split_lines(text);
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}
