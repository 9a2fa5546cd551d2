//! Character-level helpers. Positions in this crate count characters, not bytes.

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub(crate) fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// Byte offset of the gap before the `chars`-th character (0-based).
/// `chars == char_len(s)` yields the end of the string.
pub(crate) fn byte_offset(s: &str, chars: usize) -> Option<usize> {
    s.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .nth(chars)
}

/// Insert `form` at byte offset `offset`.
pub(crate) fn splice(word: &str, offset: usize, form: &str) -> String {
    let mut out = String::with_capacity(word.len() + form.len());
    out.push_str(&word[..offset]);
    out.push_str(form);
    out.push_str(&word[offset..]);
    out
}
