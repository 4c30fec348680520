//! Byte classification shared by the tokenizer and the writer.

/// Whitespace between tokens.
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// ASCII letters and digits. These are the only bytes a bareword may hold.
pub fn is_alnum(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Whether `value` can be written without quotes.
pub fn is_bareword(value: &[u8]) -> bool {
    !value.is_empty() && value.iter().all(|&b| is_alnum(b))
}
