//! Configuration for reading and writing cfg files.
//!
//! ```rust
//! use libcfg::Options;
//!
//! // Two spaces per level, comments wrapped at 72 bytes.
//! let options = Options::spaces(2).with_comment_width(72);
//! assert_eq!(options.indent_char, b' ');
//! ```

/// Default capacity of the line buffer, in bytes.
pub const DEFAULT_LINE_CAPACITY: usize = 1024;

/// Default maximum payload of one written comment line, in bytes.
pub const DEFAULT_COMMENT_WIDTH: usize = 256;

/// Formatting and buffering options.
///
/// Readers use `line_capacity`; writers use the rest. A line of
/// `line_capacity` bytes or more (newline included) is truncated on read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Size of the line buffer. At least 2.
    pub line_capacity: usize,
    /// Comments longer than this are wrapped onto several lines. At least 1.
    pub comment_width: usize,
    /// Byte repeated for each indentation unit.
    pub indent_char: u8,
    /// Number of `indent_char` per nesting level.
    pub indent_width: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            line_capacity: DEFAULT_LINE_CAPACITY,
            comment_width: DEFAULT_COMMENT_WIDTH,
            indent_char: b'\t',
            indent_width: 1,
        }
    }
}

impl Options {
    /// One tab per level, 1024-byte lines, 256-byte comments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent with `width` spaces per level.
    #[must_use]
    pub fn spaces(width: usize) -> Self {
        Self::new().with_indent(b' ', width)
    }

    #[must_use]
    pub fn with_line_capacity(mut self, capacity: usize) -> Self {
        self.line_capacity = capacity.max(2);
        self
    }

    #[must_use]
    pub fn with_comment_width(mut self, width: usize) -> Self {
        self.comment_width = width.max(1);
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent_char: u8, indent_width: usize) -> Self {
        self.indent_char = indent_char;
        self.indent_width = indent_width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::new();
        assert_eq!(options.line_capacity, 1024);
        assert_eq!(options.comment_width, 256);
        assert_eq!(options.indent_char, b'\t');
        assert_eq!(options.indent_width, 1);
    }

    #[test]
    fn test_clamping() {
        let options = Options::new().with_line_capacity(0).with_comment_width(0);
        assert_eq!(options.line_capacity, 2);
        assert_eq!(options.comment_width, 1);
    }
}
