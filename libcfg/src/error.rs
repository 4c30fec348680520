//! Error types for cfg reading and writing.

use std::io;

use thiserror::Error;

use crate::context::Mode;

/// Result type for cfg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse context carrying the filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    ///
    /// `line` is one-based (it comes straight from the line buffer) and `col`
    /// is a zero-based byte offset into that line.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line, col + 1, name),
            None => format!(" at {}:{}", line, col + 1),
        }
    }
}

/// Malformed token sequences found while reading entries.
///
/// The trailing string of every variant is a location suffix filled in by
/// [`ParseError::with_location`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token that cannot continue (or start) an entry.
    #[error("Unexpected {0}{1}")]
    UnexpectedToken(String, String),

    /// `key =` with no value on the same line.
    #[error("Expected value after \"=\"{0}")]
    MissingValue(String),

    /// A quoted identifier with no closing quote on its line.
    #[error("Unterminated quoted identifier{0}")]
    UnterminatedQuote(String),

    /// `}` without a matching block begin.
    #[error("Unmatched block end{0}")]
    UnmatchedBlockEnd(String),
}

impl ParseError {
    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        let suffix = ctx.loc_suffix(line, col);
        match self {
            ParseError::UnexpectedToken(found, _) => ParseError::UnexpectedToken(found, suffix),
            ParseError::MissingValue(_) => ParseError::MissingValue(suffix),
            ParseError::UnterminatedQuote(_) => ParseError::UnterminatedQuote(suffix),
            ParseError::UnmatchedBlockEnd(_) => ParseError::UnmatchedBlockEnd(suffix),
        }
    }
}

/// Error type for cfg reading and writing.
#[derive(Error, Debug)]
pub enum Error {
    /// Opening, reading, writing or closing the stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a well-formed cfg document.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// `end_block` was called with no open block.
    #[error("Block end without a matching block begin")]
    DepthUnderflow,

    /// A read operation on a write context or vice versa.
    #[error("Context opened for {actual}, operation needs {expected}")]
    WrongMode { expected: Mode, actual: Mode },

    /// Written bytes requested as a string are not valid UTF-8.
    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Error returned by [`parse_int`](crate::parse_int).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseIntError {
    /// No digits before the first space or the end of the span.
    #[error("No digits to parse")]
    Empty,

    /// A byte that is neither a digit nor a terminating space.
    #[error("Invalid digit {} at byte {position}", quoted_byte(.byte))]
    InvalidDigit { byte: u8, position: usize },
}

fn quoted_byte(byte: &u8) -> String {
    format!("'{}'", byte.escape_ascii())
}
