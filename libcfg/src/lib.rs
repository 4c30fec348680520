//! Reader and writer for a small hierarchical configuration format.
//!
//! A cfg file is a sequence of comments, `key = value` pairs and named
//! blocks, one entry per line:
//!
//! ```text
//! #This is a test config file
//! identifier = value
//! node0 {
//! 	child = value
//! 	position = "0, 5"
//! }
//! ```
//!
//! All values are byte strings. [`split`] and [`parse_int`] help callers
//! interpret them, e.g. as comma-separated lists of integers.
//!
//! # Reading Pipeline
//!
//! 1. **Line buffer**: holds one line of input in fixed storage and refills
//!    it from the stream on demand. Over-long lines are truncated.
//!
//! 2. **Tokenizer**: scans the buffered line for comments, `=`, `{`, `}` and
//!    bare or quoted identifiers, skipping everything else.
//!
//! 3. **Entry reader**: assembles one entry from the tokens of a line and
//!    drops the rest of that line.
//!
//! # Example
//!
//! ```
//! use libcfg::{Entry, Reader, Writer};
//!
//! let mut writer = Writer::new(Vec::new());
//! writer.begin_block("node0").unwrap();
//! writer.write_kv("child", "value").unwrap();
//! writer.end_block().unwrap();
//! let text = writer.close().unwrap();
//!
//! let mut reader = Reader::new(&text[..]);
//! assert_eq!(reader.read_entry().unwrap(), Some(Entry::BlockBegin(b"node0")));
//! ```

mod buffer;
mod chars;
mod context;
mod entry;
mod error;
mod int;
mod lexer;
mod options;
mod reader;
pub mod split;
mod writer;

pub use buffer::{Cursor, LineBuffer};
pub use chars::{is_alnum, is_bareword, is_space};
pub use context::{open, open_with_options, Context, Mode};
pub use entry::{Entry, OwnedEntry};
pub use error::{Error, ParseContext, ParseError, ParseIntError, Result};
pub use int::parse_int;
pub use lexer::{Lexeme, Token, TokenKind, Tokenizer};
pub use options::{Options, DEFAULT_COMMENT_WIDTH, DEFAULT_LINE_CAPACITY};
pub use reader::{OwnedEntries, Reader};
pub use writer::Writer;

/// Read every entry of `input`.
///
/// Accepts `&str` as well as raw bytes; values need not be UTF-8.
pub fn parse(input: impl AsRef<[u8]>) -> Result<Vec<OwnedEntry>> {
    Reader::new(input.as_ref()).read_all()
}

/// Write `entries` to a byte vector using `options`.
///
/// Fails with [`Error::DepthUnderflow`] if the entries close more blocks
/// than they open.
pub fn to_vec_with_options(entries: &[OwnedEntry], options: Options) -> Result<Vec<u8>> {
    let mut writer = Writer::with_options(Vec::new(), options);
    for entry in entries {
        writer.write_entry(&entry.as_entry())?;
    }
    writer.close()
}

/// Write `entries` to a byte vector with default options.
pub fn to_vec(entries: &[OwnedEntry]) -> Result<Vec<u8>> {
    to_vec_with_options(entries, Options::default())
}

/// Write `entries` to a string using `options`.
///
/// Fails with [`Error::Utf8`] when the output is not valid UTF-8; use
/// [`to_vec_with_options`] for arbitrary bytes.
pub fn to_string_with_options(entries: &[OwnedEntry], options: Options) -> Result<String> {
    Ok(String::from_utf8(to_vec_with_options(entries, options)?)?)
}

/// Write `entries` to a string with default options.
pub fn to_string(entries: &[OwnedEntry]) -> Result<String> {
    to_string_with_options(entries, Options::default())
}
