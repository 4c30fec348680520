//! Entry reader.
//!
//! Each call to [`Reader::read_entry`] consumes tokens until one full entry
//! has been recognised, then discards whatever is left on that line. An
//! entry therefore never straddles lines, and only `key = value` needs more
//! than one token from the same line.

use std::io::BufRead;

use crate::entry::{Entry, OwnedEntry};
use crate::error::{ParseContext, ParseError, Result};
use crate::lexer::{Lexeme, TokenKind, Tokenizer};
use crate::options::Options;

/// Byte ranges of an entry in the current line.
enum Parsed {
    Comment(Lexeme),
    KeyValue(Lexeme, Lexeme),
    BlockBegin(Lexeme),
    BlockEnd,
}

/// Reads entries from a buffered stream.
///
/// ```
/// use libcfg::{Entry, Reader};
///
/// let mut reader = Reader::new("node0 {\n\tchild = value\n}\n".as_bytes());
/// assert_eq!(reader.read_entry().unwrap(), Some(Entry::BlockBegin(b"node0")));
/// ```
pub struct Reader<R> {
    tokens: Tokenizer<R>,
    depth: usize,
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, &Options::default())
    }

    pub fn with_options(reader: R, options: &Options) -> Self {
        Self::with_context(reader, options, ParseContext::default())
    }

    /// Create a reader whose errors name `ctx.filename`.
    pub fn with_context(reader: R, options: &Options, ctx: ParseContext) -> Self {
        Self {
            tokens: Tokenizer::new(reader, options.line_capacity, ctx),
            depth: 0,
        }
    }

    /// Read the next entry; `Ok(None)` at end of input.
    ///
    /// Errors are not recovered from: the reader's position after an error
    /// is unspecified and reading should stop.
    pub fn read_entry(&mut self) -> Result<Option<Entry<'_>>> {
        let first = match self.tokens.next_lexeme()? {
            Some(lexeme) => lexeme,
            None => {
                if self.depth > 0 {
                    log::debug!("end of input with {} unclosed block(s)", self.depth);
                }
                return Ok(None);
            }
        };

        let parsed = match first.kind {
            TokenKind::Comment => Parsed::Comment(first),
            TokenKind::NodeEnd => {
                if self.depth == 0 {
                    return Err(self
                        .tokens
                        .error(ParseError::UnmatchedBlockEnd(String::new()), first.col));
                }
                self.depth -= 1;
                Parsed::BlockEnd
            }
            TokenKind::Identifier => self.after_identifier(first)?,
            kind => {
                return Err(self.tokens.error(
                    ParseError::UnexpectedToken(kind.to_string(), String::new()),
                    first.col,
                ))
            }
        };
        self.tokens.invalidate();

        let tokens = &self.tokens;
        Ok(Some(match parsed {
            Parsed::Comment(text) => Entry::Comment(tokens.text(&text)),
            Parsed::KeyValue(key, value) => Entry::KeyValue {
                key: tokens.text(&key),
                value: tokens.text(&value),
            },
            Parsed::BlockBegin(name) => Entry::BlockBegin(tokens.text(&name)),
            Parsed::BlockEnd => Entry::BlockEnd,
        }))
    }

    fn after_identifier(&mut self, ident: Lexeme) -> Result<Parsed> {
        let next = match self.tokens.next_in_line()? {
            Some(next) => next,
            None => {
                return Err(self.tokens.error(
                    ParseError::UnexpectedToken("end of line".to_string(), String::new()),
                    self.tokens.line_end(),
                ))
            }
        };

        match next.kind {
            TokenKind::Equal => match self.tokens.next_in_line()? {
                Some(value) if value.kind == TokenKind::Identifier => {
                    Ok(Parsed::KeyValue(ident, value))
                }
                Some(other) => Err(self
                    .tokens
                    .error(ParseError::MissingValue(String::new()), other.col)),
                None => Err(self.tokens.error(
                    ParseError::MissingValue(String::new()),
                    self.tokens.line_end(),
                )),
            },
            TokenKind::NodeBegin => {
                self.depth += 1;
                log::trace!("block opened, depth {}", self.depth);
                Ok(Parsed::BlockBegin(ident))
            }
            kind => Err(self.tokens.error(
                ParseError::UnexpectedToken(kind.to_string(), String::new()),
                next.col,
            )),
        }
    }

    /// Iterate over owned entries, stopping after the first error.
    pub fn owned_entries(&mut self) -> OwnedEntries<'_, R> {
        OwnedEntries {
            reader: self,
            done: false,
        }
    }

    /// Read every remaining entry.
    pub fn read_all(&mut self) -> Result<Vec<OwnedEntry>> {
        self.owned_entries().collect()
    }

    /// Number of blocks opened and not yet closed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// One-based number of the line most recently read.
    pub fn line_number(&self) -> usize {
        self.tokens.line_number()
    }

    pub fn get_ref(&self) -> &R {
        self.tokens.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.tokens.into_inner()
    }
}

/// Iterator returned by [`Reader::owned_entries`].
pub struct OwnedEntries<'r, R> {
    reader: &'r mut Reader<R>,
    done: bool,
}

impl<R: BufRead> Iterator for OwnedEntries<'_, R> {
    type Item = Result<OwnedEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_entry() {
            Ok(Some(entry)) => Some(Ok(entry.to_owned_entry())),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
