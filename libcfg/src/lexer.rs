//! Tokenizer over the line buffer.
//!
//! Tokens are scanned lazily from the buffered line. When a line runs out
//! without producing a token the next line is fetched, so blank lines and
//! stray whitespace never surface as tokens.

use std::fmt;
use std::io::BufRead;
use std::ops::Range;

use crate::buffer::{Cursor, LineBuffer};
use crate::chars::{is_alnum, is_space};
use crate::error::{Error, ParseContext, ParseError, Result};

/// A token borrowing the buffered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text after `#` up to the end of the line, newline excluded.
    Comment(&'a [u8]),
    Equal,
    NodeBegin,
    NodeEnd,
    /// A bareword, or the contents of a quoted identifier without the quotes.
    Identifier(&'a [u8]),
    EndOfInput,
}

/// Kind of a scanned token, without its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    Equal,
    NodeBegin,
    NodeEnd,
    Identifier,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Comment => f.write_str("comment"),
            TokenKind::Equal => f.write_str("\"=\""),
            TokenKind::NodeBegin => f.write_str("\"{\""),
            TokenKind::NodeEnd => f.write_str("\"}\""),
            TokenKind::Identifier => f.write_str("identifier"),
        }
    }
}

/// A scanned token as a byte range of the current line.
///
/// Ranges stay meaningful across further scans of the same line, which is
/// what lets the entry reader look ahead before borrowing the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: TokenKind,
    /// Text of comments and identifiers; empty for punctuation.
    pub span: Range<usize>,
    /// Offset of the token's first byte.
    pub col: usize,
}

impl Lexeme {
    fn new(kind: TokenKind, span: Range<usize>, col: usize) -> Self {
        Self { kind, span, col }
    }

    fn punct(kind: TokenKind, col: usize) -> Self {
        Self::new(kind, col..col, col)
    }
}

/// Outcome of scanning one line from a given offset.
#[derive(Debug, PartialEq, Eq)]
enum Scan {
    /// A token and the offset just past it.
    Token(Lexeme, usize),
    /// A `"` at this offset has no closing quote on the line.
    Unterminated(usize),
    /// Only whitespace and stray bytes remained.
    EndOfLine,
}

fn scan(line: &[u8], mut pos: usize) -> Scan {
    while pos < line.len() {
        let start = pos;
        match line[pos] {
            b'#' => {
                let text = pos + 1;
                let end = line[text..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(line.len(), |i| text + i);
                return Scan::Token(
                    Lexeme::new(TokenKind::Comment, text..end, start),
                    line.len(),
                );
            }
            b'=' => return Scan::Token(Lexeme::punct(TokenKind::Equal, start), pos + 1),
            b'{' => return Scan::Token(Lexeme::punct(TokenKind::NodeBegin, start), pos + 1),
            b'}' => return Scan::Token(Lexeme::punct(TokenKind::NodeEnd, start), pos + 1),
            b'"' => {
                let text = pos + 1;
                return match line[text..].iter().position(|&b| b == b'"') {
                    Some(i) => Scan::Token(
                        Lexeme::new(TokenKind::Identifier, text..text + i, start),
                        text + i + 1,
                    ),
                    None => Scan::Unterminated(start),
                };
            }
            b if is_alnum(b) => {
                let len = line[pos..].iter().take_while(|&&b| is_alnum(b)).count();
                return Scan::Token(
                    Lexeme::new(TokenKind::Identifier, pos..pos + len, start),
                    pos + len,
                );
            }
            b => {
                if !is_space(b) {
                    log::trace!("skipping stray byte {:?} at column {}", b as char, pos + 1);
                }
                pos += 1;
            }
        }
    }
    Scan::EndOfLine
}

/// Incremental tokenizer owning the line buffer.
pub struct Tokenizer<R> {
    buffer: LineBuffer<R>,
    ctx: ParseContext,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R, line_capacity: usize, ctx: ParseContext) -> Self {
        Self {
            buffer: LineBuffer::new(reader, line_capacity),
            ctx,
        }
    }

    /// Return the next token, fetching new lines as needed.
    pub fn next_token(&mut self) -> Result<Token<'_>> {
        match self.next_lexeme()? {
            Some(lexeme) => Ok(self.token(&lexeme)),
            None => Ok(Token::EndOfInput),
        }
    }

    /// Like [`Tokenizer::next_token`] but as a range; `None` at end of input.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>> {
        loop {
            if self.buffer.exhausted() && !self.buffer.refill()? {
                return Ok(None);
            }
            if let Some(lexeme) = self.next_in_line()? {
                return Ok(Some(lexeme));
            }
        }
    }

    /// Scan the rest of the current line only; `None` when it holds no more
    /// tokens. Never fetches a new line.
    pub fn next_in_line(&mut self) -> Result<Option<Lexeme>> {
        let pos = match self.buffer.cursor() {
            Cursor::Refill => return Ok(None),
            Cursor::At(pos) => pos,
        };
        match scan(self.buffer.line(), pos) {
            Scan::Token(lexeme, next) => {
                log::trace!(
                    "line {}: {} at column {}",
                    self.buffer.line_number(),
                    lexeme.kind,
                    lexeme.col + 1
                );
                self.buffer.set_cursor(Cursor::At(next));
                Ok(Some(lexeme))
            }
            Scan::Unterminated(col) => {
                Err(self.error(ParseError::UnterminatedQuote(String::new()), col))
            }
            Scan::EndOfLine => {
                let end = self.buffer.line().len();
                self.buffer.set_cursor(Cursor::At(end));
                Ok(None)
            }
        }
    }

    /// Borrow a lexeme's text from the buffered line.
    pub fn token(&self, lexeme: &Lexeme) -> Token<'_> {
        match lexeme.kind {
            TokenKind::Comment => Token::Comment(self.text(lexeme)),
            TokenKind::Equal => Token::Equal,
            TokenKind::NodeBegin => Token::NodeBegin,
            TokenKind::NodeEnd => Token::NodeEnd,
            TokenKind::Identifier => Token::Identifier(self.text(lexeme)),
        }
    }

    pub fn text(&self, lexeme: &Lexeme) -> &[u8] {
        &self.buffer.line()[lexeme.span.clone()]
    }

    /// Drop the rest of the current line.
    pub fn invalidate(&mut self) {
        self.buffer.invalidate();
    }

    /// Offset of the end of the current line's content, newline excluded.
    pub fn line_end(&self) -> usize {
        let line = self.buffer.line();
        line.strip_suffix(b"\n").unwrap_or(line).len()
    }

    /// Attach the current line and `col` to a parse error.
    pub fn error(&self, err: ParseError, col: usize) -> Error {
        err.with_location(&self.ctx, self.buffer.line_number(), col)
            .into()
    }

    pub fn line_number(&self) -> usize {
        self.buffer.line_number()
    }

    pub fn get_ref(&self) -> &R {
        self.buffer.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.buffer.into_inner()
    }
}
