//! Fixed-capacity line buffer.
//!
//! The buffer holds exactly one line of input at a time. Its storage is
//! allocated once; [`LineBuffer::refill`] overwrites it in place, so anything
//! borrowed from [`LineBuffer::line`] must be dropped before the next refill.

use std::io::{self, BufRead};

/// Read position within the buffered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// The next read must fetch a fresh line.
    Refill,
    /// Byte offset into the current line.
    At(usize),
}

/// One line of input plus a read cursor.
pub struct LineBuffer<R> {
    reader: R,
    data: Box<[u8]>,
    len: usize,
    cursor: Cursor,
    line_number: usize,
    truncated: usize,
}

impl<R: BufRead> LineBuffer<R> {
    /// Create a buffer holding lines of at most `capacity - 1` bytes.
    pub fn new(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            data: vec![0; capacity].into_boxed_slice(),
            len: 0,
            cursor: Cursor::Refill,
            line_number: 0,
            truncated: 0,
        }
    }

    /// Read the next line, newline included, and rewind the cursor.
    ///
    /// Returns `Ok(false)` once the stream is exhausted. Bytes past the
    /// buffer's capacity are discarded up to and including the newline.
    pub fn refill(&mut self) -> io::Result<bool> {
        let limit = self.data.len().saturating_sub(1);
        self.len = 0;
        self.cursor = Cursor::Refill;

        let mut read_any = false;
        let mut dropped = 0;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            read_any = true;

            let (chunk, complete) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (&available[..=i], true),
                None => (available, false),
            };
            let take = chunk.len().min(limit - self.len);
            self.data[self.len..self.len + take].copy_from_slice(&chunk[..take]);
            self.len += take;
            // A lost newline alone is not truncation.
            let lost = chunk.len() - take;
            dropped += if complete && lost > 0 { lost - 1 } else { lost };

            let consumed = chunk.len();
            self.reader.consume(consumed);
            if complete {
                break;
            }
        }

        if !read_any {
            return Ok(false);
        }
        self.line_number += 1;
        self.truncated = dropped;
        if dropped > 0 {
            log::warn!(
                "line {} exceeds {} bytes, {} bytes truncated",
                self.line_number,
                limit,
                dropped
            );
        }
        self.cursor = Cursor::At(0);
        Ok(true)
    }

    /// Content bytes of the current line that did not fit, newline excluded.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    /// The buffered line.
    pub fn line(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Force the next read to fetch a fresh line. The current line stays
    /// readable until then.
    pub fn invalidate(&mut self) {
        self.cursor = Cursor::Refill;
    }

    /// Whether the cursor has nothing left to scan on this line.
    pub fn exhausted(&self) -> bool {
        match self.cursor {
            Cursor::Refill => true,
            Cursor::At(pos) => pos >= self.len,
        }
    }

    /// One-based number of the buffered line; 0 before the first refill.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
