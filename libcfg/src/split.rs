//! Splitting values on a separator byte.
//!
//! Values are opaque to the format; lists are a convention of the caller,
//! e.g. `array = "0,1,,2, 3, 5,12"`. Sub-spans borrow the input and nothing
//! is allocated. Empty sub-spans are kept, so a span with `n` separators
//! always yields `n + 1` parts.
//!
//! ```
//! use libcfg::split;
//!
//! let parts: Vec<&[u8]> = split::split(b"0,1,,2", b',').collect();
//! assert_eq!(parts, vec![&b"0"[..], &b"1"[..], &b""[..], &b"2"[..]]);
//! assert_eq!(split::count(b"0,1,,2", b','), 4);
//! assert_eq!(split::nth(b"0,1,,2", b',', 3), Some(&b"2"[..]));
//! ```

use std::iter::FusedIterator;

/// Iterator over the separator-delimited parts of a span.
///
/// Each step shrinks the remaining span; the iterator cannot be rewound.
#[derive(Debug, Clone)]
pub struct Split<'a> {
    rest: Option<&'a [u8]>,
    sep: u8,
}

impl<'a> Split<'a> {
    /// The part of the span not yet yielded, or `None` once exhausted.
    pub fn remainder(&self) -> Option<&'a [u8]> {
        self.rest
    }
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest?;
        match rest.iter().position(|&b| b == self.sep) {
            Some(i) => {
                self.rest = Some(&rest[i + 1..]);
                Some(&rest[..i])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.rest {
            Some(rest) => {
                let n = count(rest, self.sep);
                (n, Some(n))
            }
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for Split<'_> {}

impl FusedIterator for Split<'_> {}

/// Split `span` on every `sep`, keeping empty parts.
pub fn split(span: &[u8], sep: u8) -> Split<'_> {
    Split {
        rest: Some(span),
        sep,
    }
}

/// Number of parts [`split`] yields: one more than the separators in `span`.
pub fn count(span: &[u8], sep: u8) -> usize {
    1 + span.iter().filter(|&&b| b == sep).count()
}

/// The part at `index`, or `None` when there are not that many parts.
pub fn nth(span: &[u8], sep: u8, index: usize) -> Option<&[u8]> {
    split(span, sep).nth(index)
}
