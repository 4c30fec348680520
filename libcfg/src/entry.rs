//! Entries: the unit the reader produces and the writer consumes.

use std::fmt;

/// One parsed entry, borrowing the reader's line buffer.
///
/// The borrow ends before the reader can fetch another line; use
/// [`Entry::to_owned_entry`] to keep an entry around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// `#text`, holding the text after `#`.
    Comment(&'a [u8]),
    /// `key = value`, both without quotes.
    KeyValue { key: &'a [u8], value: &'a [u8] },
    /// `name {`
    BlockBegin(&'a [u8]),
    /// `}`
    BlockEnd,
}

/// An [`Entry`] that owns its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedEntry {
    Comment(Vec<u8>),
    KeyValue { key: Vec<u8>, value: Vec<u8> },
    BlockBegin(Vec<u8>),
    BlockEnd,
}

impl Entry<'_> {
    pub fn to_owned_entry(&self) -> OwnedEntry {
        match *self {
            Entry::Comment(text) => OwnedEntry::Comment(text.to_vec()),
            Entry::KeyValue { key, value } => OwnedEntry::KeyValue {
                key: key.to_vec(),
                value: value.to_vec(),
            },
            Entry::BlockBegin(name) => OwnedEntry::BlockBegin(name.to_vec()),
            Entry::BlockEnd => OwnedEntry::BlockEnd,
        }
    }
}

impl OwnedEntry {
    pub fn comment(text: impl Into<Vec<u8>>) -> Self {
        OwnedEntry::Comment(text.into())
    }

    pub fn kv(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        OwnedEntry::KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn begin(name: impl Into<Vec<u8>>) -> Self {
        OwnedEntry::BlockBegin(name.into())
    }

    pub fn as_entry(&self) -> Entry<'_> {
        match self {
            OwnedEntry::Comment(text) => Entry::Comment(text),
            OwnedEntry::KeyValue { key, value } => Entry::KeyValue { key, value },
            OwnedEntry::BlockBegin(name) => Entry::BlockBegin(name),
            OwnedEntry::BlockEnd => Entry::BlockEnd,
        }
    }
}

/// One-line debug form: `comment "…"`, `kv "k" = "v"`, `begin "n"`, `end`.
impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Comment(text) => write!(f, "comment \"{}\"", text.escape_ascii()),
            Entry::KeyValue { key, value } => write!(
                f,
                "kv \"{}\" = \"{}\"",
                key.escape_ascii(),
                value.escape_ascii()
            ),
            Entry::BlockBegin(name) => write!(f, "begin \"{}\"", name.escape_ascii()),
            Entry::BlockEnd => f.write_str("end"),
        }
    }
}

impl fmt::Display for OwnedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_entry().fmt(f)
    }
}
