//! Opening and closing cfg files.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::entry::Entry;
use crate::error::{Error, ParseContext, Result};
use crate::options::Options;
use crate::reader::Reader;
use crate::writer::Writer;

/// Whether a file is opened for reading or writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Read => f.write_str("read"),
            Mode::Write => f.write_str("write"),
        }
    }
}

/// A cfg file opened for reading or for writing, never both.
pub enum Context {
    Read(Reader<BufReader<File>>),
    Write(Writer<BufWriter<File>>),
}

/// Open `path` with default options.
///
/// Reading requires the file to exist; writing creates or truncates it.
pub fn open(mode: Mode, path: impl AsRef<Path>) -> Result<Context> {
    open_with_options(mode, path, Options::default())
}

pub fn open_with_options(mode: Mode, path: impl AsRef<Path>, options: Options) -> Result<Context> {
    let path = path.as_ref();
    log::debug!("opening {} for {}", path.display(), mode);
    match mode {
        Mode::Read => {
            let file = File::open(path)?;
            let ctx = ParseContext::new(Some(&path.display().to_string()));
            Ok(Context::Read(Reader::with_context(
                BufReader::new(file),
                &options,
                ctx,
            )))
        }
        Mode::Write => {
            let file = File::create(path)?;
            Ok(Context::Write(Writer::with_options(
                BufWriter::new(file),
                options,
            )))
        }
    }
}

impl Context {
    pub fn mode(&self) -> Mode {
        match self {
            Context::Read(_) => Mode::Read,
            Context::Write(_) => Mode::Write,
        }
    }

    fn writer(&mut self) -> Result<&mut Writer<BufWriter<File>>> {
        match self {
            Context::Write(writer) => Ok(writer),
            Context::Read(_) => Err(Error::WrongMode {
                expected: Mode::Write,
                actual: Mode::Read,
            }),
        }
    }

    /// See [`Reader::read_entry`].
    pub fn read_entry(&mut self) -> Result<Option<Entry<'_>>> {
        match self {
            Context::Read(reader) => reader.read_entry(),
            Context::Write(_) => Err(Error::WrongMode {
                expected: Mode::Read,
                actual: Mode::Write,
            }),
        }
    }

    pub fn write_comment(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        self.writer()?.write_comment(text)
    }

    pub fn write_kv(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        self.writer()?.write_kv(key, value)
    }

    pub fn begin_block(&mut self, name: impl AsRef<[u8]>) -> Result<()> {
        self.writer()?.begin_block(name)
    }

    pub fn end_block(&mut self) -> Result<()> {
        self.writer()?.end_block()
    }

    pub fn write_entry(&mut self, entry: &Entry<'_>) -> Result<()> {
        self.writer()?.write_entry(entry)
    }

    /// Flush pending output and release the file.
    pub fn close(self) -> Result<()> {
        match self {
            Context::Read(_) => {}
            Context::Write(writer) => {
                writer.close()?.into_inner().map_err(|e| e.into_error())?;
            }
        }
        log::debug!("closed");
        Ok(())
    }
}
