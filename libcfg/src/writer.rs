//! Writer: emits entries with indentation and conditional quoting.

use std::io::{self, Write};

use crate::chars::is_bareword;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::options::Options;

/// Writes entries to a stream.
///
/// Every line is indented by `indent_char` repeated `indent_width × depth`
/// times. Keys, block names and values containing anything other than
/// ASCII letters and digits are wrapped in double quotes; the empty string
/// is written as `""` so it reads back. Nothing is escaped, so
/// text containing `"` or a newline does not read back intact.
///
/// ```
/// use libcfg::Writer;
///
/// let mut writer = Writer::new(Vec::new());
/// writer.begin_block("node0").unwrap();
/// writer.write_kv("position", "0, 5").unwrap();
/// writer.end_block().unwrap();
/// assert_eq!(writer.into_inner(), b"node0 {\n\tposition = \"0, 5\"\n}\n");
/// ```
pub struct Writer<W: Write> {
    writer: W,
    options: Options,
    depth: usize,
}

impl<W: Write> Writer<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, Options::default())
    }

    pub fn with_options(writer: W, options: Options) -> Self {
        Self {
            writer,
            options,
            depth: 0,
        }
    }

    fn indent(&mut self) -> io::Result<()> {
        let count = self.options.indent_width * self.depth;
        for _ in 0..count {
            self.writer.write_all(&[self.options.indent_char])?;
        }
        Ok(())
    }

    fn write_ident(&mut self, text: &[u8]) -> io::Result<()> {
        if is_bareword(text) {
            self.writer.write_all(text)
        } else {
            self.writer.write_all(b"\"")?;
            self.writer.write_all(text)?;
            self.writer.write_all(b"\"")
        }
    }

    /// Write `text` as `#`-prefixed lines of at most `comment_width` bytes
    /// each. Empty text writes nothing.
    pub fn write_comment(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        let width = self.options.comment_width.max(1);
        for chunk in text.as_ref().chunks(width) {
            self.indent()?;
            self.writer.write_all(b"#")?;
            self.writer.write_all(chunk)?;
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Write `key = value`.
    pub fn write_kv(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        self.indent()?;
        self.write_ident(key.as_ref())?;
        self.writer.write_all(b" = ")?;
        self.write_ident(value.as_ref())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write `name {` and enter the block.
    pub fn begin_block(&mut self, name: impl AsRef<[u8]>) -> Result<()> {
        self.indent()?;
        self.write_ident(name.as_ref())?;
        self.writer.write_all(b" {\n")?;
        self.depth += 1;
        log::trace!("begin block, depth {}", self.depth);
        Ok(())
    }

    /// Leave the innermost block and write `}`.
    ///
    /// Fails with [`Error::DepthUnderflow`] when no block is open, writing
    /// nothing.
    pub fn end_block(&mut self) -> Result<()> {
        self.depth = self.depth.checked_sub(1).ok_or(Error::DepthUnderflow)?;
        self.indent()?;
        self.writer.write_all(b"}\n")?;
        log::trace!("end block, depth {}", self.depth);
        Ok(())
    }

    /// Write any entry, e.g. one just read from a [`Reader`](crate::Reader).
    pub fn write_entry(&mut self, entry: &Entry<'_>) -> Result<()> {
        match *entry {
            Entry::Comment(text) => self.write_comment(text),
            Entry::KeyValue { key, value } => self.write_kv(key, value),
            Entry::BlockBegin(name) => self.begin_block(name),
            Entry::BlockEnd => self.end_block(),
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and give back the stream.
    pub fn close(mut self) -> Result<W> {
        if self.depth > 0 {
            log::debug!("closing writer with {} open block(s)", self.depth);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Number of open blocks.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(write: impl FnOnce(&mut Writer<Vec<u8>>) -> Result<()>) -> String {
        output_with(Options::default(), write)
    }

    fn output_with(
        options: Options,
        write: impl FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
    ) -> String {
        let mut writer = Writer::with_options(Vec::new(), options);
        write(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_kv_quoting() {
        assert_eq!(output(|w| w.write_kv("identifier", "value")), "identifier = value\n");
        assert_eq!(output(|w| w.write_kv("position", "0, 5")), "position = \"0, 5\"\n");
        assert_eq!(output(|w| w.write_kv("under", "a_b")), "under = \"a_b\"\n");
        assert_eq!(output(|w| w.write_kv("empty", "")), "empty = \"\"\n");
        assert_eq!(output(|w| w.write_kv("my key", "v")), "\"my key\" = v\n");
        assert_eq!(output(|w| w.write_kv("", "v")), "\"\" = v\n");
        assert_eq!(output(|w| w.begin_block("")), "\"\" {\n");
    }

    #[test]
    fn test_nested_indentation() {
        let text = output(|w| {
            w.write_comment("Test node")?;
            w.begin_block("node0")?;
            w.write_kv("child", "value")?;
            w.begin_block("node1")?;
            w.write_kv("array", "0,1,,2, 3, 5,12")?;
            w.end_block()?;
            w.end_block()
        });
        assert_eq!(
            text,
            "#Test node\n\
             node0 {\n\
             \tchild = value\n\
             \tnode1 {\n\
             \t\tarray = \"0,1,,2, 3, 5,12\"\n\
             \t}\n\
             }\n"
        );
    }

    #[test]
    fn test_space_indentation() {
        let text = output_with(Options::spaces(2), |w| {
            w.begin_block("a")?;
            w.begin_block("b")?;
            w.write_comment("deep")?;
            w.end_block()?;
            w.end_block()
        });
        assert_eq!(text, "a {\n  b {\n    #deep\n  }\n}\n");
    }

    #[test]
    fn test_comment_wrapping() {
        let options = Options::new().with_comment_width(4);
        let text = output_with(options.clone(), |w| w.write_comment("abcdefghij"));
        assert_eq!(text, "#abcd\n#efgh\n#ij\n");
        let text = output_with(options, |w| w.write_comment("abcd"));
        assert_eq!(text, "#abcd\n");
    }

    #[test]
    fn test_wrapped_comment_lines_each_indented() {
        let options = Options::new().with_comment_width(3);
        let text = output_with(options, |w| {
            w.begin_block("n")?;
            w.write_comment("abcdef")?;
            w.end_block()
        });
        assert_eq!(text, "n {\n\t#abc\n\t#def\n}\n");
    }

    #[test]
    fn test_empty_comment_writes_nothing() {
        assert_eq!(output(|w| w.write_comment("")), "");
    }

    #[test]
    fn test_end_block_underflow() {
        let mut writer = Writer::new(Vec::new());
        assert!(matches!(writer.end_block(), Err(Error::DepthUnderflow)));
        assert_eq!(writer.depth(), 0);
        writer.begin_block("a").unwrap();
        writer.end_block().unwrap();
        assert!(matches!(writer.end_block(), Err(Error::DepthUnderflow)));
        writer.write_kv("k", "v").unwrap();
        assert_eq!(writer.into_inner(), b"a {\n}\nk = v\n");
    }

    #[test]
    fn test_write_entry() {
        let text = output(|w| {
            w.write_entry(&Entry::BlockBegin(b"n"))?;
            w.write_entry(&Entry::Comment(b" note"))?;
            w.write_entry(&Entry::KeyValue {
                key: b"k",
                value: b"v w",
            })?;
            w.write_entry(&Entry::BlockEnd)
        });
        assert_eq!(text, "n {\n\t# note\n\tk = \"v w\"\n}\n");
    }

    #[test]
    fn test_close_returns_stream() {
        let mut writer = Writer::new(Vec::new());
        writer.write_kv("a", "b").unwrap();
        assert_eq!(writer.close().unwrap(), b"a = b\n");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_io_errors_surface() {
        let mut writer = Writer::new(FailingWriter);
        assert!(matches!(writer.write_kv("a", "b"), Err(Error::Io(_))));
        assert!(matches!(writer.begin_block("a"), Err(Error::Io(_))));
        assert_eq!(writer.depth(), 0);
    }
}
