//! Line sources feeding the incremental parser.
//!
//! The parser never performs I/O itself. It pulls text one line at a time
//! from a [`LineSource`], which only has to answer two questions: is there
//! more input, and what is the next line (without its line terminator).
//!
//! Two sources are provided:
//!
//! - [`IterSource`] wraps any iterator of lines (`str::lines`, a `Vec` of
//!   chunks, a channel receiver...)
//! - [`ReaderSource`] wraps any [`BufRead`], such as a buffered file
//!
//! ## Examples
//!
//! ```rust
//! use kvtree::{from_source, IterSource, ReadOptions};
//!
//! let lines = vec!["\"name\"", "\"hero\""];
//! let doc = from_source(IterSource::new(lines), ReadOptions::new()).unwrap();
//! assert_eq!(doc.root().get("name").and_then(|n| n.value()), Some("hero"));
//! ```

use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::Peekable;
use std::path::Path;

/// A pull-based supplier of text lines.
pub trait LineSource {
    /// Returns `true` once no further line can be fetched.
    fn is_exhausted(&mut self) -> Result<bool>;

    /// Appends the next line to `buf`, without its terminator.
    ///
    /// Appends nothing when the source is exhausted.
    fn next_line(&mut self, buf: &mut String) -> Result<()>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn is_exhausted(&mut self) -> Result<bool> {
        (**self).is_exhausted()
    }

    fn next_line(&mut self, buf: &mut String) -> Result<()> {
        (**self).next_line(buf)
    }
}

/// Lines from an iterator.
pub struct IterSource<I: Iterator> {
    lines: Peekable<I>,
}

impl<I> IterSource<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(lines: impl IntoIterator<IntoIter = I>) -> Self {
        IterSource {
            lines: lines.into_iter().peekable(),
        }
    }
}

impl<I> LineSource for IterSource<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    fn is_exhausted(&mut self) -> Result<bool> {
        Ok(self.lines.peek().is_none())
    }

    fn next_line(&mut self, buf: &mut String) -> Result<()> {
        if let Some(line) = self.lines.next() {
            buf.push_str(line.as_ref());
        }
        Ok(())
    }
}

/// Lines from a buffered reader; `\n` and `\r\n` terminators are stripped.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn is_exhausted(&mut self) -> Result<bool> {
        Ok(self.reader.fill_buf()?.is_empty())
    }

    fn next_line(&mut self, buf: &mut String) -> Result<()> {
        let start = buf.len();
        self.reader.read_line(buf)?;
        if buf[start..].ends_with('\n') {
            buf.pop();
            if buf[start..].ends_with('\r') {
                buf.pop();
            }
        }
        Ok(())
    }
}

/// Opens `path` for reading as a line source.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the path does not exist and
/// [`Error::Io`] when it cannot be opened.
pub fn open(path: impl AsRef<Path>) -> Result<ReaderSource<BufReader<File>>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::not_found(&path.display().to_string()));
    }
    let file = File::open(path).map_err(|e| Error::io(&e.to_string()))?;
    Ok(ReaderSource::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(source: &mut impl LineSource) -> Vec<String> {
        let mut lines = Vec::new();
        while !source.is_exhausted().unwrap() {
            let mut line = String::new();
            source.next_line(&mut line).unwrap();
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_iter_source() {
        let mut source = IterSource::new("a\nb\r\n\nc".lines());
        assert_eq!(drain(&mut source), vec!["a", "b", "", "c"]);
        let mut buf = String::from("x");
        source.next_line(&mut buf).unwrap();
        assert_eq!(buf, "x");
    }

    #[test]
    fn test_reader_source_strips_terminators() {
        let mut source = ReaderSource::new(Cursor::new("one\r\ntwo\nthree"));
        assert_eq!(drain(&mut source), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_reader_source_trailing_newline() {
        let mut source = ReaderSource::new(Cursor::new("only\n"));
        assert_eq!(drain(&mut source), vec!["only"]);
    }

    #[test]
    fn test_reader_source_rejects_invalid_utf8() {
        let mut source = ReaderSource::new(Cursor::new(vec![0xff, 0xfe, b'\n']));
        let mut buf = String::new();
        assert!(matches!(source.next_line(&mut buf), Err(Error::Io(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let err = open("definitely/not/here.kv").err().unwrap();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
