//! Incremental KV parsing.
//!
//! This module provides the [`Parser`], which builds a [`KvDocument`] from a
//! [`LineSource`] of unknown length. Input arrives one line at a time; a key,
//! value or comment may span several lines, so the parser keeps a growable
//! working buffer and only pulls another line when it cannot make progress
//! with what it already holds.
//!
//! ## Scanning
//!
//! The parser state is four optional offsets into the buffer: key start, key
//! end, value start, value end. Each call resolves the first unset offset by
//! scanning forward from the last resolved one:
//!
//! 1. **Key start**: the next `"`. A `}` here closes the current section and a
//!    `//` drops the rest of the line.
//! 2. **Key end**: a `"` that is not followed by a backslash.
//! 3. **Value start**: the next `"`, or `{` to open a section named by the key.
//!    A `//` drops the rest of the line.
//! 4. **Value end**: a `"` that is not preceded by a backslash.
//!
//! When all four are set the leaf is added, the consumed text is dropped from
//! the buffer and scanning restarts at step 1.
//!
//! ## Leniency
//!
//! Running out of input with a token half read is not an error: whatever was
//! complete is kept and the fragment is dropped. The only structural error is
//! a `}` with no open section.
//!
//! ```rust
//! use kvtree::from_str;
//!
//! let doc = from_str("\"a\" \"1\"\n\"b\" {\n\"c\" \"2\"\n\"d\" \"unterminated").unwrap();
//! assert_eq!(doc.root().get("b").unwrap().len(), 1);
//! assert!(from_str("}").is_err());
//! ```

use crate::escape::unescape;
use crate::options::ReadOptions;
use crate::source::LineSource;
use crate::{Error, KvDocument, NodeId, Result};

/// Outcome of one scanning step.
enum Scan {
    /// The offset this step looks for was found.
    Resolved,
    /// The buffer was restructured (section opened or closed); start over at step 1.
    Restart,
    /// The buffer holds no answer yet.
    NeedInput,
}

/// The incremental KV parser.
///
/// Created via [`Parser::new`]; run with [`Parser::parse`].
pub struct Parser<S> {
    source: S,
    options: ReadOptions,
    buffer: String,
    line: usize,
    key_start: Option<usize>,
    key_end: Option<usize>,
    value_start: Option<usize>,
    value_end: Option<usize>,
}

impl<S: LineSource> Parser<S> {
    pub fn new(source: S, options: ReadOptions) -> Self {
        Parser {
            source,
            options,
            buffer: String::with_capacity(256),
            line: 0,
            key_start: None,
            key_end: None,
            value_start: None,
            value_end: None,
        }
    }

    /// Number of lines pulled from the source so far.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Consumes the source and returns the populated document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEndOfSection`] for a `}` with no open
    /// section, and propagates errors from the source.
    pub fn parse(&mut self) -> Result<KvDocument> {
        let mut doc = KvDocument::new(self.options.root_name.clone());
        let mut current = doc.root_id();

        loop {
            if self.key_start.is_none() {
                match self.seek_key_start(&doc, &mut current)? {
                    Scan::Resolved => {}
                    Scan::Restart => continue,
                    Scan::NeedInput => {
                        if self.refill()? {
                            continue;
                        }
                        break;
                    }
                }
            }

            if self.key_end.is_none() && !self.seek_key_end() {
                if self.refill()? {
                    continue;
                }
                break;
            }

            if self.value_start.is_none() {
                match self.seek_value_start(&mut doc, &mut current)? {
                    Scan::Resolved => {}
                    Scan::Restart => continue,
                    Scan::NeedInput => {
                        if self.refill()? {
                            continue;
                        }
                        break;
                    }
                }
            }

            if self.value_end.is_none() && !self.seek_value_end() {
                if self.refill()? {
                    continue;
                }
                break;
            }

            self.commit_leaf(&mut doc, current);
        }

        tracing::debug!(
            lines = self.line,
            nodes = doc.node_count(),
            root = %self.options.root_name,
            "parsed document"
        );
        Ok(doc)
    }

    /// Appends `\n` and the next line. Returns `false` when the source is exhausted.
    fn refill(&mut self) -> Result<bool> {
        if self.source.is_exhausted()? {
            return Ok(false);
        }
        self.append_line()?;
        Ok(true)
    }

    fn append_line(&mut self) -> Result<()> {
        self.line += 1;
        self.buffer.push('\n');
        self.source.next_line(&mut self.buffer)
    }

    /// Drops the comment starting at `at` and pulls in the next line.
    ///
    /// Returns `false` when there is no next line to pull.
    fn skip_comment(&mut self, at: usize) -> Result<bool> {
        if self.source.is_exhausted()? {
            return Ok(false);
        }
        tracing::trace!(line = self.line, "skipping comment");
        self.buffer.truncate(at);
        self.append_line()?;
        Ok(true)
    }

    fn seek_key_start(&mut self, doc: &KvDocument, current: &mut NodeId) -> Result<Scan> {
        let mut i = 0;
        while i < self.buffer.len() {
            let bytes = self.buffer.as_bytes();
            match bytes[i] {
                b'"' => {
                    self.key_start = Some(i + 1);
                    return Ok(Scan::Resolved);
                }
                b'}' => {
                    let Some(parent) = doc.node(*current).parent() else {
                        return Err(Error::unexpected_end_of_section(self.line));
                    };
                    tracing::trace!(line = self.line, section = %doc.node(*current).key(), "close section");
                    *current = parent.id();
                    self.buffer.drain(..=i);
                    return Ok(Scan::Restart);
                }
                // The second slash is looked up ahead of the cursor.
                b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                    if !self.skip_comment(i)? {
                        break;
                    }
                    continue;
                }
                _ => {}
            }
            i += 1;
        }
        Ok(Scan::NeedInput)
    }

    fn seek_key_end(&mut self) -> bool {
        let Some(start) = self.key_start else {
            return false;
        };
        let bytes = self.buffer.as_bytes();
        // The closing quote needs one byte of lookahead: `\` right after a quote
        // marks it as escaped.
        let found = (start..bytes.len())
            .find(|&i| bytes[i] == b'"' && i + 1 < bytes.len() && bytes[i + 1] != b'\\');
        self.key_end = found;
        found.is_some()
    }

    fn seek_value_start(&mut self, doc: &mut KvDocument, current: &mut NodeId) -> Result<Scan> {
        let (Some(key_start), Some(key_end)) = (self.key_start, self.key_end) else {
            return Ok(Scan::NeedInput);
        };
        let mut i = key_end + 1;
        while i < self.buffer.len() {
            let bytes = self.buffer.as_bytes();
            match bytes[i] {
                b'"' => {
                    self.value_start = Some(i + 1);
                    return Ok(Scan::Resolved);
                }
                b'{' => {
                    let key = unescape(&self.buffer[key_start..key_end]).into_owned();
                    tracing::trace!(line = self.line, section = %key, "open section");
                    *current = doc.add_section(*current, key);
                    self.buffer.drain(..=i);
                    self.key_start = None;
                    self.key_end = None;
                    return Ok(Scan::Restart);
                }
                // The first slash is looked up behind the cursor.
                b'/' if i + 1 < bytes.len() && bytes[i - 1] == b'/' => {
                    if !self.skip_comment(i)? {
                        break;
                    }
                    continue;
                }
                _ => {}
            }
            i += 1;
        }
        Ok(Scan::NeedInput)
    }

    fn seek_value_end(&mut self) -> bool {
        let Some(start) = self.value_start else {
            return false;
        };
        let bytes = self.buffer.as_bytes();
        let found = (start..bytes.len()).find(|&i| bytes[i] == b'"' && bytes[i - 1] != b'\\');
        self.value_end = found;
        found.is_some()
    }

    fn commit_leaf(&mut self, doc: &mut KvDocument, current: NodeId) {
        if let (Some(key_start), Some(key_end), Some(value_start), Some(value_end)) =
            (self.key_start, self.key_end, self.value_start, self.value_end)
        {
            let key = unescape(&self.buffer[key_start..key_end]).into_owned();
            let value = unescape(&self.buffer[value_start..value_end]).into_owned();
            doc.add_leaf(current, key, value);
            self.buffer.drain(..=value_end);
        }
        self.key_start = None;
        self.key_end = None;
        self.value_start = None;
        self.value_end = None;
    }
}
