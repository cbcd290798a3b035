//! # kvtree
//!
//! A reader and writer for KV documents: trees of quoted keys and values with
//! brace-delimited sections, tab indentation and `//` line comments.
//!
//! ```text
//! "Root"
//! {
//!     "name"    "hero"
//!     "stats"
//!     {
//!         "hp"  "100"
//!     }
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Incremental**: the parser pulls input a line at a time and copes with
//!   keys, values and comments spread over several lines
//! - **Lossless structure**: repeated keys, key order and sibling order all
//!   survive a load / save cycle
//! - **Arena tree**: nodes live in a [`KvDocument`] and are addressed by
//!   [`NodeId`]; parents are ids, never owners
//! - **Typed access**: best-effort integer, float, decimal and enum reads with
//!   caller-supplied defaults, plus space-packed "level" values
//!
//! ## Quick Start
//!
//! ```rust
//! use kvtree::{from_str, to_string};
//!
//! let text = "\"Root\"\n{\n\t\"name\"\t\"hero\"\n\t\"stats\"\n\t{\n\t\t\"hp\"\t\"100\"\n\t}\n}\n";
//! let mut doc = from_str(text).unwrap();
//!
//! let hp = doc.root().get("Root").unwrap().get("stats").unwrap().get("hp").unwrap();
//! assert_eq!(hp.get_int(0), 100);
//!
//! let hp = hp.id();
//! doc.set_as(hp, 120);
//! assert!(to_string(&doc).contains("\"hp\"\t\"120\""));
//! ```
//!
//! ## Files
//!
//! ```rust,no_run
//! use kvtree::{from_path, to_path};
//!
//! let doc = from_path("items.txt").unwrap();
//! assert_eq!(doc.root().key(), "items");
//! to_path("items.out.txt", &doc).unwrap();
//! ```
//!
//! See [`format`] for the grammar and its compatibility quirks.

pub mod access;
pub mod de;
pub mod document;
pub mod error;
pub mod escape;
pub mod format;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod ser;
pub mod source;

pub use access::KvScalar;
pub use de::Parser;
pub use document::{KvDocument, ValueChange, ValueListener};
pub use error::{Error, Result};
pub use escape::{escape, unescape};
pub use map::ChildMap;
pub use node::{Children, NodeId, NodeRef, Siblings};
pub use options::{ReadOptions, WriteOptions, DEFAULT_ROOT_NAME};
pub use ser::Serializer;
pub use source::{IterSource, LineSource, ReaderSource};

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Parse a KV document from a string.
///
/// # Examples
///
/// ```rust
/// use kvtree::from_str;
///
/// let doc = from_str("\"a\" \"1\"\n\"a\" \"2\"").unwrap();
/// assert_eq!(doc.root().get_all("a").unwrap().count(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::UnexpectedEndOfSection`] when a `}` has no section to close.
pub fn from_str(s: &str) -> Result<KvDocument> {
    from_str_with_options(s, ReadOptions::default())
}

/// Parse a KV document from a string with custom options.
///
/// # Errors
///
/// Returns [`Error::UnexpectedEndOfSection`] when a `}` has no section to close.
pub fn from_str_with_options(s: &str, options: ReadOptions) -> Result<KvDocument> {
    from_source(IterSource::new(s.lines()), options)
}

/// Parse a KV document from any [`LineSource`].
///
/// # Errors
///
/// Returns [`Error::UnexpectedEndOfSection`] when a `}` has no section to close,
/// and propagates errors raised by the source.
pub fn from_source<S: LineSource>(source: S, options: ReadOptions) -> Result<KvDocument> {
    Parser::new(source, options).parse()
}

/// Parse a KV document from an I/O stream.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not UTF-8, or a `}` has no
/// section to close.
pub fn from_reader<R: io::Read>(reader: R) -> Result<KvDocument> {
    from_source(
        ReaderSource::new(BufReader::new(reader)),
        ReadOptions::default(),
    )
}

/// Load a KV document from a file. The root is named after the file stem.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `path` does not exist, [`Error::Io`] if it
/// cannot be read, and [`Error::UnexpectedEndOfSection`] for a stray `}`.
pub fn from_path(path: impl AsRef<Path>) -> Result<KvDocument> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading document");
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string());
    let source = source::open(path)?;
    from_source(source, ReadOptions::new().with_root_name(name))
}

/// Serialize a document's children to a string.
#[must_use]
pub fn to_string(doc: &KvDocument) -> String {
    to_string_with_options(doc, WriteOptions::default())
}

/// Serialize a document to a string with custom options.
#[must_use]
pub fn to_string_with_options(doc: &KvDocument, options: WriteOptions) -> String {
    let mut serializer = Serializer::new(options);
    serializer.write_document(doc);
    serializer.into_inner()
}

/// Serialize a document to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn to_writer<W: Write>(writer: W, doc: &KvDocument) -> Result<()> {
    to_writer_with_options(writer, doc, WriteOptions::default())
}

/// Serialize a document to a writer with custom options.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn to_writer_with_options<W: Write>(
    mut writer: W,
    doc: &KvDocument,
    options: WriteOptions,
) -> Result<()> {
    let text = to_string_with_options(doc, options);
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Save a document's children to a file, replacing any existing content.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn to_path(path: impl AsRef<Path>, doc: &KvDocument) -> Result<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "saving document");
    let file = File::create(path).map_err(|e| Error::io(&e.to_string()))?;
    to_writer(BufWriter::new(file), doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_string() {
        let text = "\"a\"\t\"1\"\n\"b\"\n{\n\t\"c\"\t\"2\"\n}\n";
        let doc = from_str(text).unwrap();
        assert_eq!(to_string(&doc), text);
    }

    #[test]
    fn test_from_reader() {
        let doc = from_reader("\"k\" \"v\"\r\n".as_bytes()).unwrap();
        assert_eq!(doc.root().get("k").and_then(|n| n.value()), Some("v"));
        assert_eq!(doc.root().key(), DEFAULT_ROOT_NAME);
    }

    #[test]
    fn test_to_writer() {
        let doc = from_str("\"k\" \"v\"").unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &doc).unwrap();
        assert_eq!(buffer, b"\"k\"\t\"v\"\n");
    }

    #[test]
    fn test_from_path_missing() {
        assert!(matches!(
            from_path("no/such/dir/file.kv"),
            Err(Error::NotFound(_))
        ));
    }
}
