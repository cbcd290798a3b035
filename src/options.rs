//! Configuration options for reading and writing KV documents.
//!
//! - [`ReadOptions`]: how the parser names the document root
//! - [`WriteOptions`]: whether the serializer writes the root node itself
//!
//! ## Examples
//!
//! ```rust
//! use kvtree::{from_str_with_options, to_string_with_options, ReadOptions, WriteOptions};
//!
//! let doc = from_str_with_options("\"a\" \"1\"\n", ReadOptions::new().with_root_name("items")).unwrap();
//! assert_eq!(doc.root().key(), "items");
//!
//! let text = to_string_with_options(&doc, WriteOptions::new().with_root(true));
//! assert_eq!(text, "\"items\"\n{\n\t\"a\"\t\"1\"\n}\n");
//! ```

/// Root key used when the input has no name of its own.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// Options for parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    pub root_name: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }
}

impl ReadOptions {
    /// Creates default options (root named [`DEFAULT_ROOT_NAME`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key given to the synthetic document root.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }
}

/// Options for serialization.
///
/// # Examples
///
/// ```rust
/// use kvtree::WriteOptions;
///
/// let options = WriteOptions::new();
/// assert!(!options.include_root);
/// assert!(WriteOptions::new().with_root(true).include_root);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write the document root as a section instead of only its children.
    pub include_root: bool,
}

impl WriteOptions {
    /// Creates default options: the root is not written.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_root(mut self, include_root: bool) -> Self {
        self.include_root = include_root;
        self
    }
}
