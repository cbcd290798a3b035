//! KV text serialization.
//!
//! This module provides the [`Serializer`], which renders a tree back to text.
//! Output is canonical: one tab per depth level, sections as a quoted key on
//! its own line followed by a braced block, leaves as `"key"<TAB>"value"`.
//! Comments and blank lines from the original input are not preserved.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use kvtree::{from_str, to_string};
//!
//! let doc = from_str("\"Root\" { \"hp\" \"100\" }").unwrap();
//! assert_eq!(to_string(&doc), "\"Root\"\n{\n\t\"hp\"\t\"100\"\n}\n");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! Any node can be written on its own, at any starting depth:
//!
//! ```rust
//! use kvtree::{from_str, Serializer, WriteOptions};
//!
//! let doc = from_str("\"Root\" { \"hp\" \"100\" }").unwrap();
//! let mut serializer = Serializer::new(WriteOptions::new());
//! serializer.write_node(doc.root().get("Root").unwrap().get("hp").unwrap(), 1);
//! assert_eq!(serializer.into_inner(), "\t\"hp\"\t\"100\"\n");
//! ```

use crate::escape::escape;
use crate::{KvDocument, NodeRef, WriteOptions};

/// The KV text serializer.
pub struct Serializer {
    output: String,
    options: WriteOptions,
}

impl Serializer {
    pub fn new(options: WriteOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `doc`: its root's children, or the root itself when
    /// [`WriteOptions::include_root`] is set.
    pub fn write_document(&mut self, doc: &KvDocument) {
        if self.options.include_root {
            self.write_node(doc.root(), 0);
        } else {
            for child in doc.root() {
                self.write_node(child, 0);
            }
        }
    }

    /// Writes `node` and its subtree, indented by `depth` tabs.
    pub fn write_node(&mut self, node: NodeRef<'_>, depth: usize) {
        let mut stack = vec![Step::Open(node, depth)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(node, depth) => {
                    self.write_indent(depth);
                    self.write_quoted(node.key());

                    if node.has_children() {
                        self.output.push('\n');
                        self.write_indent(depth);
                        self.output.push_str("{\n");
                        stack.push(Step::Close(depth));
                        let first = stack.len();
                        stack.extend(node.children().map(|child| Step::Open(child, depth + 1)));
                        stack[first..].reverse();
                    } else {
                        self.output.push('\t');
                        self.write_quoted(node.value().unwrap_or_default());
                        self.output.push('\n');
                    }
                }
                Step::Close(depth) => {
                    self.write_indent(depth);
                    self.output.push_str("}\n");
                }
            }
        }
    }

    #[inline]
    fn write_indent(&mut self, depth: usize) {
        self.output.extend(std::iter::repeat('\t').take(depth));
    }

    #[inline]
    fn write_quoted(&mut self, s: &str) {
        self.output.push('"');
        self.output.push_str(&escape(s));
        self.output.push('"');
    }
}

/// Pending work for [`Serializer::write_node`].
enum Step<'a> {
    Open(NodeRef<'a>, usize),
    Close(usize),
}
