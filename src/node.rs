//! Read access to the nodes of a [`KvDocument`].
//!
//! Nodes live inside their document and are addressed by [`NodeId`]. A
//! [`NodeRef`] pairs an id with a shared borrow of the document and is the
//! type used to walk a tree: look children up by key, iterate them, climb to
//! the parent, or read the scalar value.
//!
//! ## Sections and Leaves
//!
//! A node with at least one child is a *section*; its value always reads as
//! `None`, even if a scalar was stored on it earlier. A node without children
//! is a *leaf* and reports whatever scalar it holds.
//!
//! ```rust
//! use kvtree::from_str;
//!
//! let doc = from_str("\"Root\"\n{\n\t\"name\"\t\"hero\"\n}\n").unwrap();
//! let section = doc.root().get("Root").unwrap();
//! assert!(section.has_children());
//! assert_eq!(section.value(), None);
//! assert_eq!(section.get("name").and_then(|n| n.value()), Some("hero"));
//! ```
//!
//! ## Serde
//!
//! `NodeRef` implements [`serde::Serialize`]: sections become maps keyed by
//! child key, a key shared by several siblings becomes a sequence, and leaves
//! become strings (or `null` when no value is set).
//! Serde drives nesting through the call stack, one level per section, so
//! this view suits documents of ordinary depth; [`crate::to_string`] has no
//! such limit.

use crate::document::Slot;
use crate::escape::escape;
use crate::map::Ids;
use crate::KvDocument;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Handle to a node inside a [`KvDocument`].
///
/// Ids stay valid until the node is removed. The arena cell may then hold a
/// new node, but that node gets a new generation, so the old id never
/// resolves again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        NodeId { index, generation }
    }

    /// Arena index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// How many earlier nodes occupied the same arena cell.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// Shared view of one node of a document.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a KvDocument,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(doc: &'a KvDocument, id: NodeId) -> Self {
        NodeRef { doc, id }
    }

    fn slot(&self) -> &'a Slot {
        self.doc.slot(self.id)
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The document this node belongs to.
    #[must_use]
    pub fn document(&self) -> &'a KvDocument {
        self.doc
    }

    #[must_use]
    pub fn key(&self) -> &'a str {
        &self.slot().key
    }

    /// The scalar value, or `None` for sections and for leaves without a value.
    #[must_use]
    pub fn value(&self) -> Option<&'a str> {
        let slot = self.slot();
        if slot.children.is_empty() {
            slot.value.as_deref()
        } else {
            None
        }
    }

    /// The stored scalar, ignoring whether children currently hide it.
    #[must_use]
    pub fn raw_value(&self) -> Option<&'a str> {
        self.slot().value.as_deref()
    }

    /// The key as written on disk.
    #[must_use]
    pub fn escaped_key(&self) -> Cow<'a, str> {
        escape(self.key())
    }

    /// The value as written on disk.
    #[must_use]
    pub fn escaped_value(&self) -> Option<Cow<'a, str>> {
        self.value().map(escape)
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.slot().parent.map(|id| NodeRef::new(self.doc, id))
    }

    /// Returns `true` for the node the document was created with.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.id == self.doc.root_id()
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.slot().children.is_empty()
    }

    /// Number of direct children across all keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slot().children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot().children.is_empty()
    }

    /// Returns the first child ever added under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<NodeRef<'a>> {
        self.slot()
            .children
            .first(key)
            .map(|id| NodeRef::new(self.doc, id))
    }

    /// Returns every child added under `key`, in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvtree::KvDocument;
    ///
    /// let mut doc = KvDocument::new("root");
    /// let root = doc.root_id();
    /// for v in ["1", "2", "3"] {
    ///     doc.add_leaf(root, "x", v);
    /// }
    /// let values: Vec<_> = doc.root().get_all("x").unwrap().filter_map(|n| n.value()).collect();
    /// assert_eq!(values, vec!["1", "2", "3"]);
    /// assert!(doc.root().get_all("y").is_none());
    /// ```
    #[must_use]
    pub fn get_all(&self, key: &str) -> Option<Siblings<'a>> {
        self.slot().children.group(key).map(|ids| Siblings {
            doc: self.doc,
            ids: ids.iter(),
        })
    }

    /// Iterates direct children: key groups in first-insertion order, then
    /// siblings within a group in insertion order.
    pub fn children(&self) -> Children<'a> {
        Children {
            doc: self.doc,
            ids: self.slot().children.ids(),
        }
    }

    /// Distinct child keys, in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.slot().children.keys().map(String::as_str)
    }

    /// Walks parents up to the document root, starting with this node's parent.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Number of parents between this node and the document root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }
}

impl<'a> IntoIterator for NodeRef<'a> {
    type Item = NodeRef<'a>;
    type IntoIter = Children<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.children()
    }
}

/// Iterator over the direct children of a node. See [`NodeRef::children`].
pub struct Children<'a> {
    doc: &'a KvDocument,
    ids: Ids<'a>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| NodeRef::new(self.doc, *id))
    }
}

/// Iterator over one sibling group. See [`NodeRef::get_all`].
pub struct Siblings<'a> {
    doc: &'a KvDocument,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| NodeRef::new(self.doc, *id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Siblings<'_> {}

impl DoubleEndedIterator for Siblings<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|id| NodeRef::new(self.doc, *id))
    }
}

/// Structural equality: same key, same observable value, equal children in order.
impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(*self, *other)];
        while let Some((a, b)) = pending.pop() {
            if a.key() != b.key() || a.value() != b.value() || a.len() != b.len() {
                return false;
            }
            pending.extend(a.children().zip(b.children()));
        }
        true
    }
}

/// Lists the subtree in document order, one entry per node.
impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut pending = vec![(0, *self)];
        while let Some((depth, node)) = pending.pop() {
            list.entry(&Entry { depth, node });
            let first = pending.len();
            pending.extend(node.children().map(|child| (depth + 1, child)));
            pending[first..].reverse();
        }
        list.finish()
    }
}

struct Entry<'a> {
    depth: usize,
    node: NodeRef<'a>,
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.node.has_children() {
            f.debug_struct("Section")
                .field("depth", &self.depth)
                .field("key", &self.node.key())
                .field("len", &self.node.len())
                .finish()
        } else {
            f.debug_struct("Leaf")
                .field("depth", &self.depth)
                .field("key", &self.node.key())
                .field("value", &self.node.value())
                .finish()
        }
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !self.has_children() {
            return match self.value() {
                Some(value) => serializer.serialize_str(value),
                None => serializer.serialize_none(),
            };
        }

        let slot = self.slot();
        let mut map = serializer.serialize_map(Some(slot.children.key_count()))?;
        for (key, group) in slot.children.groups() {
            match group.as_slice() {
                [only] => map.serialize_entry(key, &NodeRef::new(self.doc, *only))?,
                many => map.serialize_entry(
                    key,
                    &Group {
                        doc: self.doc,
                        ids: many,
                    },
                )?,
            }
        }
        map.end()
    }
}

struct Group<'a> {
    doc: &'a KvDocument,
    ids: &'a [NodeId],
}

impl Serialize for Group<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for id in self.ids {
            seq.serialize_element(&NodeRef::new(self.doc, *id))?;
        }
        seq.end()
    }
}
