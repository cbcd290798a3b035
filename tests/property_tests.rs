//! Property-based tests for the load / save cycle and the typed accessors.
//!
//! Generated trees stay inside what the format round-trips: keys without
//! quotes or backslashes, values without backslashes, and no empty sections.

use kvtree::{escape, from_str, to_string, unescape, KvDocument, KvScalar, NodeId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Tree {
    Leaf(String, String),
    Section(String, Vec<Tree>),
}

fn key() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ ./{}-]{1,8}"
}

fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ ./{}\"\n\t-]{0,12}"
}

fn tree() -> impl Strategy<Value = Tree> {
    let leaf = (key(), value()).prop_map(|(k, v)| Tree::Leaf(k, v));
    leaf.prop_recursive(3, 32, 4, |inner| {
        (key(), prop::collection::vec(inner, 1..4)).prop_map(|(k, c)| Tree::Section(k, c))
    })
}

fn build(doc: &mut KvDocument, parent: NodeId, tree: &Tree) {
    match tree {
        Tree::Leaf(k, v) => {
            doc.add_leaf(parent, k.as_str(), v.as_str());
        }
        Tree::Section(k, children) => {
            let id = doc.add_section(parent, k.as_str());
            for child in children {
                build(doc, id, child);
            }
        }
    }
}

fn document(trees: &[Tree]) -> KvDocument {
    let mut doc = KvDocument::default();
    let root = doc.root_id();
    for tree in trees {
        build(&mut doc, root, tree);
    }
    doc
}

proptest! {
    #[test]
    fn prop_save_then_load_is_identity(trees in prop::collection::vec(tree(), 0..6)) {
        let doc = document(&trees);
        let text = to_string(&doc);
        let reloaded = from_str(&text).unwrap();
        prop_assert_eq!(&reloaded, &doc);
        prop_assert_eq!(to_string(&reloaded), text);
    }

    #[test]
    fn prop_repeated_keys_keep_order(values in prop::collection::vec("[a-z0-9 ]{0,6}", 1..8)) {
        let mut doc = KvDocument::default();
        let root = doc.root_id();
        for v in &values {
            doc.add_leaf(root, "item", v.as_str());
        }
        let reloaded = from_str(&to_string(&doc)).unwrap();
        let seen = reloaded
            .root()
            .get_all("item")
            .unwrap()
            .map(|n| n.value().unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        prop_assert_eq!(seen, values);
    }

    #[test]
    fn prop_escape_is_inverted_by_unescape(s in "\\PC*") {
        let escaped = escape(&s);
        prop_assert_eq!(unescape(&escaped), s.as_str());
    }

    #[test]
    fn prop_parser_never_panics(s in "\\PC{0,64}") {
        if let Err(err) = from_str(&s) {
            prop_assert!(err.line().is_some());
        }
    }

    #[test]
    fn prop_integers_survive_set_as(n in any::<i64>()) {
        let mut doc = KvDocument::default();
        let root = doc.root_id();
        let id = doc.add_section(root, "n");
        doc.set_as(id, n);
        prop_assert_eq!(doc.node(id).get_long(0), n);
    }

    #[test]
    fn prop_prefixed_hex_reads_as_bits(n in any::<i32>()) {
        prop_assert_eq!(i32::parse_kv(&format!("0x{n:x}")), Some(n));
    }

    #[test]
    fn prop_floats_keep_three_decimals(x in -1.0e6f64..1.0e6) {
        let text = x.format_kv();
        let fraction = text.split('.').nth(1).unwrap_or_default();
        prop_assert!((1..=3).contains(&fraction.len()), "{}", text);
        let parsed = f64::parse_kv(&text).unwrap();
        prop_assert!((parsed - x).abs() <= 0.000_6, "{} -> {}", x, text);
    }

    #[test]
    fn prop_set_by_level_then_get(
        fields in prop::collection::vec("[a-z]{1,5}", 1..5),
        level in 1usize..8,
        text in "[a-z]{1,5}",
    ) {
        let mut doc = KvDocument::default();
        let root = doc.root_id();
        let id = doc.add_leaf(root, "cost", fields.join(" "));
        doc.set_string_by_level(id, level, &text);

        let node = doc.node(id);
        prop_assert_eq!(node.get_string_by_level(level, None), Some(text.as_str()));
        prop_assert_eq!(node.levels(), fields.len().max(level) - 1);
    }
}
