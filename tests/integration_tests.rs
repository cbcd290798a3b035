use kvtree::{
    from_path, from_reader, from_source, from_str, to_path, to_string, to_string_with_options,
    Error, IterSource, KvDocument, ReadOptions, WriteOptions,
};
use std::io::Write;

const HERO: &str = r#""Root"
{
    "name"    "hero"
    "stats"
    {
        "hp"  "100"
    }
}
"#;

#[test]
fn test_end_to_end_example() {
    let doc = from_str(HERO).unwrap();

    let root = doc.root();
    assert_eq!(root.len(), 1);
    let section = root.get("Root").unwrap();
    assert!(section.has_children());
    assert_eq!(section.get("name").and_then(|n| n.value()), Some("hero"));

    let hp = section.get("stats").unwrap().get("hp").unwrap();
    assert_eq!(hp.get_int(0), 100);

    let text = to_string(&doc);
    assert_eq!(
        text,
        "\"Root\"\n{\n\t\"name\"\t\"hero\"\n\t\"stats\"\n\t{\n\t\t\"hp\"\t\"100\"\n\t}\n}\n"
    );
    assert!(!text.contains("//"));
}

#[test]
fn test_round_trip_is_fixed_point() {
    let input = r#"
// weapons
"Weapons"
{
    "item" "sword"   // first
    "item" "bow"
    "quote" "say \"hi\""
    "sword"
    {
        "damage"  "7"
        "tags"    "sharp heavy"
    }
    "empty"   ""
}
"Version" "3"
"#;
    let first = from_str(input).unwrap();
    let text = to_string(&first);
    let second = from_str(&text).unwrap();

    assert_eq!(first, second);
    assert_eq!(to_string(&second), text);
}

#[test]
fn test_load_mutate_save_keeps_untouched_parts() {
    let mut doc = from_str(HERO).unwrap();
    let hp = doc
        .root()
        .get("Root")
        .and_then(|r| r.get("stats"))
        .and_then(|s| s.get("hp"))
        .unwrap()
        .id();
    doc.set_as(hp, 250);

    let reloaded = from_str(&to_string(&doc)).unwrap();
    let section = reloaded.root().get("Root").unwrap();
    assert_eq!(section.get("name").and_then(|n| n.value()), Some("hero"));
    assert_eq!(section.get("stats").unwrap().get("hp").unwrap().get_int(0), 250);
}

#[test]
fn test_line_by_line_source() {
    let lines = HERO.lines().map(str::to_string).collect::<Vec<_>>();
    let doc = from_source(IterSource::new(lines), ReadOptions::new()).unwrap();
    assert_eq!(doc, from_str(HERO).unwrap());
}

#[test]
fn test_from_reader_with_crlf() {
    let crlf = HERO.replace('\n', "\r\n");
    let doc = from_reader(crlf.as_bytes()).unwrap();
    assert_eq!(doc, from_str(HERO).unwrap());
}

#[test]
fn test_file_round_trip_names_root_after_stem() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("items.txt");
    let mut file = std::fs::File::create(&input).unwrap();
    file.write_all(HERO.as_bytes()).unwrap();
    drop(file);

    let doc = from_path(&input).unwrap();
    assert_eq!(doc.root().key(), "items");

    let output = dir.path().join("items.out.txt");
    to_path(&output, &doc).unwrap();
    let saved = std::fs::read_to_string(&output).unwrap();
    assert_eq!(saved, to_string(&doc));

    let reloaded = from_path(&output).unwrap();
    assert_eq!(reloaded.root().key(), "items.out");
    assert_eq!(
        reloaded.root().get("Root").unwrap(),
        doc.root().get("Root").unwrap()
    );
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = from_path(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_add_record_then_save() {
    let source = from_str(HERO).unwrap();
    let stats = source.root().get("Root").unwrap().get("stats").unwrap();

    let mut doc = KvDocument::new("copy");
    let root = doc.root_id();
    let copy = doc.add_record(root, stats);
    let hp = doc.node(copy).get("hp").unwrap().id();
    doc.set_value(hp, "1");

    assert_eq!(to_string(&doc), "\"stats\"\n{\n\t\"hp\"\t\"1\"\n}\n");
    assert_eq!(stats.get("hp").and_then(|n| n.value()), Some("100"));
}

#[test]
fn test_remove_all_then_save() {
    let mut doc = from_str("\"a\" \"1\"\n\"b\" \"2\"\n\"a\" \"3\"\n\"c\" \"4\"").unwrap();
    let root = doc.root_id();
    assert!(doc.remove_all(root, "a"));
    assert!(!doc.remove_all(root, "missing"));
    assert_eq!(to_string(&doc), "\"b\"\t\"2\"\n\"c\"\t\"4\"\n");
}

#[test]
fn test_include_root_round_trip() {
    let doc = from_str(HERO).unwrap();
    let text = to_string_with_options(&doc, WriteOptions::new().with_root(true));
    assert!(text.starts_with("\"root\"\n{\n\t\"Root\"\n"));

    let wrapped = from_str(&text).unwrap();
    assert_eq!(wrapped.root().get("root").unwrap().get("Root"), doc.root().get("Root"));
}

#[test]
fn test_serde_json_view() {
    let doc = from_str(
        "\"Root\" { \"name\" \"hero\" \"item\" \"sword\" \"item\" \"bow\" \"stats\" { \"hp\" \"100\" } }",
    )
    .unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "Root": {
                "name": "hero",
                "item": ["sword", "bow"],
                "stats": { "hp": "100" }
            }
        })
    );
}

#[test]
fn test_serde_json_absent_value_is_null() {
    let mut doc = KvDocument::new("root");
    let root = doc.root_id();
    doc.add_section(root, "placeholder");
    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(json, r#"{"placeholder":null}"#);
}
