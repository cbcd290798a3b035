use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kvtree::{from_reader, from_str, to_string, KvDocument};

fn inventory(items: usize) -> KvDocument {
    let mut doc = KvDocument::default();
    let root = doc.root_id();
    let section = doc.add_section(root, "Items");
    for i in 0..items {
        let item = doc.add_section(section, format!("item_{i}"));
        doc.add_leaf(item, "name", format!("Item {i}"));
        doc.add_leaf(item, "price", format!("{}.99", i % 100));
        doc.add_leaf(item, "tag", "common");
        doc.add_leaf(item, "tag", "tradable");
        let stats = doc.add_section(item, "stats");
        doc.add_leaf(stats, "damage", "5 7 9 12");
        doc.add_leaf(stats, "weight", format!("{}", i % 20));
    }
    doc
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&inventory(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_parse_reader(c: &mut Criterion) {
    let text = to_string(&inventory(100));

    c.bench_function("parse_reader_100", |b| {
        b.iter(|| from_reader(black_box(text.as_bytes())))
    });
}

fn benchmark_parse_commented(c: &mut Criterion) {
    let text = to_string(&inventory(100))
        .lines()
        .map(|line| format!("{line} // note\n"))
        .collect::<String>();

    c.bench_function("parse_commented_100", |b| {
        b.iter(|| from_str(black_box(&text)))
    });
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [10, 100, 1000].iter() {
        let doc = inventory(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_lookup(c: &mut Criterion) {
    let doc = inventory(1000);
    let items = doc.root().get("Items").unwrap();

    c.bench_function("lookup_by_key", |b| {
        b.iter(|| {
            items
                .get(black_box("item_500"))
                .and_then(|item| item.get("stats"))
                .and_then(|stats| stats.get("damage"))
                .map(|damage| damage.get_by_level(3, 0i32))
        })
    });
}

fn benchmark_deep_copy(c: &mut Criterion) {
    let doc = inventory(100);

    c.bench_function("clone_document_100", |b| b.iter(|| black_box(&doc).clone()));
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_parse_reader,
    benchmark_parse_commented,
    benchmark_serialize,
    benchmark_lookup,
    benchmark_deep_copy
);
criterion_main!(benches);
