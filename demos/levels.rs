//! Space-packed "level" values: one field per upgrade level.
//!
//! Run with: cargo run --example levels

use kvtree::{kv, kv_enum, to_string};

kv_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Element {
        Fire,
        Ice,
        Storm,
    }
}

fn main() {
    let mut doc = kv!({
        "Tower": {
            "cost": "100 150 225",
            "element": "fire ice"
        }
    });

    let tower = doc.root().get("Tower").map(|t| t.id());
    let Some(tower) = tower else { return };

    let tower_ref = doc.node(tower);
    let (Some(cost), Some(element)) = (tower_ref.get("cost"), tower_ref.get("element")) else {
        return;
    };

    for level in 1..=4 {
        println!(
            "level {level}: cost {:>4}, element {:?}",
            cost.get_by_level(level, 0u32),
            element.get_by_level(level, Element::Fire),
        );
    }

    let (cost, element) = (cost.id(), element.id());

    // Writing past the last field repeats the last field in the gaps.
    doc.set_by_level(cost, 5, 500u32);
    doc.set_by_level(element, 3, Element::Storm);

    println!("\n{}", to_string(&doc));
}
