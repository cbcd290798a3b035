//! Load a document, read and change a few values, and write it back.
//!
//! Run with: cargo run --example simple

use kvtree::{from_str, to_string};
use std::error::Error;

const INPUT: &str = r#"
// A character sheet
"Root"
{
    "name"    "hero"
    "item"    "sword"
    "item"    "shield"
    "stats"
    {
        "hp"     "100"
        "speed"  "1.25"
    }
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = from_str(INPUT)?;

    let root = doc.root().get("Root").ok_or("missing Root section")?;
    println!("name:  {}", root.get("name").and_then(|n| n.value()).unwrap_or("?"));
    for item in root.get_all("item").into_iter().flatten() {
        println!("item:  {}", item.value().unwrap_or_default());
    }

    let stats = root.get("stats").ok_or("missing stats section")?;
    let hp = stats.get("hp").ok_or("missing hp")?;
    let speed = stats.get("speed").ok_or("missing speed")?;
    println!("hp:    {}", hp.get_int(0));
    println!("speed: {}", speed.get_double(1.0));

    let (hp, speed) = (hp.id(), speed.id());
    doc.set_as(hp, 80);
    doc.set_as(speed, 1.5_f64 / 3.0);

    // Comments are dropped and layout is normalised on save.
    println!("\n{}", to_string(&doc));

    // Loading the saved text gives the same tree back.
    assert_eq!(from_str(&to_string(&doc))?, doc);
    println!("✓ Round-trip successful");

    Ok(())
}
