//! Feeding the parser one line at a time from a custom source.
//!
//! Run with: cargo run --example line_source

use kvtree::{from_source, LineSource, ReadOptions, Result};

/// Hands out lines from a fixed script, logging each request.
struct Script {
    lines: Vec<&'static str>,
    next: usize,
}

impl LineSource for Script {
    fn is_exhausted(&mut self) -> Result<bool> {
        Ok(self.next >= self.lines.len())
    }

    fn next_line(&mut self, buf: &mut String) -> Result<()> {
        if let Some(line) = self.lines.get(self.next) {
            println!("read line {}: {line:?}", self.next + 1);
            buf.push_str(line);
            self.next += 1;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let source = Script {
        lines: vec![
            "\"Root\" // tokens may be split",
            "{ \"motto\" \"first line",
            "second line\"",
            "}",
        ],
        next: 0,
    };

    let doc = from_source(source, ReadOptions::new().with_root_name("script"))?;
    let motto = doc
        .root()
        .get("Root")
        .and_then(|r| r.get("motto"))
        .and_then(|m| m.value());

    println!("\nroot: {}", doc.root().key());
    println!("motto: {motto:?}");

    Ok(())
}
