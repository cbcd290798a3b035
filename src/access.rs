//! Typed reads and writes of scalar values.
//!
//! Values are always stored as strings. [`KvScalar`] describes how a Rust type
//! is read from and written to that string, and [`NodeRef`] / [`KvDocument`]
//! expose best-effort accessors on top of it: a read never fails, it falls
//! back to the caller's default when the value is absent or does not parse.
//!
//! ## Numbers
//!
//! - Integers accept decimal (`42`, `-7`) and hexadecimal (`ff`, `0x1F`) forms;
//!   hex is tried only when decimal fails, so `1e5` reads as `0x1e5`
//! - Floats and decimals accept decimal and scientific forms (`1.5`, `2e3`)
//! - Floats and decimals are written with one to three fraction digits
//!
//! ```rust
//! use kvtree::from_str;
//!
//! let doc = from_str("\"hp\" \"100\"\n\"mask\" \"0xff\"\n\"speed\" \"1.5e1\"\n").unwrap();
//! let root = doc.root();
//! assert_eq!(root.get("hp").unwrap().get_int(0), 100);
//! assert_eq!(root.get("mask").unwrap().get_or(0u8), 255);
//! assert_eq!(root.get("speed").unwrap().get_float(0.0), 15.0);
//! assert_eq!(root.get("speed").unwrap().get_or(0i32), 0);
//! ```
//!
//! ## Levels
//!
//! A value may pack several space-separated fields, addressed from 1:
//!
//! ```rust
//! use kvtree::KvDocument;
//!
//! let mut doc = KvDocument::new("root");
//! let root = doc.root_id();
//! let cost = doc.add_leaf(root, "cost", "a");
//! doc.set_string_by_level(cost, 3, "c");
//!
//! let node = doc.node(cost);
//! assert_eq!(node.value(), Some("a a c"));
//! assert_eq!(node.get_string_by_level(2, None), Some("a"));
//! assert_eq!(node.get_string_by_level(10, None), Some("c"));
//! assert_eq!(node.levels(), 2);
//! ```

use crate::{KvDocument, NodeId, NodeRef};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// A type that can be stored in a node's string value.
///
/// Enums implement it through [`kv_enum!`](crate::kv_enum).
pub trait KvScalar: Sized {
    /// Parses `text`, returning `None` when it is not a valid representation.
    fn parse_kv(text: &str) -> Option<Self>;

    /// Canonical text form.
    fn format_kv(&self) -> String;
}

macro_rules! impl_integer {
    ($($int:ty => $bits:ty),* $(,)?) => {
        $(
            impl KvScalar for $int {
                fn parse_kv(text: &str) -> Option<Self> {
                    let text = text.trim();
                    text.parse::<$int>().ok().or_else(|| {
                        let digits = text
                            .strip_prefix("0x")
                            .or_else(|| text.strip_prefix("0X"))
                            .unwrap_or(text);
                        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                            return None;
                        }
                        <$bits>::from_str_radix(digits, 16).ok().map(|bits| bits as $int)
                    })
                }

                fn format_kv(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_integer! {
    u8 => u8,
    i8 => u8,
    u16 => u16,
    i16 => u16,
    u32 => u32,
    i32 => u32,
    u64 => u64,
    i64 => u64,
    u128 => u128,
    i128 => u128,
    usize => usize,
    isize => usize,
}

macro_rules! impl_float {
    ($($float:ty),*) => {
        $(
            impl KvScalar for $float {
                fn parse_kv(text: &str) -> Option<Self> {
                    text.trim().parse::<$float>().ok()
                }

                fn format_kv(&self) -> String {
                    if self.is_finite() {
                        trim_fraction(format!("{:.3}", self))
                    } else {
                        self.to_string()
                    }
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl KvScalar for Decimal {
    fn parse_kv(text: &str) -> Option<Self> {
        let text = text.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }

    fn format_kv(&self) -> String {
        let rounded = self.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
        trim_fraction(rounded.to_string())
    }
}

impl KvScalar for String {
    fn parse_kv(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn format_kv(&self) -> String {
        self.clone()
    }
}

/// Keeps between one and three fraction digits (`0.0##`).
fn trim_fraction(mut text: String) -> String {
    match text.find('.') {
        Some(dot) => {
            let keep = text.trim_end_matches('0').len().max(dot + 2);
            text.truncate(keep);
        }
        None => text.push_str(".0"),
    }
    if text == "-0.0" {
        text.remove(0);
    }
    text
}

impl<'a> NodeRef<'a> {
    /// The value as a string; `None` for sections.
    #[must_use]
    pub fn get_string(&self) -> Option<&'a str> {
        self.value()
    }

    /// Parses the value as `T`, or `None` if it is absent or malformed.
    #[must_use]
    pub fn parse<T: KvScalar>(&self) -> Option<T> {
        self.value().and_then(T::parse_kv)
    }

    /// Parses the value as `T`, falling back to `default`.
    #[must_use]
    pub fn get_or<T: KvScalar>(&self, default: T) -> T {
        self.parse().unwrap_or(default)
    }

    #[must_use]
    pub fn get_int(&self, default: i32) -> i32 {
        self.get_or(default)
    }

    #[must_use]
    pub fn get_long(&self, default: i64) -> i64 {
        self.get_or(default)
    }

    #[must_use]
    pub fn get_float(&self, default: f32) -> f32 {
        self.get_or(default)
    }

    #[must_use]
    pub fn get_double(&self, default: f64) -> f64 {
        self.get_or(default)
    }

    #[must_use]
    pub fn get_decimal(&self, default: Decimal) -> Decimal {
        self.get_or(default)
    }

    /// Number of level separators in the value: field count minus one.
    #[must_use]
    pub fn levels(&self) -> usize {
        self.value().map_or(0, |value| value.matches(' ').count())
    }

    /// Field `level` (1-based) of a space-packed value.
    ///
    /// Level `0` and absent values return `default`; levels past the last
    /// field return the last field.
    #[must_use]
    pub fn get_string_by_level(&self, level: usize, default: Option<&'a str>) -> Option<&'a str> {
        if level == 0 {
            return default;
        }
        let Some(value) = self.value() else {
            return default;
        };
        value
            .split(' ')
            .nth(level - 1)
            .or_else(|| value.rsplit(' ').next())
    }

    /// Field `level` parsed as `T`, falling back to `default`.
    #[must_use]
    pub fn get_by_level<T: KvScalar>(&self, level: usize, default: T) -> T {
        self.get_string_by_level(level, None)
            .and_then(T::parse_kv)
            .unwrap_or(default)
    }
}

impl KvDocument {
    /// Stores the canonical text form of `value`, notifying the listener.
    pub fn set_as<T: KvScalar>(&mut self, id: NodeId, value: T) {
        self.set_value(id, value.format_kv());
    }

    /// Replaces field `level` (1-based) of a space-packed value.
    ///
    /// Level `0` does nothing. An empty or absent value becomes `text` alone.
    /// Going past the last field repeats the current last field in every gap.
    pub fn set_string_by_level(&mut self, id: NodeId, level: usize, text: &str) {
        if level == 0 {
            return;
        }
        let packed = match self.node(id).value() {
            None | Some("") => text.to_string(),
            Some(current) => {
                let mut fields: Vec<&str> = current.split(' ').collect();
                if level <= fields.len() {
                    fields[level - 1] = text;
                } else {
                    let last = fields[fields.len() - 1];
                    fields.resize(level - 1, last);
                    fields.push(text);
                }
                fields.join(" ")
            }
        };
        self.set_value(id, packed);
    }

    /// Stores `value` at field `level` of a space-packed value.
    pub fn set_by_level<T: KvScalar>(&mut self, id: NodeId, level: usize, value: T) {
        self.set_string_by_level(id, level, &value.format_kv());
    }
}
