//! KV Text Format Reference
//!
//! This module documents the text format as implemented by this library. It
//! contains no code.
//!
//! # Overview
//!
//! A KV document is a tree. Every node has a quoted key and either a quoted
//! scalar value (a *leaf*) or a braced block of child nodes (a *section*).
//!
//! ```text
//! "Root"
//! {
//!     "name"    "hero"
//!     "stats"
//!     {
//!         "hp"  "100"
//!     }
//! }
//! ```
//!
//! # Grammar
//!
//! ```text
//! document   := child*
//! child      := section | leaf
//! section    := '"' key '"' ws* '{' child* '}'
//! leaf       := '"' key '"' ws+ '"' value '"'
//! key, value := any characters except an unescaped '"'
//! comment    := '//' up to the end of the line
//! ```
//!
//! Indentation is not significant on input. The serializer emits one tab per
//! depth level and a tab between a leaf's key and value.
//!
//! # Keys
//!
//! - Keys may repeat among siblings; every occurrence is kept, in order
//! - Looking a key up returns the first node added under it
//! - Children iterate key group by key group, in the order each key first
//!   appeared
//!
//! # Escaping
//!
//! The only escape is `\"` for a literal quote. Backslashes, tabs and
//! newlines are stored as-is. A value may span several lines; the newline
//! becomes part of the value.
//!
//! # Comments
//!
//! `//` starts a comment that runs to the end of the line. Comments are
//! recognised only between tokens, never inside quotes, and are not kept
//! when a document is written back.
//!
//! # Known Quirks
//!
//! These behaviours are kept for compatibility with existing files:
//!
//! | Input | Behaviour |
//! |-------|-----------|
//! | `"a\"b" "v"` | A key's closing quote is the first `"` *not followed* by `\`, so the key reads as `a\`. Quotes round-trip in values only. |
//! | `"a" //` with nothing after the slashes | Before a value, a comment is only seen once its second slash is not the last character of the buffer; the line after it is swallowed together with the comment. |
//! | `"v\"` | A value's closing quote is the first `"` *not preceded* by `\`, so values cannot end with a backslash. |
//! | `"s" { }` | An empty section is indistinguishable from a leaf without a value and is written back as `"s"\t""`. |
//! | `"k"` as the very last bytes of input | A key's closing quote needs one byte of lookahead, so a key at the very end of input is dropped. |
//! | Truncated input | Incomplete trailing keys, values and unclosed sections are accepted; only complete nodes are kept. |
//! | A stray `}` | Closing the document root is the one structural error, reported with its line number. |
//! | `"1e5"` read as an integer | Integer reads try decimal first and then hexadecimal without requiring `0x`, so `1e5` is `485`. Float reads see `100000`. |
