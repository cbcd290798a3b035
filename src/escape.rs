//! Quote escaping for keys and values.
//!
//! The format has exactly one escape: a `"` inside a key or value is written as
//! `\"`. Backslashes, tabs and newlines pass through untouched.

use std::borrow::Cow;

/// Escapes every `"` in `input` as `\"`.
///
/// Borrows when there is nothing to escape.
///
/// # Examples
///
/// ```rust
/// use kvtree::escape;
///
/// assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(escape(r"C:\path"), r"C:\path");
/// ```
#[must_use]
pub fn escape(input: &str) -> Cow<'_, str> {
    if input.contains('"') {
        Cow::Owned(input.replace('"', "\\\""))
    } else {
        Cow::Borrowed(input)
    }
}

/// Decodes every `\"` in `input` back to `"`.
///
/// # Examples
///
/// ```rust
/// use kvtree::unescape;
///
/// assert_eq!(unescape(r#"say \"hi\""#), r#"say "hi""#);
/// ```
#[must_use]
pub fn unescape(input: &str) -> Cow<'_, str> {
    if input.contains("\\\"") {
        Cow::Owned(input.replace("\\\"", "\""))
    } else {
        Cow::Borrowed(input)
    }
}
