//! Error types for KV document parsing and persistence.
//!
//! The format itself is lenient: the only structural failure the parser
//! reports is a closing brace with no open section to close. Everything else
//! that can go wrong comes from the host (missing files, unreadable input).
//!
//! ## Error Categories
//!
//! - **Structural Errors**: a `}` with no enclosing section, with the line number
//! - **Missing Input**: the path handed to [`crate::from_path`] does not exist
//! - **I/O Errors**: reading or writing failed
//!
//! ## Examples
//!
//! ```rust
//! use kvtree::{from_str, Error};
//!
//! let result = from_str("\"a\" \"1\"\n}\n");
//! assert!(matches!(result, Err(Error::UnexpectedEndOfSection { line: 2 })));
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur while loading or saving a KV document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The input path does not exist
    #[error("input does not exist: {0}")]
    NotFound(String),

    /// A closing brace was found while no section was open
    #[error("unexpected end of section at line {line}: no open section to close")]
    UnexpectedEndOfSection { line: usize },
}

impl Error {
    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a missing-input error for `path`.
    pub fn not_found(path: &str) -> Self {
        Error::NotFound(path.to_string())
    }

    /// Creates the structural error raised when `}` closes the document root.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvtree::Error;
    ///
    /// let err = Error::unexpected_end_of_section(7);
    /// assert!(err.to_string().contains("line 7"));
    /// ```
    pub fn unexpected_end_of_section(line: usize) -> Self {
        Error::UnexpectedEndOfSection { line }
    }

    /// Line number attached to the error, if it came from the parser.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnexpectedEndOfSection { line } => Some(*line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_only_for_structural_errors() {
        assert_eq!(Error::unexpected_end_of_section(3).line(), Some(3));
        assert_eq!(Error::io("boom").line(), None);
        assert_eq!(Error::not_found("a.kv").line(), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(Error::io("denied").to_string(), "IO error: denied");
        assert_eq!(
            Error::not_found("missing.kv").to_string(),
            "input does not exist: missing.kv"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(Error::from(io), Error::Io("nope".to_string()));
    }
}
