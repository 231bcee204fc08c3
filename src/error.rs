//! Error types for TOML parsing and encoding.
//!
//! The codec never partially succeeds: the first problem found aborts the
//! operation and is returned as one of the types below.
//!
//! ## Error Categories
//!
//! - [`ParseError`]: malformed TOML text. Every variant carries the 1-based
//!   line on which the offending statement starts.
//! - [`EncodeError`]: a value tree that has no TOML rendering.
//! - [`Error`]: the umbrella type returned by the Serde-facing functions
//!   (`from_str`, `to_string`, ...), wrapping the two above plus I/O and
//!   custom Serde messages.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlite::{parse, ParseError};
//!
//! let err = parse("key = 1\nkey = 2").unwrap_err();
//! assert_eq!(err, ParseError::KeyRedefinition { line: 2, key: "key".to_string() });
//! assert_eq!(err.line(), 2);
//! ```

use std::fmt;
use thiserror::Error;

/// An error raised while parsing TOML text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The statement does not match any supported construct.
    #[error("Syntax error at line {line}: {msg}")]
    InvalidSyntax { line: usize, msg: String },

    /// The same key was assigned twice in one table.
    #[error("Key `{key}` redefined at line {line}")]
    KeyRedefinition { line: usize, key: String },

    /// A `[table]` header was opened a second time.
    #[error("Table `[{path}]` redefined at line {line}")]
    TableRedefinition { line: usize, path: String },

    /// A numeric-looking token that is not a valid TOML integer or float.
    #[error("Invalid number `{text}` at line {line}")]
    InvalidNumberFormat { line: usize, text: String },

    /// End of input inside a `"""` or `'''` block.
    #[error("Unterminated multi-line string starting at line {line}")]
    UnterminatedMultilineString { line: usize },

    /// End of input inside a multi-line array or inline table.
    #[error("Unterminated multi-line array starting at line {line}")]
    UnterminatedMultilineArray { line: usize },

    /// A statement that is neither a header nor a `key = value` pair.
    #[error("Invalid key/value pair at line {line}: `{text}`")]
    InvalidKeyValuePair { line: usize, text: String },

    /// A key path walks through a value that is not a table.
    #[error("Key path conflict at line {line}: `{segment}` is already defined as a non-table value")]
    KeyPathConflict { line: usize, segment: String },
}

impl ParseError {
    /// Creates an [`ParseError::InvalidSyntax`] error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::ParseError;
    ///
    /// let err = ParseError::syntax(3, "unexpected token");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(line: usize, msg: impl Into<String>) -> Self {
        ParseError::InvalidSyntax {
            line,
            msg: msg.into(),
        }
    }

    pub(crate) fn invalid_number(line: usize, text: &str) -> Self {
        ParseError::InvalidNumberFormat {
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn conflict(line: usize, segment: &str) -> Self {
        ParseError::KeyPathConflict {
            line,
            segment: segment.to_string(),
        }
    }

    /// The 1-based line of the statement that failed.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidSyntax { line, .. }
            | ParseError::KeyRedefinition { line, .. }
            | ParseError::TableRedefinition { line, .. }
            | ParseError::InvalidNumberFormat { line, .. }
            | ParseError::UnterminatedMultilineString { line }
            | ParseError::UnterminatedMultilineArray { line }
            | ParseError::InvalidKeyValuePair { line, .. }
            | ParseError::KeyPathConflict { line, .. } => *line,
        }
    }
}

/// An error raised while turning a value tree into TOML text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// The top-level value is not a table.
    #[error("TOML documents must have a table at the root, found {0}")]
    NonTableRoot(String),

    /// An array mixes tables with other values, or a map mixes numeric and
    /// string keys.
    #[error("Mixed table format at `{0}`")]
    MixedTableFormat(String),

    /// A value with no TOML representation (unit, `None`, out-of-range
    /// integers, malformed datetimes).
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// Message raised by a `Serialize` implementation.
    #[error("{0}")]
    Custom(String),
}

impl EncodeError {
    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        EncodeError::UnsupportedValueType(what.into())
    }
}

impl serde::ser::Error for EncodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        EncodeError::Custom(msg.to_string())
    }
}

/// Umbrella error for the Serde-facing entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Message raised by a `Deserialize` implementation or a failed conversion.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_reported_for_every_variant() {
        let errors = vec![
            ParseError::syntax(1, "x"),
            ParseError::KeyRedefinition {
                line: 1,
                key: "k".into(),
            },
            ParseError::TableRedefinition {
                line: 1,
                path: "t".into(),
            },
            ParseError::invalid_number(1, "1__0"),
            ParseError::UnterminatedMultilineString { line: 1 },
            ParseError::UnterminatedMultilineArray { line: 1 },
            ParseError::InvalidKeyValuePair {
                line: 1,
                text: "k".into(),
            },
            ParseError::conflict(1, "a"),
        ];
        for err in errors {
            assert_eq!(err.line(), 1);
            assert!(err.to_string().contains("line 1"), "{}", err);
        }
    }

    #[test]
    fn test_umbrella_conversions() {
        let err: Error = ParseError::UnterminatedMultilineArray { line: 4 }.into();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(
            err.to_string(),
            "Unterminated multi-line array starting at line 4"
        );

        let err: Error = EncodeError::NonTableRoot("integer".into()).into();
        assert!(matches!(err, Error::Encode(EncodeError::NonTableRoot(_))));
    }

    #[test]
    fn test_serde_custom_messages() {
        let err = <EncodeError as serde::ser::Error>::custom("bad field");
        assert_eq!(err, EncodeError::Custom("bad field".into()));

        let err = <Error as serde::de::Error>::custom("missing field `name`");
        assert_eq!(err.to_string(), "missing field `name`");
    }
}
