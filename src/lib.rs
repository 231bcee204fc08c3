//! # serde_tomlite
//!
//! A small TOML codec: a parser from TOML text to a [`Document`] tree and an
//! encoder from a tree back to deterministic TOML text, with Serde support
//! on top.
//!
//! ## Key Features
//!
//! - **Round-trip safe**: `parse(encode(doc))` yields a document equal to
//!   `doc` for every document `parse` produces
//! - **Strict**: redefined keys and tables, malformed numbers and unterminated
//!   strings are errors carrying the line they start on
//! - **Deterministic output**: keys are sorted unless told otherwise
//! - **Serde Compatible**: `#[derive(Serialize, Deserialize)]` types go
//!   straight to and from TOML text
//!
//! ## Quick Start
//!
//! ### Documents
//!
//! ```rust
//! use serde_tomlite::{encode, parse, Node};
//!
//! let doc = parse(
//!     r#"
//! [[plugins]]
//! name = "tmux-sensible"
//! url = "https://github.com/tmux-plugins/tmux-sensible"
//!
//! [[plugins]]
//! name = "tmux-resurrect"
//! "#,
//! )
//! .unwrap();
//!
//! let plugins = doc.get("plugins").and_then(Node::as_array).unwrap();
//! assert_eq!(plugins.len(), 2);
//!
//! let text = encode(&doc).unwrap();
//! assert_eq!(parse(&text).unwrap(), doc);
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tomlite::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Lock {
//!     version: u32,
//!     plugins: Vec<Entry>,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Entry {
//!     name: String,
//!     commit: Option<String>,
//! }
//!
//! let lock = Lock {
//!     version: 1,
//!     plugins: vec![Entry { name: "tpm".to_string(), commit: None }],
//! };
//!
//! let text = to_string(&lock).unwrap();
//! assert_eq!(text, "version = 1\n\n[[plugins]]\nname = \"tpm\"");
//!
//! let back: Lock = from_str(&text).unwrap();
//! assert_eq!(back, lock);
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: `trace`
//! for each statement and header, `debug` for a summary of each parse and
//! encode. No logger is installed.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - a struct round trip through TOML text
//! - **`lock_file.rs`** - a typed lock file through Serde
//! - **`dynamic_values.rs`** - building and walking `Node` trees
//! - **`custom_options.rs`** - `EncodeOptions` layouts
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod encoder;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod ser;
pub mod value;

mod key;
mod literal;
mod scanner;

pub use de::NodeDeserializer;
pub use encoder::{encode, encode_value, encode_with_options};
pub use error::{EncodeError, Error, ParseError, Result};
pub use map::Table;
pub use options::EncodeOptions;
pub use parser::parse;
pub use ser::NodeSerializer;
pub use value::{Document, Node};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a TOML string.
///
/// The value must serialize to a table (a struct or a map).
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "x = 1\ny = 2");
/// ```
///
/// # Errors
///
/// Returns [`Error::Encode`] if the value has no TOML form, e.g. a bare
/// number at the root or a `None` inside an array.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a TOML string laid out with
/// [`EncodeOptions::pretty`].
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::pretty())
}

/// Serialize any `T: Serialize` to a TOML string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{to_string_with_options, EncodeOptions};
/// use std::collections::BTreeMap;
///
/// let mut ports = BTreeMap::new();
/// ports.insert("web", vec![80, 443]);
///
/// let options = EncodeOptions::new().with_array_spacing(true);
/// assert_eq!(to_string_with_options(&ports, &options).unwrap(), "web = [ 80, 443 ]");
/// ```
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let node = to_value(value)?;
    Ok(encoder::encode_node(&node, options)?)
}

/// Convert any `T: Serialize` to a [`Node`].
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::to_value;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_table());
/// ```
///
/// # Errors
///
/// Returns [`EncodeError`] for values TOML cannot hold.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> std::result::Result<Node, EncodeError>
where
    T: ?Sized + Serialize,
{
    ser::to_node(value)
}

/// Serialize any `T: Serialize` as TOML into a writer.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x = 1\ny = 2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from TOML text.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if the text is not valid TOML, or a custom error
/// if the document does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_document(parse(s)?)
}

/// Deserialize an instance of type `T` from an already parsed document.
///
/// # Errors
///
/// Returns an error if the document does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_document<T>(document: Document) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(NodeDeserializer::new(Node::Table(document)))
}

/// Deserialize an instance of type `T` from an I/O stream of TOML.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// TOML, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of TOML text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOML, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        home: Option<Point>,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            home: Some(Point { x: 1, y: -2 }),
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let toml = to_string(&point).unwrap();
        let point_back: Point = from_str(&toml).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let toml = to_string(&user()).unwrap();
        assert_eq!(
            toml,
            "active = true\nid = 123\nname = \"Alice\"\ntags = [\"admin\", \"user\"]\n\n[home]\nx = 1\ny = -2"
        );
        let user_back: User = from_str(&toml).unwrap();
        assert_eq!(user_back, user());
    }

    #[test]
    fn test_pretty_printing() {
        let toml = to_string_pretty(&user()).unwrap();
        assert!(toml.ends_with("\n"));
        assert!(toml.contains("\n  x = 1\n"));
        let user_back: User = from_str(&toml).unwrap();
        assert_eq!(user_back, user());
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value.get("x"), Some(&Node::Integer(1)));
        assert_eq!(value.get("y"), Some(&Node::Integer(2)));
    }

    #[test]
    fn test_non_table_root() {
        let err = to_string(&vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            Error::Encode(EncodeError::NonTableRoot("array".to_string()))
        );
    }

    #[test]
    fn test_maps_round_trip() {
        let mut scores = BTreeMap::new();
        scores.insert("alice".to_string(), 1.5);
        scores.insert("bob".to_string(), 2.0);
        let toml = to_string(&scores).unwrap();
        assert_eq!(toml, "alice = 1.5\nbob = 2.0");
        let back: BTreeMap<String, f64> = from_str(&toml).unwrap();
        assert_eq!(back, scores);
    }

    #[test]
    fn test_from_slice_and_reader() {
        let point: Point = from_slice(b"x = 3\ny = 4").unwrap();
        assert_eq!(point, Point { x: 3, y: 4 });
        assert!(matches!(
            from_slice::<Point>(&[0xff, 0xfe]),
            Err(Error::Custom(_))
        ));

        let point: Point = from_reader(std::io::Cursor::new("x = 5\ny = 6")).unwrap();
        assert_eq!(point, Point { x: 5, y: 6 });
    }

    #[test]
    fn test_parse_errors_surface() {
        let err = from_str::<Point>("x = 1\nx = 2").unwrap_err();
        assert_eq!(
            err,
            Error::Parse(ParseError::KeyRedefinition {
                line: 2,
                key: "x".to_string()
            })
        );
    }
}
