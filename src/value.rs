//! Dynamic value representation for TOML data.
//!
//! [`Node`] is the tagged union produced by [`parse`](crate::parse) and
//! consumed by [`encode`](crate::encode). A [`Document`] is the root table.
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_tomlite::{toml, Node};
//!
//! let boolean = Node::from(true);
//! let number = Node::from(42);
//! let text = Node::from("hello");
//!
//! let table = toml!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(table.is_table());
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use serde_tomlite::Node;
//! use std::convert::TryFrom;
//!
//! let value = Node::from(42);
//! assert_eq!(value.as_integer(), Some(42));
//!
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::Table;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A parsed TOML document: the root table.
pub type Document = Table;

/// Any TOML value.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::Node;
///
/// let num = Node::Integer(42);
/// let text = Node::String("hello".to_string());
///
/// assert!(num.is_integer());
/// assert!(text.is_string());
/// assert_eq!(num.type_name(), "integer");
/// ```
#[derive(Clone, Debug)]
pub enum Node {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// A date, time or date-time, kept exactly as written.
    Datetime(String),
    Array(Vec<Node>),
    Table(Table),
}

/// Structural equality, except that `nan` equals `nan` so that a parsed
/// document always compares equal to itself.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Integer(a), Node::Integer(b)) => a == b,
            (Node::Float(a), Node::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Node::Boolean(a), Node::Boolean(b)) => a == b,
            (Node::Datetime(a), Node::Datetime(b)) => a == b,
            (Node::Array(a), Node::Array(b)) => a == b,
            (Node::Table(a), Node::Table(b)) => a == b,
            _ => false,
        }
    }
}

impl Node {
    /// Human-readable name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Node::String(_) => "string",
            Node::Integer(_) => "integer",
            Node::Float(_) => "float",
            Node::Boolean(_) => "boolean",
            Node::Datetime(_) => "datetime",
            Node::Array(_) => "array",
            Node::Table(_) => "table",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Node::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Node::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Node::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Node::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Node::Datetime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Node::Table(_))
    }

    /// Strings, numbers, booleans and datetimes.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Node::Array(_) | Node::Table(_))
    }

    /// If the value is a string, returns a reference to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::Node;
    ///
    /// assert_eq!(Node::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Node::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Node::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Integers are not converted.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a datetime, returns its source text.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&str> {
        match self {
            Node::Datetime(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Node::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::parse;
    ///
    /// let doc = parse("[owner]\nname = \"Tom\"").unwrap();
    /// let owner = doc.get("owner").unwrap();
    /// assert_eq!(owner.get("name").and_then(|v| v.as_str()), Some("Tom"));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_table().and_then(|table| table.get(key))
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::String(s) | Node::Datetime(s) => serializer.serialize_str(s),
            Node::Integer(i) => serializer.serialize_i64(*i),
            Node::Float(f) => serializer.serialize_f64(*f),
            Node::Boolean(b) => serializer.serialize_bool(*b),
            Node::Array(arr) => serializer.collect_seq(arr),
            Node::Table(table) => table.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOML value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Node::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Node::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Node::Integer)
                    .map_err(|_| E::custom(format!("integer {} is out of range for TOML", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Node::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Node::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Node::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("TOML has no null value"))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Node::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = Table::new();
                while let Some((key, value)) = map.next_entry::<String, Node>()? {
                    table.insert(key, value);
                }
                Ok(Node::Table(table))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

impl TryFrom<Node> for i64 {
    type Error = crate::Error;

    fn try_from(value: Node) -> crate::Result<Self> {
        match value {
            Node::Integer(i) => Ok(i),
            other => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Node> for f64 {
    type Error = crate::Error;

    fn try_from(value: Node) -> crate::Result<Self> {
        match value {
            Node::Float(f) => Ok(f),
            Node::Integer(i) => Ok(i as f64),
            other => Err(crate::Error::custom(format!(
                "expected number, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Node> for bool {
    type Error = crate::Error;

    fn try_from(value: Node) -> crate::Result<Self> {
        match value {
            Node::Boolean(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Node> for String {
    type Error = crate::Error;

    fn try_from(value: Node) -> crate::Result<Self> {
        match value {
            Node::String(s) | Node::Datetime(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.type_name()
            ))),
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Boolean(value)
    }
}

impl From<i8> for Node {
    fn from(value: i8) -> Self {
        Node::Integer(i64::from(value))
    }
}

impl From<i16> for Node {
    fn from(value: i16) -> Self {
        Node::Integer(i64::from(value))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Integer(i64::from(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Integer(value)
    }
}

impl From<u8> for Node {
    fn from(value: u8) -> Self {
        Node::Integer(i64::from(value))
    }
}

impl From<u16> for Node {
    fn from(value: u16) -> Self {
        Node::Integer(i64::from(value))
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Node::Integer(i64::from(value))
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Float(f64::from(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Array(value)
    }
}

impl From<Table> for Node {
    fn from(value: Table) -> Self {
        Node::Table(value)
    }
}
