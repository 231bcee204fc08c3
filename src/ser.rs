//! Serde serialization into [`Node`] trees.
//!
//! [`NodeSerializer`] turns any `T: Serialize` into a [`Node`]; the crate
//! root then hands that tree to the encoder. Most users go through
//! [`to_string`](crate::to_string) or [`to_value`](crate::to_value):
//!
//! ```rust
//! use serde::Serialize;
//! use serde_tomlite::{to_value, Node};
//!
//! #[derive(Serialize)]
//! struct Plugin {
//!     name: String,
//!     version: Option<String>,
//! }
//!
//! let plugin = Plugin { name: "tmux-sensible".to_string(), version: None };
//! let node = to_value(&plugin).unwrap();
//! assert_eq!(node.get("name"), Some(&Node::from("tmux-sensible")));
//! assert_eq!(node.get("version"), None);
//! ```
//!
//! TOML has no null, so `None` and `()` only serialize as absent struct
//! fields or map entries. Enum variants carrying data become tables with a
//! single key, the variant name.

use crate::error::EncodeError;
use crate::{Node, Table};
use serde::{ser, Serialize};

type Result<T> = std::result::Result<T, EncodeError>;

const ABSENT: &str = "`None` has no TOML representation";

/// Serializer producing a [`Node`].
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_tomlite::{Node, NodeSerializer};
///
/// let node = vec![1, 2, 3].serialize(NodeSerializer).unwrap();
/// assert_eq!(node, Node::Array(vec![Node::from(1), Node::from(2), Node::from(3)]));
/// ```
pub struct NodeSerializer;

pub struct SerializeVec {
    vec: Vec<Node>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<Node>,
}

pub struct SerializeMap {
    table: Table,
    current_key: Option<String>,
    key_kind: Option<KeyKind>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    table: Table,
}

/// Kind of the first key seen in a map; later keys must match it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyKind {
    String,
    Integer,
}

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = EncodeError;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Node> {
        Ok(Node::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Node> {
        Ok(Node::Integer(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Node> {
        Ok(Node::Integer(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Node> {
        Ok(Node::Integer(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Node> {
        Ok(Node::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Node> {
        Ok(Node::Integer(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Node> {
        Ok(Node::Integer(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Node> {
        Ok(Node::Integer(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Node> {
        i64::try_from(v)
            .map(Node::Integer)
            .map_err(|_| EncodeError::unsupported(format!("integer {} exceeds i64", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Node> {
        Ok(Node::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Node> {
        Ok(Node::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Node> {
        Ok(Node::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Node> {
        Ok(Node::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node> {
        Ok(Node::Array(
            v.iter().map(|&b| Node::Integer(i64::from(b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Node> {
        Err(EncodeError::unsupported(ABSENT))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node> {
        Err(EncodeError::unsupported("unit value"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Node> {
        Err(EncodeError::unsupported(format!("unit struct `{}`", name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node> {
        Ok(Node::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        Ok(single_key(variant, to_element(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            table: Table::with_capacity(len.unwrap_or(0)),
            current_key: None,
            key_kind: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            table: Table::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Node;
    type Error = EncodeError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_element(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Node;
    type Error = EncodeError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Node> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Node;
    type Error = EncodeError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Node> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Node;
    type Error = EncodeError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_element(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(single_key(self.variant, Node::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Node;
    type Error = EncodeError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let (key, kind) = match to_node(key)? {
            Node::String(s) => (s, KeyKind::String),
            Node::Integer(i) => (i.to_string(), KeyKind::Integer),
            other => {
                return Err(EncodeError::unsupported(format!(
                    "{} as a table key",
                    other.type_name()
                )))
            }
        };
        match self.key_kind {
            Some(seen) if seen != kind => return Err(EncodeError::MixedTableFormat(key)),
            _ => self.key_kind = Some(kind),
        }
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| EncodeError::Custom("serialize_value called without serialize_key".into()))?;
        if let Some(node) = to_optional(value)? {
            self.table.insert(key, node);
        }
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::Table(self.table))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Node;
    type Error = EncodeError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(node) = to_optional(value)? {
            self.table.insert(key.to_string(), node);
        }
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::Table(self.table))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Node;
    type Error = EncodeError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(node) = to_optional(value)? {
            self.table.insert(key.to_string(), node);
        }
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(single_key(self.variant, Node::Table(self.table)))
    }
}

pub(crate) fn to_node<T: Serialize + ?Sized>(value: &T) -> Result<Node> {
    value.serialize(NodeSerializer)
}

/// Serializes a struct field or map value, where `None` means "leave out".
fn to_optional<T: Serialize + ?Sized>(value: &T) -> Result<Option<Node>> {
    match to_node(value) {
        Ok(node) => Ok(Some(node)),
        Err(EncodeError::UnsupportedValueType(msg)) if msg == ABSENT => Ok(None),
        Err(err) => Err(err),
    }
}

/// Serializes a value that must be present, such as an array element.
fn to_element<T: Serialize + ?Sized>(value: &T) -> Result<Node> {
    to_optional(value)?.ok_or_else(|| EncodeError::unsupported("`None` inside an array or variant"))
}

fn single_key(key: &str, value: Node) -> Node {
    let mut table = Table::with_capacity(1);
    table.insert(key.to_string(), value);
    Node::Table(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Serialize)]
    struct Plugin {
        name: String,
        branch: Option<String>,
        pinned: bool,
    }

    #[derive(Serialize)]
    enum Source {
        Registry,
        Git(String),
        Path { dir: String, editable: bool },
        Pair(i32, i32),
    }

    #[test]
    fn test_struct_skips_none_fields() {
        let plugin = Plugin {
            name: "tpm".to_string(),
            branch: None,
            pinned: true,
        };
        let node = to_node(&plugin).unwrap();
        let table = node.as_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("name"), Some(&Node::from("tpm")));
        assert!(!table.contains_key("branch"));
    }

    #[test]
    fn test_none_outside_fields_is_rejected() {
        assert_eq!(
            to_node(&None::<i32>),
            Err(EncodeError::UnsupportedValueType(ABSENT.to_string()))
        );
        assert!(matches!(
            to_node(&vec![Some(1), None]),
            Err(EncodeError::UnsupportedValueType(msg)) if msg != ABSENT
        ));
        assert!(to_node(&()).is_err());
    }

    #[test]
    fn test_u64_range() {
        assert_eq!(to_node(&(i64::MAX as u64)).unwrap(), Node::Integer(i64::MAX));
        assert!(matches!(
            to_node(&u64::MAX),
            Err(EncodeError::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_node(&Source::Registry).unwrap(), Node::from("Registry"));

        let git = to_node(&Source::Git("https://example.com/x.git".into())).unwrap();
        assert_eq!(git.get("Git"), Some(&Node::from("https://example.com/x.git")));

        let path = to_node(&Source::Path {
            dir: "/tmp".into(),
            editable: false,
        })
        .unwrap();
        assert_eq!(
            path.get("Path").and_then(|p| p.get("editable")),
            Some(&Node::from(false))
        );

        let pair = to_node(&Source::Pair(1, 2)).unwrap();
        assert_eq!(
            pair.get("Pair"),
            Some(&Node::Array(vec![Node::from(1), Node::from(2)]))
        );
    }

    #[test]
    fn test_map_keys() {
        let mut by_id = BTreeMap::new();
        by_id.insert(2, "two");
        by_id.insert(10, "ten");
        let node = to_node(&by_id).unwrap();
        assert_eq!(node.get("10"), Some(&Node::from("ten")));

        let mut optional: HashMap<&str, Option<i32>> = HashMap::new();
        optional.insert("set", Some(1));
        optional.insert("unset", None);
        let node = to_node(&optional).unwrap();
        assert_eq!(node.as_table().map(Table::len), Some(1));

        let mut flags = HashMap::new();
        flags.insert(true, 1);
        assert!(matches!(
            to_node(&flags),
            Err(EncodeError::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_mixed_map_keys() {
        let mut serializer = ser::Serializer::serialize_map(NodeSerializer, None).unwrap();
        ser::SerializeMap::serialize_entry(&mut serializer, "name", &1).unwrap();
        let err = ser::SerializeMap::serialize_entry(&mut serializer, &7, &2).unwrap_err();
        assert_eq!(err, EncodeError::MixedTableFormat("7".to_string()));
    }

    #[test]
    fn test_bytes_and_chars() {
        struct Raw<'a>(&'a [u8]);
        impl Serialize for Raw<'_> {
            fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_bytes(self.0)
            }
        }
        assert_eq!(
            to_node(&Raw(&[1, 255])).unwrap(),
            Node::Array(vec![Node::from(1), Node::from(255)])
        );
        assert_eq!(to_node(&'x').unwrap(), Node::from("x"));
    }
}
