//! Serde deserialization from [`Node`] trees.
//!
//! Text is parsed into a [`Document`](crate::Document) first; the
//! deserializers here then drive `T::deserialize` over the tree. Most users
//! go through [`from_str`](crate::from_str):
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_tomlite::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! let server: Server = from_str("host = \"localhost\"\nport = 8080").unwrap();
//! assert_eq!(server, Server { host: "localhost".into(), port: 8080 });
//! ```
//!
//! Missing keys deserialize as `None` for `Option` fields. Enums accept a
//! string for unit variants and a single-key table for variants with data.

use crate::{Error, Node, Result, Table};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializer reading from an owned [`Node`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_tomlite::{Node, NodeDeserializer};
///
/// let node = Node::Array(vec![Node::from(1), Node::from(2)]);
/// let values = Vec::<u8>::deserialize(NodeDeserializer::new(node)).unwrap();
/// assert_eq!(values, vec![1, 2]);
/// ```
pub struct NodeDeserializer {
    node: Node,
}

impl NodeDeserializer {
    #[must_use]
    pub fn new(node: Node) -> Self {
        NodeDeserializer { node }
    }
}

fn unexpected(expected: &str, found: &Node) -> Error {
    Error::custom(format!("expected {}, found {}", expected, found.type_name()))
}

impl<'de> de::Deserializer<'de> for NodeDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::String(s) | Node::Datetime(s) => visitor.visit_string(s),
            Node::Integer(i) => visitor.visit_i64(i),
            Node::Float(f) => visitor.visit_f64(f),
            Node::Boolean(b) => visitor.visit_bool(b),
            Node::Array(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Node::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // A present key is always `Some`; absence is handled by the map.
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::String(s) => visitor.visit_enum(s.into_deserializer()),
            Node::Table(table) if table.len() == 1 => {
                let mut entries = table.into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer { variant, value }),
                    None => Err(Error::custom("expected enum variant")),
                }
            }
            Node::Table(_) => Err(Error::custom(
                "expected a table with exactly one key for an enum variant",
            )),
            other => Err(unexpected("enum", &other)),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Node>,
}

impl SeqDeserializer {
    fn new(items: Vec<Node>) -> Self {
        SeqDeserializer {
            iter: items.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(node) => seed.deserialize(NodeDeserializer::new(node)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Node>,
    value: Option<Node>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(KeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(NodeDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Table keys are strings, but maps keyed by integers are written with
/// stringified keys, so numeric key types parse them back.
struct KeyDeserializer {
    key: String,
}

macro_rules! deserialize_numeric_key {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.key.parse::<$ty>() {
                    Ok(n) => visitor.$visit(n),
                    Err(_) => Err(Error::custom(format!(
                        "expected {} key, found `{}`",
                        stringify!($ty),
                        self.key
                    ))),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    deserialize_numeric_key! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.key.into_deserializer())
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string bytes byte_buf option unit
        unit_struct seq tuple tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: String,
    value: Node,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(KeyDeserializer { key: self.variant })?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Node,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Node::Table(table) if table.is_empty() => Ok(()),
            other => Err(unexpected("unit variant", &other)),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(NodeDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Node::Array(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            other => Err(unexpected("tuple variant", &other)),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Node::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            other => Err(unexpected("struct variant", &other)),
        }
    }
}
