//! The table type backing TOML tables and documents.
//!
//! [`Table`] wraps an [`IndexMap`] so that keys keep the order in which the
//! parser (or the caller) inserted them. Equality ignores that order: two
//! tables are equal when they hold the same keys with equal values. The
//! encoder sorts keys by default, so the stored order only matters when
//! [`EncodeOptions::with_sort_keys`](crate::EncodeOptions::with_sort_keys)
//! turns sorting off.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlite::{Node, Table};
//!
//! let mut table = Table::new();
//! table.insert("name".to_string(), Node::from("Alice"));
//! table.insert("age".to_string(), Node::from(30));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Node;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// A map of string keys to TOML values, in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, Node>);

impl Table {
    /// Creates an empty `Table`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::Table;
    ///
    /// let table = Table::new();
    /// assert!(table.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the value previously stored under
    /// `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlite::{Node, Table};
    ///
    /// let mut table = Table::new();
    /// assert!(table.insert("key".to_string(), Node::from(42)).is_none());
    /// assert!(table.insert("key".to_string(), Node::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Node) -> Option<Node> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    /// Returns the value under `key`, inserting the result of `default` first
    /// if the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: &str, default: F) -> &mut Node
    where
        F: FnOnce() -> Node,
    {
        self.0.entry(key.to_string()).or_insert_with(default)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }

    /// Returns an iterator over the entries of the table, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Node> {
        self.0.iter_mut()
    }
}

impl From<HashMap<String, Node>> for Table {
    fn from(map: HashMap<String, Node>) -> Self {
        Table(map.into_iter().collect())
    }
}

impl From<BTreeMap<String, Node>> for Table {
    fn from(map: BTreeMap<String, Node>) -> Self {
        Table(map.into_iter().collect())
    }
}

impl From<Table> for HashMap<String, Node> {
    fn from(table: Table) -> Self {
        table.0.into_iter().collect()
    }
}

impl IntoIterator for Table {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Node)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Node::deserialize(deserializer)? {
            Node::Table(table) => Ok(table),
            other => Err(serde::de::Error::custom(format!(
                "expected a table, found {}",
                other.type_name()
            ))),
        }
    }
}
