//! TOML parsing: from text to a [`Document`].
//!
//! The [`Scanner`](crate::scanner::Scanner) yields logical statements; this
//! module dispatches each one as a `[table]` header, an `[[array]]` header or
//! a `key = value` assignment, keeping track of which table assignments
//! currently write into.
//!
//! ```rust
//! use serde_tomlite::parse;
//!
//! let doc = parse("[[products]]\nname = \"Hammer\"\n\n[[products]]\nname = \"Nail\"").unwrap();
//! let products = doc.get("products").and_then(|p| p.as_array()).unwrap();
//! assert_eq!(products.len(), 2);
//! ```

use crate::error::ParseError;
use crate::key::{descend, format_path, insert_at, parse_key_path, Traverse};
use crate::literal::{parse_value, split_key_value};
use crate::scanner::{Scanner, Statement};
use crate::{Document, Node, Table};
use std::collections::HashSet;

/// Parses TOML text into a [`Document`].
///
/// # Errors
///
/// Returns the first [`ParseError`] found; no partial document is produced.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{parse, Node};
///
/// let doc = parse("animal.type.name = \"pug\"").unwrap();
/// let name = doc
///     .get("animal")
///     .and_then(|a| a.get("type"))
///     .and_then(|t| t.get("name"));
/// assert_eq!(name, Some(&Node::from("pug")));
/// ```
pub fn parse(input: &str) -> Result<Document, ParseError> {
    let mut state = ParseState::new();
    for statement in Scanner::new(input) {
        state.handle(statement?)?;
    }
    log::debug!(
        "parsed TOML document: {} top-level keys, {} table headers",
        state.root.len(),
        state.defined_tables.len()
    );
    Ok(state.root)
}

/// Mutable state of one `parse` call.
struct ParseState {
    root: Table,
    /// Header path of the table that assignments write into; empty for the
    /// root. Arrays of tables along the path stand for their last element.
    current: Vec<String>,
    /// Canonical paths of every header opened so far.
    defined_tables: HashSet<String>,
}

enum Header {
    Table(Vec<String>),
    ArrayOfTables(Vec<String>),
}

impl ParseState {
    fn new() -> Self {
        ParseState {
            root: Table::new(),
            current: Vec::new(),
            defined_tables: HashSet::new(),
        }
    }

    fn handle(&mut self, statement: Statement) -> Result<(), ParseError> {
        let Statement { line, text } = statement;
        if text.starts_with('[') {
            match parse_header(&text, line)? {
                Header::Table(path) => self.open_table(path, line),
                Header::ArrayOfTables(path) => self.open_array_entry(path, line),
            }
        } else {
            self.assign(&text, line)
        }
    }

    fn open_table(&mut self, path: Vec<String>, line: usize) -> Result<(), ParseError> {
        let canonical = format_path(path.as_slice());
        log::trace!("line {}: [{}]", line, canonical);
        if !self.defined_tables.insert(canonical.clone()) {
            return Err(ParseError::TableRedefinition {
                line,
                path: canonical,
            });
        }

        let Some((last, parents)) = path.split_last() else {
            return Err(ParseError::syntax(line, "empty header"));
        };
        let parent = descend(&mut self.root, parents, Traverse::Header, line)?;
        if !parent
            .get_or_insert_with(last, || Node::Table(Table::new()))
            .is_table()
        {
            return Err(ParseError::conflict(line, last));
        }
        self.current = path;
        Ok(())
    }

    fn open_array_entry(&mut self, path: Vec<String>, line: usize) -> Result<(), ParseError> {
        let canonical = format_path(path.as_slice());
        log::trace!("line {}: [[{}]]", line, canonical);

        let Some((last, parents)) = path.split_last() else {
            return Err(ParseError::syntax(line, "empty header"));
        };
        let parent = descend(&mut self.root, parents, Traverse::Header, line)?;
        let slot = parent.get_or_insert_with(last, || Node::Array(Vec::new()));
        match slot {
            Node::Array(items) if items.iter().all(Node::is_table) => {
                items.push(Node::Table(Table::new()));
            }
            _ => return Err(ParseError::conflict(line, last)),
        }

        // A fresh entry starts with none of its sub-tables defined.
        let prefix = format!("{}.", canonical);
        self.defined_tables.retain(|defined| !defined.starts_with(&prefix));
        self.defined_tables.insert(canonical);
        self.current = path;
        Ok(())
    }

    fn assign(&mut self, text: &str, line: usize) -> Result<(), ParseError> {
        let invalid = || ParseError::InvalidKeyValuePair {
            line,
            text: text.to_string(),
        };
        let (key_text, value_text) = split_key_value(text).ok_or_else(invalid)?;
        if key_text.trim().is_empty() || value_text.trim().is_empty() {
            return Err(invalid());
        }

        let path = parse_key_path(key_text, line)?;
        let value = parse_value(value_text, line)?;
        let target = descend(&mut self.root, &self.current, Traverse::Header, line)?;
        insert_at(target, &path, value, line)
    }
}

fn parse_header(text: &str, line: usize) -> Result<Header, ParseError> {
    let malformed = || ParseError::syntax(line, format!("malformed table header `{}`", text));

    if let Some(inner) = text.strip_prefix("[[") {
        let inner = inner.strip_suffix("]]").ok_or_else(malformed)?;
        return header_path(inner, line).map(Header::ArrayOfTables);
    }
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(malformed)?;
    header_path(inner, line).map(Header::Table)
}

fn header_path(inner: &str, line: usize) -> Result<Vec<String>, ParseError> {
    let trimmed = inner.trim();
    if trimmed.starts_with('[') || trimmed.ends_with(']') {
        return Err(ParseError::syntax(
            line,
            format!("malformed table header `{}`", inner),
        ));
    }
    parse_key_path(trimmed, line)
}
