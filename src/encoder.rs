//! TOML encoding: from a [`Document`] to text.
//!
//! Every value is first classified by the shape it takes in the output:
//!
//! - **Inline**: scalars, empty tables, empty arrays and arrays without
//!   tables. Written as `key = value`; nested arrays and tables inside them
//!   render as `[1, 2]` and `{ k = v }`.
//! - **Table**: a non-empty table, written under a `[path]` header.
//! - **Array of tables**: a non-empty array holding only tables, written as
//!   one `[[path]]` block per element.
//!
//! For each table the emitter writes its inline keys first, then a blank
//! line, then its tables and finally its arrays of tables, recursing with the
//! extended path. An array mixing tables with other values has no TOML form
//! and is rejected.
//!
//! ```rust
//! use serde_tomlite::{encode, parse};
//!
//! let doc = parse("[owner]\nname = \"Tom\"\n\n[[products]]\nsku = 1").unwrap();
//! assert_eq!(
//!     encode(&doc).unwrap(),
//!     "[owner]\nname = \"Tom\"\n\n[[products]]\nsku = 1"
//! );
//! ```

use crate::error::EncodeError;
use crate::key::{format_key, format_path};
use crate::literal::is_datetime;
use crate::{Document, EncodeOptions, Node, Table};

/// Encodes a document with the default [`EncodeOptions`].
///
/// # Errors
///
/// Returns [`EncodeError::MixedTableFormat`] for an array that mixes tables
/// with other values and [`EncodeError::UnsupportedValueType`] for a
/// [`Node::Datetime`] whose text is not a date or time.
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{encode, Node, Table};
///
/// let mut doc = Table::new();
/// doc.insert("name".to_string(), Node::from("serde"));
/// doc.insert("version".to_string(), Node::from("1.0"));
/// assert_eq!(encode(&doc).unwrap(), "name = \"serde\"\nversion = \"1.0\"");
/// ```
pub fn encode(document: &Document) -> Result<String, EncodeError> {
    encode_with_options(document, &EncodeOptions::default())
}

/// Encodes a document with custom layout options.
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_with_options(
    document: &Document,
    options: &EncodeOptions,
) -> Result<String, EncodeError> {
    let mut emitter = Emitter::new(options);
    emitter.write_table(document, &mut Vec::new())?;
    let output = emitter.finish();
    log::debug!(
        "encoded TOML document: {} top-level keys, {} bytes",
        document.len(),
        output.len()
    );
    Ok(output)
}

/// Encodes any [`Node`], which must be a table.
///
/// # Errors
///
/// Returns [`EncodeError::NonTableRoot`] for any other variant, otherwise the
/// errors of [`encode`].
///
/// # Examples
///
/// ```rust
/// use serde_tomlite::{encode_value, EncodeError, Node};
///
/// let err = encode_value(&Node::from(42)).unwrap_err();
/// assert_eq!(err, EncodeError::NonTableRoot("integer".to_string()));
/// ```
pub fn encode_value(node: &Node) -> Result<String, EncodeError> {
    encode_node(node, &EncodeOptions::default())
}

pub(crate) fn encode_node(node: &Node, options: &EncodeOptions) -> Result<String, EncodeError> {
    match node {
        Node::Table(table) => encode_with_options(table, options),
        other => Err(EncodeError::NonTableRoot(other.type_name().to_string())),
    }
}

/// How a value appears in the output.
#[derive(Debug, PartialEq)]
pub(crate) enum Shape<'a> {
    Inline,
    Table(&'a Table),
    ArrayOfTables(Vec<&'a Table>),
}

/// Decides how `node`, stored at `path`, is emitted.
pub(crate) fn classify<'a>(node: &'a Node, path: &[String]) -> Result<Shape<'a>, EncodeError> {
    match node {
        Node::Table(table) if !table.is_empty() => Ok(Shape::Table(table)),
        Node::Array(items) => {
            let tables: Vec<&Table> = items.iter().filter_map(Node::as_table).collect();
            if tables.is_empty() {
                Ok(Shape::Inline)
            } else if tables.len() == items.len() {
                Ok(Shape::ArrayOfTables(tables))
            } else {
                Err(EncodeError::MixedTableFormat(format_path(path)))
            }
        }
        _ => Ok(Shape::Inline),
    }
}

/// Re-quotes `s` as a basic string. Control characters without a short
/// escape are written as-is.
pub(crate) fn quote_basic(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Renders a float so that it parses back as a float.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else {
        // Debug keeps the `.0` on whole numbers.
        format!("{:?}", f)
    }
}

struct Emitter<'o> {
    output: String,
    options: &'o EncodeOptions,
}

impl<'o> Emitter<'o> {
    fn new(options: &'o EncodeOptions) -> Self {
        Emitter {
            output: String::with_capacity(256),
            options,
        }
    }

    fn finish(mut self) -> String {
        let len = self.output.trim_end_matches('\n').len();
        self.output.truncate(len);
        if self.options.trailing_newline && !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output
    }

    fn ordered<'t>(&self, table: &'t Table) -> Vec<(&'t String, &'t Node)> {
        let mut entries: Vec<_> = table.iter().collect();
        if self.options.sort_keys {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }
        entries
    }

    fn write_indent(&mut self, level: usize) {
        for _ in 0..level * self.options.indent {
            self.output.push(' ');
        }
    }

    /// Starts a new block with a blank line, unless at the top of the output.
    fn separate(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }

    fn write_table(&mut self, table: &Table, path: &mut Vec<String>) -> Result<(), EncodeError> {
        let depth = path.len();
        let mut tables = Vec::new();
        let mut arrays = Vec::new();

        for (key, node) in self.ordered(table) {
            path.push(key.clone());
            match classify(node, path)? {
                Shape::Inline => {
                    self.write_indent(depth);
                    self.output.push_str(&format_key(key));
                    self.output.push_str(" = ");
                    self.write_value(node, path)?;
                    self.output.push('\n');
                }
                Shape::Table(inner) => tables.push((key, inner)),
                Shape::ArrayOfTables(entries) => arrays.push((key, entries)),
            }
            path.pop();
        }

        for (key, inner) in tables {
            path.push(key.clone());
            self.write_header(path, false);
            self.write_table(inner, path)?;
            path.pop();
        }

        for (key, entries) in arrays {
            path.push(key.clone());
            for entry in entries {
                self.write_header(path, true);
                self.write_table(entry, path)?;
            }
            path.pop();
        }
        Ok(())
    }

    fn write_header(&mut self, path: &[String], array: bool) {
        let header = format_path(path);
        log::trace!("emitting {}", header);
        self.separate();
        self.write_indent(path.len() - 1);
        let (open, close) = if array { ("[[", "]]") } else { ("[", "]") };
        self.output.push_str(open);
        self.output.push_str(&header);
        self.output.push_str(close);
        self.output.push('\n');
    }

    fn write_value(&mut self, node: &Node, path: &mut Vec<String>) -> Result<(), EncodeError> {
        match node {
            Node::String(s) => self.output.push_str(&quote_basic(s)),
            Node::Integer(i) => self.output.push_str(&i.to_string()),
            Node::Float(f) => self.output.push_str(&format_float(*f)),
            Node::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Node::Datetime(text) => {
                if !is_datetime(text) {
                    return Err(EncodeError::unsupported(format!(
                        "`{}` at `{}` is not a date or time",
                        text,
                        format_path(path.as_slice())
                    )));
                }
                self.output.push_str(text);
            }
            Node::Array(items) => {
                // Only checks for mixing; tables render inline here.
                classify(node, path)?;
                if items.is_empty() {
                    self.output.push_str("[]");
                    return Ok(());
                }
                let pad = if self.options.array_spacing { " " } else { "" };
                self.output.push('[');
                self.output.push_str(pad);
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_value(item, path)?;
                }
                self.output.push_str(pad);
                self.output.push(']');
            }
            Node::Table(table) => {
                if table.is_empty() {
                    self.output.push_str("{}");
                    return Ok(());
                }
                self.output.push_str("{ ");
                for (i, (key, value)) in self.ordered(table).into_iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.output.push_str(&format_key(key));
                    self.output.push_str(" = ");
                    path.push(key.clone());
                    self.write_value(value, path)?;
                    path.pop();
                }
                self.output.push_str(" }");
            }
        }
        Ok(())
    }
}
