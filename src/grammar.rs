//! Supported TOML grammar
//!
//! This module documents the subset of TOML read by [`parse`](crate::parse)
//! and written by [`encode`](crate::encode).
//!
//! # Statements
//!
//! A document is a sequence of statements, one per line:
//!
//! ```text
//! # comment
//! key = "value"          # key/value pair
//! [table.path]           # standard table
//! [[array.of.tables]]    # appends a new table to an array
//! ```
//!
//! A `#` outside a string starts a comment that runs to the end of the line.
//! Blank lines are ignored. A value may continue over several lines only
//! while a multi-line string or a bracket is open; the statement's line
//! number, used in errors, is the line it starts on.
//!
//! # Keys
//!
//! | Form | Example | Segments |
//! |------|---------|----------|
//! | Bare | `name`, `bare-key_1`, `1234` | one |
//! | Basic quoted | `"127.0.0.1"`, `"tab\tkey"` | one, escapes applied |
//! | Literal quoted | `'key.with.dots'` | one, verbatim |
//! | Dotted | `site."google.com".port` | one per part |
//!
//! Dotted keys create intermediate tables as needed. Walking through a key
//! that already holds a non-table value is a
//! [`KeyPathConflict`](crate::ParseError::KeyPathConflict).
//!
//! # Tables
//!
//! - `[a.b]` may appear once per path; a second `[a.b]` is a
//!   [`TableRedefinition`](crate::ParseError::TableRedefinition).
//! - `[[a.b]]` may repeat; each occurrence appends an empty table and makes
//!   it current. Headers below it (`[a.b.c]`, `[[a.b.d]]`) refer to that
//!   newest entry.
//! - Assigning the same key twice in one table is a
//!   [`KeyRedefinition`](crate::ParseError::KeyRedefinition).
//!
//! # Values
//!
//! | Type | Examples |
//! |------|----------|
//! | Basic string | `"line\nbreak"` |
//! | Literal string | `'C:\Users\tom'` |
//! | Multi-line basic | `"""` ... `"""` |
//! | Multi-line literal | `'''` ... `'''` |
//! | Integer | `42`, `+7`, `-17`, `1_000`, `0xDEAD_BEEF`, `0o755`, `0b1101` |
//! | Float | `3.14`, `-0.01`, `5e+22`, `6.626e-34`, `inf`, `-inf`, `nan` |
//! | Boolean | `true`, `false` |
//! | Datetime | `1979-05-27T07:32:00Z`, `1979-05-27`, `07:32:00` |
//! | Array | `[1, 2, 3]`, `[[1, 2], ["a", "b"]]` |
//! | Inline table | `{ x = 1, y.z = 2 }` |
//!
//! ## Strings
//!
//! Basic strings understand `\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r` and
//! `\t`. Any other escape, `\u` included, is kept as written. In a
//! multi-line basic string a backslash at the end of a line removes the line
//! break and the whitespace that follows it. A newline directly after the
//! opening `"""` or `'''` is dropped.
//!
//! ## Numbers
//!
//! Underscores must sit between two digits. Decimal integers may not have
//! leading zeros. Integers must fit in an `i64`; anything else that looks
//! numeric is an
//! [`InvalidNumberFormat`](crate::ParseError::InvalidNumberFormat).
//!
//! `nan`, `+nan` and `-nan` all read as the same NaN and are written back as
//! `nan`; the sign of a NaN is not kept. Two NaN floats compare equal as
//! [`Node`](crate::Node)s.
//!
//! ## Datetimes
//!
//! A token starting with `YYYY-` or `HH:` is a date or time. It must name a
//! real calendar day and a real clock time, otherwise it is an
//! [`InvalidSyntax`](crate::ParseError::InvalidSyntax) naming the token.
//! Dates and times are kept as the text written in the source
//! ([`Node::Datetime`](crate::Node)) and written back unchanged.
//!
//! ## Nesting
//!
//! Arrays and inline tables may nest at most 128 levels deep. Deeper values
//! are an [`InvalidSyntax`](crate::ParseError::InvalidSyntax).
//!
//! # Encoding
//!
//! The encoder writes, for every table:
//!
//! 1. its inline `key = value` lines, keys sorted by default;
//! 2. a blank line;
//! 3. each non-empty sub-table under a `[path]` header;
//! 4. each array whose elements are all tables as `[[path]]` blocks.
//!
//! ```text
//! title = "example"
//!
//! [owner]
//! name = "Tom"
//!
//! [[products]]
//! name = "Hammer"
//! ```
//!
//! Strings are always written as basic strings. Floats always carry a `.`
//! or an exponent so they read back as floats. An array mixing tables with
//! other values cannot be written and fails with
//! [`MixedTableFormat`](crate::EncodeError::MixedTableFormat).
