//! Keys and key paths.
//!
//! A key path is a dot-separated list of segments. Each segment is a bare key
//! (`[A-Za-z0-9_-]+`), a basic-quoted key (`"a.b"`, escapes allowed) or a
//! literal-quoted key (`'a.b'`). Quoted segments are never split on the dots
//! they contain.
//!
//! The resolver half of this module walks a path through a [`Table`],
//! creating missing intermediate tables on the way.

use crate::error::ParseError;
use crate::literal::unescape_basic;
use crate::{Node, Table};
use std::borrow::Cow;

#[inline]
pub(crate) fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Splits a key expression such as `a."b.c".d` into its segments.
pub(crate) fn parse_key_path(text: &str, line: usize) -> Result<Vec<String>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::syntax(line, "expected a key"));
    }

    let mut segments = Vec::new();
    let mut rest = text;
    loop {
        rest = rest.trim_start();
        let (segment, after) = read_segment(rest, line)?;
        segments.push(segment);

        rest = after.trim_start();
        if rest.is_empty() {
            return Ok(segments);
        }
        match rest.strip_prefix('.') {
            Some(after_dot) => rest = after_dot,
            None => {
                return Err(ParseError::syntax(
                    line,
                    format!("unexpected `{}` in key `{}`", rest, text),
                ))
            }
        }
    }
}

fn read_segment(rest: &str, line: usize) -> Result<(String, &str), ParseError> {
    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, '"')) => {
            let mut escaped = false;
            for (i, c) in chars {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => {
                        let raw = &rest[1..i];
                        return Ok((unescape_basic(raw, line)?, &rest[i + 1..]));
                    }
                    '\n' => break,
                    _ => {}
                }
            }
            Err(ParseError::syntax(line, format!("unterminated quoted key `{}`", rest)))
        }
        Some((_, '\'')) => match rest[1..].find(|c: char| c == '\'' || c == '\n') {
            Some(end) if rest[1 + end..].starts_with('\'') => {
                Ok((rest[1..1 + end].to_string(), &rest[end + 2..]))
            }
            _ => Err(ParseError::syntax(line, format!("unterminated quoted key `{}`", rest))),
        },
        Some(_) => {
            let end = rest
                .find(|c: char| !is_bare_key_char(c))
                .unwrap_or(rest.len());
            if end == 0 {
                return Err(ParseError::syntax(
                    line,
                    format!("invalid character in key `{}`", rest),
                ));
            }
            Ok((rest[..end].to_string(), &rest[end..]))
        }
        None => Err(ParseError::syntax(line, "empty key segment")),
    }
}

/// Renders one key segment, quoting it unless it is a valid bare key.
pub(crate) fn format_key(key: &str) -> Cow<'_, str> {
    if !key.is_empty() && key.chars().all(is_bare_key_char) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(crate::encoder::quote_basic(key))
    }
}

/// Renders a key path as it would appear in a header.
pub(crate) fn format_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| format_key(s.as_ref()))
        .collect::<Vec<_>>()
        .join(".")
}

/// How intermediate segments are walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Traverse {
    /// Dotted keys in assignments: only tables may be walked through.
    Dotted,
    /// Header paths: an array of tables stands for its last element.
    Header,
}

/// Walks `segments` from `table`, creating empty tables for missing
/// segments, and returns the table the last segment leads to.
pub(crate) fn descend<'t>(
    table: &'t mut Table,
    segments: &[String],
    traverse: Traverse,
    line: usize,
) -> Result<&'t mut Table, ParseError> {
    let mut current = table;
    for segment in segments {
        let node = current.get_or_insert_with(segment, || Node::Table(Table::new()));
        current = match node {
            Node::Table(inner) => inner,
            Node::Array(items) if traverse == Traverse::Header => match items.last_mut() {
                Some(Node::Table(inner)) => inner,
                _ => return Err(ParseError::conflict(line, segment)),
            },
            _ => return Err(ParseError::conflict(line, segment)),
        };
    }
    Ok(current)
}

/// Writes `value` at `path` below `table`, failing if the key already exists.
pub(crate) fn insert_at(
    table: &mut Table,
    path: &[String],
    value: Node,
    line: usize,
) -> Result<(), ParseError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(ParseError::syntax(line, "expected a key"));
    };
    let target = descend(table, parents, Traverse::Dotted, line)?;
    if target.contains_key(last) {
        return Err(ParseError::KeyRedefinition {
            line,
            key: format_path(path),
        });
    }
    target.insert(last.clone(), value);
    Ok(())
}
