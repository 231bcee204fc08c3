//! Parsing of value expressions: the right-hand side of `key = value`.
//!
//! [`parse_value`] receives the complete, comment-free text of one value
//! (which may span several lines for multi-line strings and arrays) and
//! returns the corresponding [`Node`]. Arrays and inline tables recurse.

use crate::error::ParseError;
use crate::key::{insert_at, parse_key_path};
use crate::scanner::{LexState, Lexeme, Quote};
use crate::{Node, Table};
use chrono::{NaiveDate, NaiveTime};

/// Deepest nesting of arrays and inline tables a value may have.
pub(crate) const MAX_NESTING: usize = 128;

/// Parses one value expression.
pub(crate) fn parse_value(text: &str, line: usize) -> Result<Node, ParseError> {
    parse_nested(text, line, 0)
}

fn parse_nested(text: &str, line: usize, depth: usize) -> Result<Node, ParseError> {
    let text = text.trim();
    match text {
        "" => return Err(ParseError::syntax(line, "expected a value")),
        "true" => return Ok(Node::Boolean(true)),
        "false" => return Ok(Node::Boolean(false)),
        _ => {}
    }

    if text.starts_with('"') || text.starts_with('\'') {
        return parse_string(text, line).map(Node::String);
    }
    if text.starts_with('[') || text.starts_with('{') {
        if depth >= MAX_NESTING {
            return Err(ParseError::syntax(
                line,
                format!("arrays and inline tables nest deeper than {}", MAX_NESTING),
            ));
        }
        return if text.starts_with('[') {
            parse_array(text, line, depth + 1)
        } else {
            parse_inline_table(text, line, depth + 1)
        };
    }
    if has_datetime_shape(text) {
        if !is_datetime(text) {
            return Err(ParseError::syntax(
                line,
                format!("invalid date or time `{}`", first_line(text)),
            ));
        }
        return Ok(Node::Datetime(text.to_string()));
    }
    parse_number(text, line)
}

/// Parses a complete quoted string token; anything after the closing quote
/// is an error.
pub(crate) fn parse_string(text: &str, line: usize) -> Result<String, ParseError> {
    let quote = if text.starts_with(r#"""""#) {
        Quote::MultiBasic
    } else if text.starts_with("'''") {
        Quote::MultiLiteral
    } else if text.starts_with('"') {
        Quote::Basic
    } else {
        Quote::Literal
    };
    let open = if quote.is_multiline() { 3 } else { 1 };

    // Let the lexer find where the string closes.
    let mut state = LexState::default();
    let mut pos = 0;
    let mut close = None;
    while let Some((lexeme, len)) = state.next(&text[pos..]) {
        if pos > 0 && lexeme == Lexeme::Delimiter {
            close = Some((pos, len));
            break;
        }
        pos += len;
    }
    let Some((close_at, close_len)) = close else {
        return Err(ParseError::syntax(
            line,
            format!("unterminated string `{}`", first_line(text)),
        ));
    };

    let trailing = text[close_at + close_len..].trim();
    if !trailing.is_empty() {
        return Err(ParseError::syntax(
            line,
            format!("unexpected `{}` after string", trailing),
        ));
    }

    // Quotes in a closing run longer than three are content.
    let content_end = close_at + close_len - open;
    let raw = &text[open..content_end];
    match quote {
        Quote::Basic | Quote::Literal if raw.contains('\n') => Err(ParseError::syntax(
            line,
            "single-line string contains a newline",
        )),
        Quote::Basic => unescape_basic(raw, line),
        Quote::Literal => Ok(raw.to_string()),
        Quote::MultiBasic => unescape_basic(trim_leading_newline(raw), line),
        Quote::MultiLiteral => Ok(trim_leading_newline(raw).to_string()),
    }
}

fn trim_leading_newline(raw: &str) -> &str {
    raw.strip_prefix('\n').unwrap_or(raw)
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}

/// Applies the basic-string escape table. A backslash at the end of a line
/// removes the line break and any whitespace that follows it. Escapes outside
/// the table are kept as written.
pub(crate) fn unescape_basic(raw: &str, line: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(ws) if ws == '\n' || ws == ' ' || ws == '\t' => {
                let mut saw_newline = ws == '\n';
                let mut skipped = String::from(ws);
                while let Some(&next) = chars.peek() {
                    if !next.is_whitespace() {
                        break;
                    }
                    saw_newline |= next == '\n';
                    skipped.push(next);
                    chars.next();
                }
                if !saw_newline {
                    // Not a line-ending backslash: keep it as written.
                    out.push('\\');
                    out.push_str(&skipped);
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return Err(ParseError::syntax(line, "string ends with a lone backslash")),
        }
    }
    Ok(out)
}

/// Splits the interior of an array or inline table on commas that are not
/// nested in brackets, braces or strings.
pub(crate) fn split_top_level(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut state = LexState::default();
    let mut start = 0;
    let mut pos = 0;
    while let Some((lexeme, len)) = state.next(&inner[pos..]) {
        if lexeme == Lexeme::Code(',') && state.depth() == 0 {
            parts.push(&inner[start..pos]);
            start = pos + len;
        }
        pos += len;
    }
    parts.push(&inner[start..]);
    parts
}

/// Splits `key = value` on the first `=` outside strings.
pub(crate) fn split_key_value(text: &str) -> Option<(&str, &str)> {
    let mut state = LexState::default();
    let mut pos = 0;
    while let Some((lexeme, len)) = state.next(&text[pos..]) {
        if lexeme == Lexeme::Code('=') {
            return Some((&text[..pos], &text[pos + len..]));
        }
        pos += len;
    }
    None
}

fn bracketed<'a>(text: &'a str, open: char, close: char, line: usize) -> Result<&'a str, ParseError> {
    text.strip_prefix(open)
        .and_then(|t| t.strip_suffix(close))
        .ok_or_else(|| {
            ParseError::syntax(
                line,
                format!("expected `{}` to close `{}`", close, first_line(text)),
            )
        })
}

fn parse_array(text: &str, line: usize, depth: usize) -> Result<Node, ParseError> {
    let inner = bracketed(text, '[', ']', line)?;
    if inner.trim().is_empty() {
        return Ok(Node::Array(Vec::new()));
    }

    let mut parts = split_top_level(inner);
    if parts.last().map_or(false, |p| p.trim().is_empty()) {
        parts.pop();
    }

    let mut items = Vec::with_capacity(parts.len());
    for part in parts {
        if part.trim().is_empty() {
            return Err(ParseError::syntax(line, "empty array element"));
        }
        items.push(parse_nested(part, line, depth)?);
    }
    Ok(Node::Array(items))
}

fn parse_inline_table(text: &str, line: usize, depth: usize) -> Result<Node, ParseError> {
    let inner = bracketed(text, '{', '}', line)?;
    let mut table = Table::new();
    if inner.trim().is_empty() {
        return Ok(Node::Table(table));
    }

    let mut parts = split_top_level(inner);
    if parts.last().map_or(false, |p| p.trim().is_empty()) {
        parts.pop();
    }

    for part in parts {
        let Some((key, value)) = split_key_value(part) else {
            return Err(ParseError::InvalidKeyValuePair {
                line,
                text: part.trim().to_string(),
            });
        };
        let path = parse_key_path(key, line)?;
        let value = parse_nested(value, line, depth)?;
        insert_at(&mut table, &path, value, line)?;
    }
    Ok(Node::Table(table))
}

/// Starts like `YYYY-` or `HH:`. No number can, so such a token is a date
/// or time, valid or not.
fn has_datetime_shape(text: &str) -> bool {
    let b = text.as_bytes();
    let digits = |n: usize| b.len() > n && b[..n].iter().all(u8::is_ascii_digit);
    (digits(4) && b[4] == b'-') || (digits(2) && b[2] == b':')
}

/// `YYYY-MM-DD` naming a real date (optionally followed by a time), or a
/// bare `HH:MM[:SS[.frac]]` local time.
pub(crate) fn is_datetime(text: &str) -> bool {
    let bytes = text.as_bytes();
    let date_like = bytes.len() >= 10
        && bytes[..10].iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
        && NaiveDate::parse_from_str(&text[..10], "%Y-%m-%d").is_ok();
    if date_like {
        let rest = &text[10..];
        return rest.is_empty()
            || (rest.starts_with(['T', 't', ' ']) && is_time_tail(&rest[1..]));
    }
    is_time_tail(text)
}

fn is_time_tail(text: &str) -> bool {
    // The clock part is at most HH:MM:SS; fraction and offset follow it.
    let clock_len = text
        .find(|c: char| !(c.is_ascii_digit() || c == ':'))
        .unwrap_or(text.len());
    let (clock, tail) = text.split_at(clock_len);
    let clock_ok = NaiveTime::parse_from_str(clock, "%H:%M:%S").is_ok()
        || NaiveTime::parse_from_str(clock, "%H:%M").is_ok();
    clock_ok
        && tail
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'Z' | 'z' | '+' | '-' | ':'))
}

fn parse_number(text: &str, line: usize) -> Result<Node, ParseError> {
    match text {
        "inf" | "+inf" => return Ok(Node::Float(f64::INFINITY)),
        "-inf" => return Ok(Node::Float(f64::NEG_INFINITY)),
        "nan" | "+nan" | "-nan" => return Ok(Node::Float(f64::NAN)),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return parse_radix(text, digits, radix, line);
        }
    }

    let numeric_chars = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_' | '+' | '-'));
    if !numeric_chars {
        return Err(ParseError::syntax(
            line,
            format!("unrecognized value `{}`", first_line(text)),
        ));
    }

    let shape = decimal_shape(text).ok_or_else(|| ParseError::invalid_number(line, text))?;
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    if shape.is_float {
        cleaned
            .parse::<f64>()
            .map(Node::Float)
            .map_err(|_| ParseError::invalid_number(line, text))
    } else {
        cleaned
            .parse::<i64>()
            .map(Node::Integer)
            .map_err(|_| ParseError::invalid_number(line, text))
    }
}

fn parse_radix(text: &str, digits: &str, radix: u32, line: usize) -> Result<Node, ParseError> {
    if !is_digit_run(digits, |c| c.is_digit(radix)) {
        return Err(ParseError::invalid_number(line, text));
    }
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    i64::from_str_radix(&cleaned, radix)
        .map(Node::Integer)
        .map_err(|_| ParseError::invalid_number(line, text))
}

struct DecimalShape {
    is_float: bool,
}

/// Checks `text` against the TOML decimal integer / float grammar.
fn decimal_shape(text: &str) -> Option<DecimalShape> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let (int_part, fraction) = match mantissa.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (mantissa, None),
    };

    if !is_digit_run(int_part, |c| c.is_ascii_digit()) {
        return None;
    }
    if int_part.len() > 1 && int_part.starts_with('0') {
        return None;
    }
    if let Some(fraction) = fraction {
        if !is_digit_run(fraction, |c| c.is_ascii_digit()) {
            return None;
        }
    }
    if let Some(exponent) = exponent {
        let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if !is_digit_run(digits, |c| c.is_ascii_digit()) {
            return None;
        }
    }

    Some(DecimalShape {
        is_float: fraction.is_some() || exponent.is_some(),
    })
}

/// Non-empty run of digits where each `_` sits between two digits.
fn is_digit_run(text: &str, is_digit: impl Fn(char) -> bool) -> bool {
    let mut prev_digit = false;
    for c in text.chars() {
        if c == '_' {
            if !prev_digit {
                return false;
            }
            prev_digit = false;
        } else if is_digit(c) {
            prev_digit = true;
        } else {
            return false;
        }
    }
    prev_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(text: &str) -> Node {
        parse_value(text, 1).unwrap()
    }

    #[test]
    fn test_booleans() {
        assert_eq!(value("true"), Node::Boolean(true));
        assert_eq!(value("false"), Node::Boolean(false));
        assert!(parse_value("True", 1).is_err());
    }

    #[test]
    fn test_basic_string_escapes() {
        assert_eq!(
            value(r#""tab\tquote\"slash\/back\\""#),
            Node::from("tab\tquote\"slash/back\\")
        );
        assert_eq!(value(r#""\b\f\n\r""#), Node::from("\u{8}\u{c}\n\r"));
        assert_eq!(value(r#""\u00E9""#), Node::from("\\u00E9"));
    }

    #[test]
    fn test_literal_strings_do_not_unescape() {
        assert_eq!(value(r"'C:\Users\nodejs'"), Node::from(r"C:\Users\nodejs"));
        assert_eq!(value("'''I [dw]on't need \\d{2}'''"), Node::from("I [dw]on't need \\d{2}"));
    }

    #[test]
    fn test_multiline_strings() {
        assert_eq!(
            value("\"\"\"\nRoses are red\nViolets are blue\"\"\""),
            Node::from("Roses are red\nViolets are blue")
        );
        assert_eq!(
            value("\"\"\"The quick \\\n    brown fox\"\"\""),
            Node::from("The quick brown fox")
        );
        assert_eq!(value("'''\nraw \\n text\n'''"), Node::from("raw \\n text\n"));
        assert_eq!(
            value("\"\"\"say \"hi\"\"\"\"\""),
            Node::from("say \"hi\"\"")
        );
    }

    #[test]
    fn test_string_errors() {
        assert!(parse_value(r#""open"#, 1).is_err());
        assert!(parse_value(r#""a" "b""#, 1).is_err());
        assert!(parse_value("'a'b", 1).is_err());
    }

    #[test]
    fn test_integers() {
        assert_eq!(value("+99"), Node::Integer(99));
        assert_eq!(value("-17"), Node::Integer(-17));
        assert_eq!(value("0"), Node::Integer(0));
        assert_eq!(value("1_000_000"), Node::Integer(1_000_000));
        assert_eq!(value("0xDEAD_beef"), Node::Integer(0xdead_beef));
        assert_eq!(value("0o755"), Node::Integer(0o755));
        assert_eq!(value("0b1101"), Node::Integer(13));
    }

    #[test]
    fn test_floats() {
        assert_eq!(value("3.1415"), Node::Float(3.1415));
        assert_eq!(value("-0.01"), Node::Float(-0.01));
        assert_eq!(value("5e+22"), Node::Float(5e22));
        assert_eq!(value("6.626e-34"), Node::Float(6.626e-34));
        assert_eq!(value("224_617.445_991"), Node::Float(224_617.445_991));
        assert_eq!(value("inf"), Node::Float(f64::INFINITY));
        assert_eq!(value("-inf"), Node::Float(f64::NEG_INFINITY));
        assert!(value("nan").as_float().map_or(false, f64::is_nan));
        assert!(value("-nan").as_float().map_or(false, f64::is_nan));
    }

    #[test]
    fn test_invalid_numbers() {
        for text in ["1__0", "_1", "1_", "01", "1.", ".5", "1e", "+-1", "1.2.3", "9223372036854775808", "0xZZ"] {
            let err = parse_value(text, 4).unwrap_err();
            assert_eq!(err, ParseError::invalid_number(4, text), "{}", text);
        }
    }

    #[test]
    fn test_unrecognized_value() {
        let err = parse_value("bare_word", 9).unwrap_err();
        assert!(matches!(err, ParseError::InvalidSyntax { line: 9, .. }));
    }

    #[test]
    fn test_datetimes_are_kept_as_text() {
        for text in [
            "1979-05-27",
            "1979-05-27T07:32:00Z",
            "1979-05-27T00:32:00.999999-07:00",
            "1979-05-27 07:32:00",
            "07:32:00",
            "00:32:00.999999",
        ] {
            assert_eq!(value(text), Node::Datetime(text.to_string()), "{}", text);
        }
        assert!(parse_value("2024-13-45", 1).is_err());
    }

    #[test]
    fn test_bad_dates_are_syntax_errors() {
        for text in ["2024-02-30", "1979-05-27Tjunk", "25:00:00", "1979-05-27 nope"] {
            match parse_value(text, 4) {
                Err(ParseError::InvalidSyntax { line: 4, msg }) => {
                    assert!(msg.contains(text), "{}", msg)
                }
                other => panic!("{}: {:?}", text, other),
            }
        }
        assert!(matches!(
            parse_value("1979-", 1),
            Err(ParseError::InvalidSyntax { .. })
        ));
        // Not date-shaped, so still a number error.
        assert!(matches!(
            parse_value("12-3", 1),
            Err(ParseError::InvalidNumberFormat { .. })
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        assert!(parse_value(&nested(MAX_NESTING), 1).is_ok());
        let err = parse_value(&nested(MAX_NESTING + 1), 2).unwrap_err();
        assert!(matches!(err, ParseError::InvalidSyntax { line: 2, .. }));

        let tables = |depth: usize| format!("{}1{}", "{ a = ".repeat(depth), " }".repeat(depth));
        assert!(parse_value(&tables(MAX_NESTING), 1).is_ok());
        assert!(matches!(
            parse_value(&tables(MAX_NESTING + 1), 1),
            Err(ParseError::InvalidSyntax { .. })
        ));
    }

    #[test]
    fn test_arrays() {
        assert_eq!(value("[]"), Node::Array(vec![]));
        assert_eq!(
            value("[ 1, 2, 3, ]"),
            Node::Array(vec![Node::from(1), Node::from(2), Node::from(3)])
        );
        assert_eq!(
            value("[ [1, 2], [\"a,b\", 'c]'] ]"),
            Node::Array(vec![
                Node::Array(vec![Node::from(1), Node::from(2)]),
                Node::Array(vec![Node::from("a,b"), Node::from("c]")]),
            ])
        );
        assert_eq!(
            value("[\n  1,\n  2\n]"),
            Node::Array(vec![Node::from(1), Node::from(2)])
        );
        assert!(parse_value("[1,,2]", 1).is_err());
        assert!(parse_value("[1, 2", 1).is_err());
    }

    #[test]
    fn test_inline_tables() {
        let node = value("{ first = \"Tom\", last = \"Preston-Werner\", pos.x = 1 }");
        let table = node.as_table().unwrap();
        assert_eq!(table.get("first"), Some(&Node::from("Tom")));
        assert_eq!(
            table.get("pos").and_then(|p| p.get("x")),
            Some(&Node::from(1))
        );
        assert_eq!(value("{}"), Node::Table(Table::new()));

        let err = parse_value("{ a = 1, a = 2 }", 3).unwrap_err();
        assert_eq!(
            err,
            ParseError::KeyRedefinition {
                line: 3,
                key: "a".into()
            }
        );
        assert!(matches!(
            parse_value("{ a }", 1),
            Err(ParseError::InvalidKeyValuePair { .. })
        ));
    }

    #[test]
    fn test_split_helpers() {
        assert_eq!(split_top_level("1, [2, 3], {a = 4}"), vec!["1", " [2, 3]", " {a = 4}"]);
        assert_eq!(split_key_value("\"a=b\" = 1"), Some(("\"a=b\" ", " 1")));
        assert_eq!(split_key_value("no equals"), None);
    }
}
