use serde_tomlite::{encode, parse, Node, ParseError, Table};

fn get<'a>(doc: &'a Table, path: &str) -> Option<&'a Node> {
    let mut segments = path.split('.');
    let first = doc.get(segments.next()?)?;
    segments.try_fold(first, |node, key| node.get(key))
}

fn roundtrip(input: &str) -> Table {
    let doc = parse(input).unwrap();
    let encoded = encode(&doc).unwrap();
    println!("Encoded:\n{}", encoded);
    let back = parse(&encoded).unwrap();
    assert_eq!(back, doc);
    doc
}

#[test]
fn test_key_redefinition() {
    assert_eq!(
        parse("key = 1\nkey = 2"),
        Err(ParseError::KeyRedefinition {
            line: 2,
            key: "key".to_string()
        })
    );
}

#[test]
fn test_table_redefinition() {
    assert_eq!(
        parse("[table]\n[table]"),
        Err(ParseError::TableRedefinition {
            line: 2,
            path: "table".to_string()
        })
    );

    let doc = parse("[[table]]\n[[table]]").unwrap();
    assert_eq!(
        doc.get("table"),
        Some(&Node::Array(vec![
            Node::Table(Table::new()),
            Node::Table(Table::new())
        ]))
    );
}

#[test]
fn test_dotted_key_nesting() {
    let doc = parse("animal.type.name = \"pug\"").unwrap();
    assert_eq!(get(&doc, "animal.type.name"), Some(&Node::from("pug")));
    assert!(get(&doc, "animal").map_or(false, Node::is_table));
}

#[test]
fn test_array_of_tables() {
    let input = r#"
[[products]]
name = "Hammer"
sku = 738594937

[[products]]
name = "Nail"
sku = 284758393
"#;
    let doc = roundtrip(input);
    let products = doc.get("products").and_then(Node::as_array).unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].get("name"), Some(&Node::from("Hammer")));
    assert_eq!(products[0].get("sku"), Some(&Node::Integer(738594937)));
    assert_eq!(products[1].get("name"), Some(&Node::from("Nail")));
    assert_eq!(products[1].get("sku"), Some(&Node::Integer(284758393)));
}

#[test]
fn test_multiline_string_trimming() {
    let doc = parse("str = \"\"\"\nRoses are red\nViolets are blue\"\"\"").unwrap();
    assert_eq!(
        doc.get("str"),
        Some(&Node::from("Roses are red\nViolets are blue"))
    );

    let doc = parse("str = '''\n  indented\n    raw \\n '''").unwrap();
    assert_eq!(doc.get("str"), Some(&Node::from("  indented\n    raw \\n ")));
}

#[test]
fn test_malformed_header_is_reported() {
    let err = parse("[[plugins]\nname = \"broken\"").unwrap_err();
    assert_eq!(err.line(), 1);
    assert!(matches!(err, ParseError::InvalidSyntax { .. }));
}

#[test]
fn test_unterminated_constructs() {
    assert_eq!(
        parse("a = 1\ns = \"\"\"\nnever closed"),
        Err(ParseError::UnterminatedMultilineString { line: 2 })
    );
    assert_eq!(
        parse("list = [\n  1,\n  2,\n"),
        Err(ParseError::UnterminatedMultilineArray { line: 1 })
    );
}

#[test]
fn test_invalid_numbers() {
    for (input, text) in [("n = 1__000", "1__000"), ("n = 007", "007"), ("n = 1e", "1e")] {
        assert_eq!(
            parse(input),
            Err(ParseError::InvalidNumberFormat {
                line: 1,
                text: text.to_string()
            })
        );
    }
}

#[test]
fn test_key_path_conflict() {
    assert_eq!(
        parse("fruit = \"apple\"\n[fruit.color]"),
        Err(ParseError::KeyPathConflict {
            line: 2,
            segment: "fruit".to_string()
        })
    );
}

#[test]
fn test_invalid_key_value_pair() {
    assert!(matches!(
        parse("title = \"ok\"\njust some words"),
        Err(ParseError::InvalidKeyValuePair { line: 2, .. })
    ));
}

#[test]
fn test_comments_everywhere() {
    let input = r##"
# full line comment
key = "value # inside" # trailing
[section] # after header
list = [ # after open bracket
  1, # first
  2  # second
] # after close
"##;
    let doc = roundtrip(input);
    assert_eq!(doc.get("key"), Some(&Node::from("value # inside")));
    assert_eq!(
        get(&doc, "section.list"),
        Some(&Node::Array(vec![Node::from(1), Node::from(2)]))
    );
}

#[test]
fn test_all_value_kinds_roundtrip() {
    let input = r#"
basic = "I'm a string. \"You can quote me\". Tab\tnewline\n"
literal = 'C:\Users\nodejs\templates'
multi_basic = """
The quick brown \
  fox jumps over \
    the lazy dog."""
multi_literal = '''
The first newline is
trimmed in raw strings.
'''
int = +99
neg = -17
big = 5_349_221
hex = 0xDEADBEEF
oct = 0o755
bin = 0b11010110
float = -3.1415
exp = 5e+22
pos_inf = +inf
neg_inf = -inf
yes = true
date = 1979-05-27
time = 07:32:00
local = 1979-05-27T07:32:00
nested = [ [ 1, 2 ], [ "a", 'b' ], [ { x = 1 }, { y = [] } ] ]
inline = { name = { first = "Tom", last = "Preston-Werner" }, empty = {} }
"#;
    let doc = roundtrip(input);
    assert_eq!(doc.get("multi_basic"), Some(&Node::from("The quick brown fox jumps over the lazy dog.")));
    assert_eq!(doc.get("hex"), Some(&Node::Integer(0xDEADBEEF)));
    assert_eq!(doc.get("oct"), Some(&Node::Integer(0o755)));
    assert_eq!(doc.get("bin"), Some(&Node::Integer(0b11010110)));
    assert_eq!(doc.get("pos_inf"), Some(&Node::Float(f64::INFINITY)));
    assert_eq!(doc.get("time"), Some(&Node::Datetime("07:32:00".to_string())));
    assert_eq!(
        doc.get("literal"),
        Some(&Node::from(r"C:\Users\nodejs\templates"))
    );
    assert_eq!(get(&doc, "inline.name.last"), Some(&Node::from("Preston-Werner")));
}

#[test]
fn test_float_specials_roundtrip() {
    let doc = roundtrip("x = nan\ny = -inf\nz = [nan, +nan, -nan]");
    assert!(doc.get("x").and_then(Node::as_float).map_or(false, f64::is_nan));
    assert_eq!(doc.get("y"), Some(&Node::Float(f64::NEG_INFINITY)));
    assert_eq!(
        doc.get("z"),
        Some(&Node::Array(vec![Node::Float(f64::NAN); 3]))
    );
    assert_eq!(encode(&doc).unwrap(), "x = nan\ny = -inf\nz = [nan, nan, nan]");
}

#[test]
fn test_date_shaped_values_that_are_not_dates() {
    for (input, bad) in [
        ("d = 2024-02-30", "2024-02-30"),
        ("d = 1979-05-27Tjunk", "1979-05-27Tjunk"),
        ("t = 24:61:00", "24:61:00"),
    ] {
        match parse(input) {
            Err(ParseError::InvalidSyntax { line: 1, msg }) => assert!(msg.contains(bad), "{}", msg),
            other => panic!("{}: {:?}", input, other),
        }
    }
    assert_eq!(
        parse("d = 2024-02-29").unwrap().get("d"),
        Some(&Node::Datetime("2024-02-29".to_string()))
    );
}

#[test]
fn test_deep_nesting_is_an_error() {
    let deep = format!("a = {}{}", "[".repeat(50_000), "]".repeat(50_000));
    assert!(matches!(
        parse(&deep),
        Err(ParseError::InvalidSyntax { line: 1, .. })
    ));

    let multiline = format!("\n\nb = {}\n{}", "[\n".repeat(200), "]".repeat(200));
    assert!(matches!(
        parse(&multiline),
        Err(ParseError::InvalidSyntax { line: 3, .. })
    ));

    let shallow = format!("a = {}{}", "[".repeat(10), "]".repeat(10));
    assert!(roundtrip(&shallow).contains_key("a"));
}

#[test]
fn test_quoted_keys() {
    let input = r#"
"127.0.0.1" = "localhost"
'quoted "value"' = 1
site."google.com" = true
[dog."tater.man"]
type.name = "pug"
"#;
    let doc = roundtrip(input);
    assert_eq!(doc.get("127.0.0.1"), Some(&Node::from("localhost")));
    assert_eq!(doc.get("quoted \"value\""), Some(&Node::from(1)));
    let site = doc.get("site").and_then(Node::as_table).unwrap();
    assert_eq!(site.get("google.com"), Some(&Node::from(true)));
    let tater = doc
        .get("dog")
        .and_then(|d| d.get("tater.man"))
        .and_then(|t| t.get("type"))
        .and_then(|t| t.get("name"));
    assert_eq!(tater, Some(&Node::from("pug")));
}

#[test]
fn test_nested_array_of_tables() {
    let input = r#"
[[fruits]]
name = "apple"

[fruits.physical]
color = "red"
shape = "round"

[[fruits.varieties]]
name = "red delicious"

[[fruits.varieties]]
name = "granny smith"

[[fruits]]
name = "banana"

[[fruits.varieties]]
name = "plantain"
"#;
    let doc = roundtrip(input);
    let fruits = doc.get("fruits").and_then(Node::as_array).unwrap();
    assert_eq!(fruits.len(), 2);
    let varieties = |i: usize| {
        fruits[i]
            .get("varieties")
            .and_then(Node::as_array)
            .map(Vec::len)
    };
    assert_eq!(varieties(0), Some(2));
    assert_eq!(varieties(1), Some(1));
    assert_eq!(
        fruits[0].get("physical").and_then(|p| p.get("shape")),
        Some(&Node::from("round"))
    );
}

#[test]
fn test_subtable_redefined_within_one_array_entry() {
    let input = "[[a]]\n[a.b]\nx = 1\n[a.b]\ny = 2";
    assert_eq!(
        parse(input),
        Err(ParseError::TableRedefinition {
            line: 4,
            path: "a.b".to_string()
        })
    );
}

#[test]
fn test_crlf_line_endings() {
    let doc = parse("a = 1\r\n[t]\r\nb = \"x\"\r\n").unwrap();
    assert_eq!(get(&doc, "t.b"), Some(&Node::from("x")));
}

#[test]
fn test_empty_and_comment_only_documents() {
    assert_eq!(parse("").unwrap(), Table::new());
    assert_eq!(parse("# nothing\n\n   \n").unwrap(), Table::new());
    assert_eq!(encode(&Table::new()).unwrap(), "");
}
