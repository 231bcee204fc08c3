//! Working with Node for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_tomlite::{encode_value, parse, to_value, toml, Node};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build config dynamically with toml! macro
    let config = toml!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Config as TOML:\n{}\n", encode_value(&config)?);

    // Access values dynamically
    if let Some(Node::String(host)) = config.get("host") {
        println!("Accessing field 'host': {}", host);
    }

    if let Some(port) = config.get("port").and_then(Node::as_integer) {
        println!("Accessing field 'port': {}", port);
    }

    if let Some(Node::Array(features)) = config.get("features") {
        println!("Accessing field 'features': {} items\n", features.len());
    }

    // Walk a parsed document
    let doc = parse("[owner]\nname = \"Tom\"\ndob = 1979-05-27T07:32:00-08:00")?;
    for (key, node) in doc.iter() {
        println!("[{}] is a {}", key, node.type_name());
    }
    if let Some(dob) = doc.get("owner").and_then(|o| o.get("dob")) {
        println!("  dob = {:?}\n", dob.as_datetime());
    }

    // Convert existing struct to Node
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as Node:\n{}\n", encode_value(&user_value)?);

    // Runtime type checking
    println!("Type checks:");
    println!("  is_table:  {}", user_value.is_table());
    println!("  is_array:  {}", user_value.is_array());
    println!("  is_string: {}", user_value.is_string());

    Ok(())
}
