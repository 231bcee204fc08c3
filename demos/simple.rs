//! Basic TOML serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_tomlite::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
    tls: bool,
    owner: Owner,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Owner {
    name: String,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let server = Server {
        host: "localhost".to_string(),
        port: 8080,
        tls: false,
        owner: Owner {
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
        },
    };

    // Serialize to TOML
    let toml = to_string(&server)?;
    println!("TOML output:\n{}\n", toml);

    // Deserialize back to struct
    let server_back: Server = from_str(&toml)?;
    assert_eq!(server, server_back);
    println!("✓ Round-trip successful");

    Ok(())
}
