//! Customizing TOML output with EncodeOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_tomlite::{to_string_with_options, EncodeOptions};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    ports: Vec<u16>,
    database: Database,
}

#[derive(Debug, Serialize, Deserialize)]
struct Database {
    url: String,
    pool: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        ports: vec![8000, 8001],
        database: Database {
            url: "postgres://localhost/app".to_string(),
            pool: 8,
        },
    };

    // Default format (sorted keys, compact arrays)
    println!("Default:");
    let default = serde_tomlite::to_string(&config)?;
    println!("{}\n", default);

    // Field order as declared
    println!("Declaration order:");
    let ordered = EncodeOptions::new().with_sort_keys(false);
    println!("{}\n", to_string_with_options(&config, &ordered)?);

    // Indented tables with padded arrays
    println!("Indented:");
    let indented = EncodeOptions::pretty().with_array_spacing(true);
    print!("{}", to_string_with_options(&config, &indented)?);

    Ok(())
}
