//! Reading a hand-written plugin manifest and writing a lock file for it.
//!
//! Run with: cargo run --example lock_file

use serde::{Deserialize, Serialize};
use serde_tomlite::{from_str, to_string};
use std::error::Error;

const MANIFEST: &str = r#"
# plugins for the terminal multiplexer
[[plugins]]
name = "tmux-sensible"
url = "https://github.com/tmux-plugins/tmux-sensible"

[[plugins]]
name = "tmux-resurrect"
url = "https://github.com/tmux-plugins/tmux-resurrect"
branch = 'main' # pinned
"#;

#[derive(Debug, Deserialize)]
struct Manifest {
    plugins: Vec<Plugin>,
}

#[derive(Debug, Deserialize)]
struct Plugin {
    name: String,
    url: String,
    branch: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct LockFile {
    version: u32,
    plugins: Vec<LockedPlugin>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct LockedPlugin {
    name: String,
    url: String,
    branch: Option<String>,
    commit: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let manifest: Manifest = from_str(MANIFEST)?;
    println!("Manifest lists {} plugins\n", manifest.plugins.len());

    let lock = LockFile {
        version: 1,
        plugins: manifest
            .plugins
            .into_iter()
            .enumerate()
            .map(|(i, plugin)| LockedPlugin {
                name: plugin.name,
                url: plugin.url,
                branch: plugin.branch,
                commit: format!("{:07x}", (i + 1) * 0x1f3a5b),
            })
            .collect(),
    };

    // Absent branches are left out of the output entirely
    let toml = to_string(&lock)?;
    println!("Lock file:\n{}\n", toml);

    let lock_back: LockFile = from_str(&toml)?;
    assert_eq!(lock, lock_back);
    println!("✓ Lock file reads back unchanged");

    Ok(())
}
