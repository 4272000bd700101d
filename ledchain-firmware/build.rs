//! Build script for ledchain-firmware
//!
//! Places memory.x on the linker path and rejects a malformed chain.toml
//! before it gets baked into the image.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());

    for script in ["--nmagic", "-Tlink.x", "-Tlink-rp.x", "-Tdefmt.x"] {
        println!("cargo:rustc-link-arg-bins={script}");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=chain.toml");

    let problems = check_chain_toml();
    if !problems.is_empty() {
        let body: Vec<String> = problems.iter().map(|p| format!("║  • {p:<62} ║")).collect();
        panic!(
            "\n╔{bar}╗\n║  {title:<66}║\n╠{bar}╣\n{}\n╚{bar}╝\n",
            body.join("\n"),
            bar = "═".repeat(68),
            title = "ERROR: chain.toml rejected",
        );
    }
}

/// Problems found in chain.toml, empty when it is usable
fn check_chain_toml() -> Vec<String> {
    let text = match fs::read_to_string("chain.toml") {
        Ok(text) => text,
        Err(e) => return vec![format!("cannot read chain.toml: {e}")],
    };
    let doc = match toml::from_str::<toml::Table>(&text) {
        Ok(doc) => doc,
        Err(e) => return e.to_string().lines().map(str::to_owned).collect(),
    };

    let mut problems: Vec<String> = doc
        .keys()
        .filter(|key| *key != "chain")
        .map(|key| format!("unknown section [{key}]"))
        .collect();

    let Some(chain) = doc.get("chain").and_then(toml::Value::as_table) else {
        problems.push("missing [chain] table".to_owned());
        return problems;
    };

    for (key, value) in chain {
        let problem = match (key.as_str(), value) {
            ("device_count", toml::Value::Integer(n)) if (1..=8).contains(n) => None,
            ("device_count", _) => Some("device_count must be an integer 1-8"),
            ("intensity", toml::Value::Integer(n)) if (0..=15).contains(n) => None,
            ("intensity", _) => Some("intensity must be an integer 0-15"),
            ("start_active", toml::Value::Boolean(_)) => None,
            ("start_active", _) => Some("start_active must be true or false"),
            _ => {
                problems.push(format!("unknown key '{key}'"));
                None
            }
        };
        problems.extend(problem.map(str::to_owned));
    }
    if !chain.contains_key("device_count") {
        problems.push("device_count is required".to_owned());
    }

    problems
}
