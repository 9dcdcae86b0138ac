//! Custom cargo commands for postsearch.
//!
//! Usage:
//!   cargo xtask check       - cargo check + tests + clippy
//!   cargo xtask test        - Run all tests
//!   cargo xtask bench       - Run benchmarks
//!   cargo xtask build-wasm  - Build the browser bundle
//!   cargo xtask weights     - Check the documented weights against the code

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("check") => check()?,
        Some("test") => test()?,
        Some("bench") => bench()?,
        Some("build-wasm") => build_wasm()?,
        Some("weights") => weights()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  check       Quick check (cargo check + test + clippy + weights)
  test        Run all Rust tests, including the no-default-features build
  bench       Run benchmarks
  build-wasm  Build the wasm32 library with the `wasm` feature
  weights     Check the weight table in src/lib.rs against src/scoring/core.rs
"#
    );
}

fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/4] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/4] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/4] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;

    println!("[4/4] scoring weights...");
    weights()?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

fn test() -> Result<()> {
    run_cargo(&["test"])?;
    // Exercise the ASCII-only normalizer the browser build uses
    run_cargo(&["test", "--lib", "--no-default-features"])
}

fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

fn build_wasm() -> Result<()> {
    run_cargo(&[
        "build",
        "--lib",
        "--release",
        "--target",
        "wasm32-unknown-unknown",
        "--no-default-features",
        "--features",
        "wasm",
    ])?;
    println!("✓ target/wasm32-unknown-unknown/release/postsearch.wasm");
    Ok(())
}

/// The crate docs carry a weight table; make sure it didn't drift.
fn weights() -> Result<()> {
    let root = project_root()?;
    let core = std::fs::read_to_string(root.join("src/scoring/core.rs"))
        .context("Failed to read src/scoring/core.rs")?;
    let lib = std::fs::read_to_string(root.join("src/lib.rs"))
        .context("Failed to read src/lib.rs")?;

    let checks = [
        ("TITLE_WEIGHT", "title token"),
        ("KEYWORD_WEIGHT", "keyword containing the term"),
        ("DESCRIPTION_WEIGHT", "description token"),
    ];

    let mut errors = Vec::new();
    for (constant, row) in checks {
        let code = extract_constant(&core, constant)
            .with_context(|| format!("{} not found in scoring/core.rs", constant))?;
        let documented = extract_table_weight(&lib, row)
            .with_context(|| format!("row '{}' not found in lib.rs docs", row))?;
        if (code - documented).abs() > f64::EPSILON {
            errors.push(format!(
                "{}: code says {}, docs say {}",
                constant, code, documented
            ));
        }
    }

    if !errors.is_empty() {
        for e in &errors {
            eprintln!("  ✗ {}", e);
        }
        bail!("Weight table out of sync with scoring constants");
    }

    println!("  ✓ title/keyword/description weights match the docs");
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("No current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// `pub const NAME: f64 = 3.0;` -> 3.0
fn extract_constant(source: &str, name: &str) -> Option<f64> {
    let prefix = format!("pub const {}: f64 =", name);
    source.lines().find_map(|line| {
        let rest = line.trim().strip_prefix(&prefix)?;
        rest.trim().trim_end_matches(';').trim().parse().ok()
    })
}

/// `//! | title token | 3 |` -> 3.0
fn extract_table_weight(source: &str, row: &str) -> Option<f64> {
    source.lines().find_map(|line| {
        let cells: Vec<&str> = line
            .trim_start_matches("//!")
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        match cells.as_slice() {
            [label, weight] if *label == row => weight.parse().ok(),
            _ => None,
        }
    })
}
