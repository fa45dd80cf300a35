//! `json-patch`: apply a JSON Patch (RFC 6902) to a document.
//!
//! Usage:
//!   json-patch '<patch-array-json>' < doc.json
//!
//! The document is read from stdin.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use jsonmend::json_cli::{apply_json_patch, CommonArgs};

#[derive(Parser)]
#[command(name = "json-patch")]
#[command(version, about = "Apply a JSON Patch to the document on stdin", long_about = None)]
struct Cli {
    /// JSON Patch array
    patch: String,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.common.init_logging();

    let mut doc = String::new();
    io::stdin()
        .read_to_string(&mut doc)
        .context("failed to read document from stdin")?;

    let out = apply_json_patch(&doc, &cli.patch, cli.common.layout())?;
    println!("{out}");
    Ok(())
}
