//! `json-merge-patch`: apply a JSON Merge Patch (RFC 7396) to a document.
//!
//! Usage:
//!   json-merge-patch '<patch-json>' < doc.json

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use jsonmend::json_cli::{apply_merge_patch, CommonArgs};

#[derive(Parser)]
#[command(name = "json-merge-patch")]
#[command(version, about = "Apply a JSON Merge Patch to the document on stdin", long_about = None)]
struct Cli {
    /// Merge patch document
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

    let out = apply_merge_patch(&doc, &cli.patch, cli.common.layout())?;
    println!("{out}");
    Ok(())
}
