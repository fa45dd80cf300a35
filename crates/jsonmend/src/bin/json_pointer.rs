//! `json-pointer`: print the value a JSON Pointer (RFC 6901) addresses.
//!
//! Usage:
//!   json-pointer '/foo/0' < doc.json

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use jsonmend::json_cli::{lookup_pointer, CommonArgs};

#[derive(Parser)]
#[command(name = "json-pointer")]
#[command(version, about = "Look up a JSON Pointer in the document on stdin", long_about = None)]
struct Cli {
    /// JSON Pointer, e.g. `/foo/0`; empty for the whole document
    pointer: String,

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

    let out = lookup_pointer(&doc, &cli.pointer, cli.common.layout())?;
    println!("{out}");
    Ok(())
}
