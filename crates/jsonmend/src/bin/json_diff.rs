//! `json-diff`: print the JSON Patch that turns one document into another.
//!
//! Usage:
//!   json-diff '<source-json>' '<target-json>'

use anyhow::Result;
use clap::Parser;
use jsonmend::json_cli::{diff_json, CommonArgs};

#[derive(Parser)]
#[command(name = "json-diff")]
#[command(version, about = "Print the JSON Patch between two documents", long_about = None)]
struct Cli {
    /// Source document
    source: String,

    /// Target document
    target: String,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.common.init_logging();

    let out = diff_json(&cli.source, &cli.target, cli.common.layout())?;
    println!("{out}");
    Ok(())
}
