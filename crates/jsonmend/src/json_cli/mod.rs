//! Command-line tools for JSON Pointer, Patch, and Merge Patch.
//!
//! Provides the core logic used by the binary entry points:
//! - `json-pointer`: look up a JSON Pointer in a document
//! - `json-patch`: apply a JSON Patch to a document
//! - `json-diff`: print the JSON Patch between two documents
//! - `json-merge-patch`: apply a JSON Merge Patch to a document
//!
//! Every function takes JSON text and returns JSON text.

use clap::Args;
use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use jsonmend_json_pointer::{Pointer, PointerError};

use crate::json_merge_patch::merge_patch;
use crate::json_patch::{apply_patch, from_json_patch, to_json_patch, PatchError};
use crate::json_patch_diff::diff;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON in {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error(transparent)]
    Pointer(#[from] PointerError),
}

/// Output layout for every tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    #[default]
    Pretty,
    Compact,
}

/// Flags shared by every binary.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Log level or filter directive, e.g. `debug` or `jsonmend=trace`
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

impl CommonArgs {
    pub fn layout(&self) -> Layout {
        if self.compact {
            Layout::Compact
        } else {
            Layout::Pretty
        }
    }

    /// Install a stderr subscriber filtered by `--log-level`.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn parse(what: &'static str, text: &str) -> Result<Value, CliError> {
    serde_json::from_str(text).map_err(|source| CliError::Json { what, source })
}

fn render(value: &Value, layout: Layout) -> Result<String, CliError> {
    let out = match layout {
        Layout::Pretty => serde_json::to_string_pretty(value),
        Layout::Compact => serde_json::to_string(value),
    };
    out.map_err(|source| CliError::Json {
        what: "output",
        source,
    })
}

// ── json-pointer ──────────────────────────────────────────────────────────

/// Look up `pointer` in the document `doc`.
pub fn lookup_pointer(doc: &str, pointer: &str, layout: Layout) -> Result<String, CliError> {
    let doc = parse("document", doc)?;
    let value = Pointer::parse(pointer)?.get(&doc)?;
    render(&value, layout)
}

// ── json-patch ────────────────────────────────────────────────────────────

/// Apply the JSON Patch text `patch` to the document `doc`.
pub fn apply_json_patch(doc: &str, patch: &str, layout: Layout) -> Result<String, CliError> {
    let doc = parse("document", doc)?;
    let patch = from_json_patch(&parse("patch", patch)?)?;
    let result = apply_patch(&doc, &patch)?;
    render(&result, layout)
}

// ── json-diff ─────────────────────────────────────────────────────────────

/// The JSON Patch that turns `src` into `dst`.
pub fn diff_json(src: &str, dst: &str, layout: Layout) -> Result<String, CliError> {
    let src = parse("source", src)?;
    let dst = parse("target", dst)?;
    render(&to_json_patch(&diff(&src, &dst)), layout)
}

// ── json-merge-patch ──────────────────────────────────────────────────────

/// Apply the merge patch text `patch` to the document `doc`.
pub fn apply_merge_patch(doc: &str, patch: &str, layout: Layout) -> Result<String, CliError> {
    let doc = parse("document", doc)?;
    let patch = parse("patch", patch)?;
    render(&merge_patch(&doc, &patch), layout)
}

// ── Tests ─────────────────────────────────────────────────────────────────
