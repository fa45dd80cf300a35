//! Wire codecs for JSON Patch documents.

pub mod json;
