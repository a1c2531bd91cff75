//! Source decoder module
//!
//! Supports: JSON, JSONL, CSV
//!
//! # Overview
//!
//! The decode module turns a product source file into JSON records. Each
//! record is later deserialized into a `Product` by the loader.

mod decoders;
mod types;

pub use decoders::{build_decoder, CsvDecoder, JsonDecoder, JsonlDecoder};
pub use types::{DecoderFormat, RecordDecoder};

#[cfg(test)]
mod tests;
