//! Product loader module
//!
//! Reads the product source file and inserts each product into the store.
//!
//! # Overview
//!
//! The loader module provides:
//! - `read_products` - Read and decode a JSON, JSONL, or CSV product file
//! - `decode_products` - Decode an in-memory body into products
//! - `load_products` - Insert products, keeping the first row per name

mod parser;
mod types;

pub use parser::{decode_products, load_products, read_products};
pub use types::{DecodedProducts, LoadStats};

#[cfg(test)]
mod tests;
