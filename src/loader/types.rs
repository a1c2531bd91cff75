//! Loader types

use crate::types::Product;
use serde::Serialize;

/// Products decoded from a source body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedProducts {
    /// Records that deserialized into products, in source order
    pub products: Vec<Product>,
    /// Records that did not
    pub rejected: usize,
}

/// Counters for the load phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Records read from the source
    pub decoded: usize,
    /// Records that failed to deserialize
    pub rejected: usize,
    /// Products inserted
    pub inserted: usize,
    /// Products ignored because the name was already loaded
    pub duplicates: usize,
}
