//! Record store backed by DuckDB
//!
//! Products live in a single `products` table keyed by `name`. The store is
//! exposed through the `RecordStore` trait so the update engine only sees
//! keyed get/insert/update/delete operations.

mod store;
mod types;

pub use store::ProductStore;
pub use types::{FieldUpdate, RecordStore};
