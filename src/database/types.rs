//! Store abstractions
//!
//! Defines the keyed store trait and the typed field patch applied by updates.

use crate::error::Result;
use crate::types::Product;

/// Keyed access to products
pub trait RecordStore {
    /// Insert a product unless its name already exists.
    ///
    /// Returns `true` if a row was inserted. Repeated names keep the first row.
    fn insert_if_absent(&mut self, product: &Product) -> Result<bool>;

    /// Look up a product by name
    fn get_by_key(&self, name: &str) -> Result<Option<Product>>;

    /// Apply a field patch. Returns `true` if a row was updated.
    fn update_fields(&mut self, name: &str, update: &FieldUpdate) -> Result<bool>;

    /// Delete a product. Returns `true` if a row was deleted.
    fn delete(&mut self, name: &str) -> Result<bool>;
}

/// Typed patch for the mutable product fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdate {
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub is_available: Option<bool>,
    /// Increment `update_count` by one
    pub bump_update_count: bool,
}

impl FieldUpdate {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price
    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the quantity
    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set availability
    #[must_use]
    pub fn available(mut self, available: bool) -> Self {
        self.is_available = Some(available);
        self
    }

    /// Count this patch as one applied update
    #[must_use]
    pub fn counted(mut self) -> Self {
        self.bump_update_count = true;
        self
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.quantity.is_none()
            && self.is_available.is_none()
            && !self.bump_update_count
    }
}
