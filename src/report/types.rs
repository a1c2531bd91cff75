//! Report row types and configuration

use crate::output::ReportFormat;
use serde::{Deserialize, Serialize};

/// One row of the top-N report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    /// Product name
    pub name: String,
    /// Changes applied to the product
    pub update_count: i64,
}

/// Price aggregates for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    /// Category, `None` for uncategorised products
    pub category: Option<String>,
    pub total_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub average_price: f64,
    pub product_count: i64,
}

/// Quantity aggregates for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityStats {
    /// Category, `None` for uncategorised products
    pub category: Option<String>,
    pub total_quantity: i64,
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub average_quantity: f64,
}

/// One row of the price filter report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedProduct {
    pub name: String,
    pub price: f64,
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows in the top-N report
    pub top_n: usize,
    /// Exclusive lower bound for the price filter
    pub price_threshold: f64,
    /// Artifact format
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            price_threshold: 1000.0,
            format: ReportFormat::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top-N row count
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// Artifact names, without extension
pub mod artifacts {
    pub const MISSING_PRODUCTS: &str = "missing_products";
    pub const TOP_PRODUCTS: &str = "top_products";
    pub const PRICE_ANALYSIS: &str = "price_analysis";
    pub const QUANTITY_ANALYSIS: &str = "quantity_analysis";
    pub const CUSTOM_QUERY: &str = "custom_query";
    pub const RUN_SUMMARY: &str = "run_summary";
}
