//! Report module
//!
//! Fixed aggregate, group, and filter queries over the final store, and the
//! artifact set a run writes out.
//!
//! # Overview
//!
//! The report module provides:
//! - `ReportGenerator` - Individual queries (top-N, category aggregates, price filter)
//! - `ReportSet` - All four reports, generated together and written with a `ReportWriter`
//! - `ReportConfig` - Row count, threshold, and artifact format

mod queries;
mod types;

pub use queries::ReportGenerator;
pub use types::{artifacts, PriceStats, PricedProduct, QuantityStats, ReportConfig, TopProduct};

use crate::database::ProductStore;
use crate::error::Result;
use crate::output::ReportWriter;
use std::path::PathBuf;

/// All reports for one store snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSet {
    pub top_products: Vec<TopProduct>,
    pub price_analysis: Vec<PriceStats>,
    pub quantity_analysis: Vec<QuantityStats>,
    pub custom_query: Vec<PricedProduct>,
}

impl ReportSet {
    /// Run every report query against the store
    pub fn generate(store: &ProductStore, config: &ReportConfig) -> Result<Self> {
        let generator = ReportGenerator::new(store);
        Ok(Self {
            top_products: generator.top_by_update_count(config.top_n)?,
            price_analysis: generator.price_by_category()?,
            quantity_analysis: generator.quantity_by_category()?,
            custom_query: generator.price_above(config.price_threshold)?,
        })
    }

    /// Write each report as its own artifact, returning the paths written
    pub fn write(&self, writer: &ReportWriter) -> Result<Vec<PathBuf>> {
        let paths = vec![
            writer.write_rows(
                artifacts::TOP_PRODUCTS,
                &self.top_products,
                &["name", "update_count"],
            )?,
            writer.write_rows(
                artifacts::PRICE_ANALYSIS,
                &self.price_analysis,
                &[
                    "category",
                    "total_price",
                    "min_price",
                    "max_price",
                    "average_price",
                    "product_count",
                ],
            )?,
            writer.write_rows(
                artifacts::QUANTITY_ANALYSIS,
                &self.quantity_analysis,
                &[
                    "category",
                    "total_quantity",
                    "min_quantity",
                    "max_quantity",
                    "average_quantity",
                ],
            )?,
            writer.write_rows(artifacts::CUSTOM_QUERY, &self.custom_query, &["name", "price"])?,
        ];

        tracing::info!(dir = %writer.dir().display(), artifacts = paths.len(), "reports written");
        Ok(paths)
    }
}

#[cfg(test)]
mod tests;
