//! Canned report queries over the products table

use super::types::{PriceStats, PricedProduct, QuantityStats, TopProduct};
use crate::database::ProductStore;
use crate::error::Result;
use duckdb::params;

const TOP_BY_UPDATE_COUNT: &str = "
    SELECT name, update_count
    FROM products
    ORDER BY update_count DESC, id ASC
";

const PRICE_BY_CATEGORY: &str = "
    SELECT category,
           SUM(price),
           MIN(price),
           MAX(price),
           AVG(price),
           COUNT(*)
    FROM products
    GROUP BY category
    ORDER BY category NULLS FIRST
";

// SUM over BIGINT widens to HUGEINT in DuckDB
const QUANTITY_BY_CATEGORY: &str = "
    SELECT category,
           CAST(SUM(quantity) AS BIGINT),
           MIN(quantity),
           MAX(quantity),
           AVG(quantity)
    FROM products
    GROUP BY category
    ORDER BY category NULLS FIRST
";

const PRICE_ABOVE: &str = "
    SELECT name, price
    FROM products
    WHERE price > ?
    ORDER BY id
";

/// Read-only report queries
pub struct ReportGenerator<'a> {
    store: &'a ProductStore,
}

impl<'a> ReportGenerator<'a> {
    /// Create a generator over a store
    pub fn new(store: &'a ProductStore) -> Self {
        Self { store }
    }

    /// Products with the most applied changes, ties in load order
    pub fn top_by_update_count(&self, n: usize) -> Result<Vec<TopProduct>> {
        let sql = format!("{TOP_BY_UPDATE_COUNT} LIMIT {n}");
        let mut stmt = self.store.connection().prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TopProduct {
                    name: row.get(0)?,
                    update_count: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Price aggregates per category
    pub fn price_by_category(&self) -> Result<Vec<PriceStats>> {
        let mut stmt = self.store.connection().prepare(PRICE_BY_CATEGORY)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PriceStats {
                    category: row.get(0)?,
                    total_price: row.get(1)?,
                    min_price: row.get(2)?,
                    max_price: row.get(3)?,
                    average_price: row.get(4)?,
                    product_count: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Quantity aggregates per category
    pub fn quantity_by_category(&self) -> Result<Vec<QuantityStats>> {
        let mut stmt = self.store.connection().prepare(QUANTITY_BY_CATEGORY)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(QuantityStats {
                    category: row.get(0)?,
                    total_quantity: row.get(1)?,
                    min_quantity: row.get(2)?,
                    max_quantity: row.get(3)?,
                    average_quantity: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Products priced strictly above `threshold`
    pub fn price_above(&self, threshold: f64) -> Result<Vec<PricedProduct>> {
        let mut stmt = self.store.connection().prepare(PRICE_ABOVE)?;
        let rows = stmt
            .query_map(params![threshold], |row| {
                Ok(PricedProduct {
                    name: row.get(0)?,
                    price: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
