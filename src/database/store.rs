//! DuckDB-based product store
//!
//! Holds one connection for the whole run, either in memory or on disk.

use super::types::{FieldUpdate, RecordStore};
use crate::error::{Error, Result};
use crate::types::Product;
use duckdb::types::Value as DbValue;
use duckdb::{params, params_from_iter, Connection, OptionalExt, Row};
use std::path::{Path, PathBuf};

const CREATE_SCHEMA: &str = "
    CREATE SEQUENCE IF NOT EXISTS products_id_seq START 1;
    CREATE TABLE IF NOT EXISTS products (
        id BIGINT DEFAULT nextval('products_id_seq'),
        name VARCHAR PRIMARY KEY,
        price DOUBLE NOT NULL,
        quantity BIGINT NOT NULL,
        category VARCHAR,
        origin VARCHAR,
        is_available BOOLEAN NOT NULL DEFAULT false,
        views BIGINT NOT NULL DEFAULT 0,
        update_count BIGINT NOT NULL DEFAULT 0
    );
";

const DROP_SCHEMA: &str = "
    DROP TABLE IF EXISTS products;
    DROP SEQUENCE IF EXISTS products_id_seq;
";

const PRODUCT_COLUMNS: &str =
    "name, price, quantity, category, origin, is_available, views, update_count";

/// Product table in a DuckDB database
pub struct ProductStore {
    /// DuckDB connection
    conn: Connection,
    /// Database file, `None` for in-memory
    path: Option<PathBuf>,
}

impl ProductStore {
    /// Open an in-memory store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::config(format!("Failed to create DuckDB connection: {e}")))?;
        Self::with_connection(conn, None)
    }

    /// Open (or create) a file-backed store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(|e| {
            Error::config(format!(
                "Failed to open DuckDB database '{}': {e}",
                path.display()
            ))
        })?;
        Self::with_connection(conn, Some(path.to_path_buf()))
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(CREATE_SCHEMA)
            .map_err(|e| Error::store(format!("Failed to create products table: {e}")))?;
        Ok(Self { conn, path })
    }

    /// Drop and recreate the products table
    pub fn reset(&self) -> Result<()> {
        self.conn
            .execute_batch(DROP_SCHEMA)
            .map_err(|e| Error::store(format!("Failed to drop products table: {e}")))?;
        self.conn
            .execute_batch(CREATE_SCHEMA)
            .map_err(|e| Error::store(format!("Failed to create products table: {e}")))?;
        Ok(())
    }

    /// Database file path, if file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of products
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Whether the store holds no products
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Whether a product with this name exists
    pub fn contains(&self, name: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM products WHERE name = ?",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All products in load order
    pub fn all(&self) -> Result<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let products = stmt
            .query_map([], product_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Underlying connection, for read-only report queries
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RecordStore for ProductStore {
    fn insert_if_absent(&mut self, product: &Product) -> Result<bool> {
        if self.contains(&product.name)? {
            return Ok(false);
        }

        let sql = format!("INSERT INTO products ({PRODUCT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)");
        self.conn.execute(
            &sql,
            params![
                product.name,
                product.price,
                product.quantity,
                product.category,
                product.origin,
                product.is_available,
                product.views,
                product.update_count,
            ],
        )?;
        Ok(true)
    }

    fn get_by_key(&self, name: &str) -> Result<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ?");
        let product = self
            .conn
            .query_row(&sql, params![name], product_from_row)
            .optional()?;
        Ok(product)
    }

    fn update_fields(&mut self, name: &str, update: &FieldUpdate) -> Result<bool> {
        if update.is_empty() {
            return Ok(false);
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<DbValue> = Vec::new();

        if let Some(price) = update.price {
            assignments.push("price = ?");
            values.push(DbValue::Double(price));
        }
        if let Some(quantity) = update.quantity {
            assignments.push("quantity = ?");
            values.push(DbValue::BigInt(quantity));
        }
        if let Some(available) = update.is_available {
            assignments.push("is_available = ?");
            values.push(DbValue::Boolean(available));
        }
        if update.bump_update_count {
            assignments.push("update_count = update_count + 1");
        }
        values.push(DbValue::Text(name.to_string()));

        let sql = format!(
            "UPDATE products SET {} WHERE name = ?",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(values))?;
        Ok(changed > 0)
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE name = ?", params![name])?;
        Ok(changed > 0)
    }
}

/// Map a row selected with `PRODUCT_COLUMNS` to a product
fn product_from_row(row: &Row<'_>) -> duckdb::Result<Product> {
    Ok(Product {
        name: row.get(0)?,
        price: row.get(1)?,
        quantity: row.get(2)?,
        category: row.get(3)?,
        origin: row.get(4)?,
        is_available: row.get(5)?,
        views: row.get(6)?,
        update_count: row.get(7)?,
    })
}
