//! Output module
//!
//! Writes report artifacts to disk.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Converting report rows to Arrow RecordBatches with a fixed column order
//! - Writing JSON, CSV, and Parquet report files

mod schema;
mod writer;

pub use schema::{infer_schema, json_to_arrow};
pub use writer::{write_batch_to_csv, ReportFormat, ReportWriter};
