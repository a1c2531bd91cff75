//! # Solidafy Ledger
//!
//! Batch engine that applies a product change log to a DuckDB store and
//! exports aggregate reports.
//!
//! ## Features
//!
//! - **Change Log Parsing**: `=====`-delimited blocks of `key::value` lines
//! - **Update Operators**: price, quantity, availability, and removal with clamping
//! - **Product Loading**: JSON, JSON Lines, or CSV sources
//! - **Reports**: top-N, category aggregates, and price filter as JSON, CSV, or Parquet
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_ledger::{Job, JobConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = JobConfig::from_file("job.yaml")?;
//!     let summary = Job::new(config).run()?;
//!     println!("{} changes applied", summary.changes.applied);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────────────┐   ┌──────────┐
//! │  Loader  │──▶│   Store   │◀──│ UpdateEngine │◀──│ Changelog│
//! │ JSON/CSV │   │  DuckDB   │   │  operators   │   │  parser  │
//! └──────────┘   └─────┬─────┘   └──────────────┘   └──────────┘
//!                      │
//!                ┌─────▼─────┐   ┌──────────────┐
//!                │  Reports  │──▶│ ReportWriter │ JSON / CSV / Parquet
//!                └───────────┘   └──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Change log parsing
pub mod changelog;

/// Product store via DuckDB
pub mod database;

/// Update engine
pub mod engine;

/// Source decoders (JSON, JSONL, CSV)
pub mod decode;

/// Product loading
pub mod loader;

/// Report queries
pub mod report;

/// JSON/CSV/Parquet output
pub mod output;

/// Job configuration
pub mod config;

/// Job execution
pub mod job;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use changelog::{parse_change_log, ChangeRecord};
pub use config::JobConfig;
pub use database::{ProductStore, RecordStore};
pub use engine::{ApplyConfig, ApplyReport, UpdateEngine};
pub use job::{Job, RunSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
