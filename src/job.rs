//! Job execution
//!
//! Runs one batch: load products, apply the change log, write reports.
//! Phases are strictly sequential and share one store.

use crate::changelog::{parse_change_log, read_change_log};
use crate::config::JobConfig;
use crate::database::ProductStore;
use crate::engine::{ApplyStats, UpdateEngine};
use crate::error::{Error, Result};
use crate::loader::{load_products, read_products, LoadStats};
use crate::output::ReportWriter;
use crate::report::{artifacts, ReportSet};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Summary of a completed run, written as `run_summary.json`
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration
    pub duration_ms: u64,
    /// Load phase counters
    pub products: LoadStats,
    /// Apply phase counters
    pub changes: ApplyStats,
    /// Unique unresolved names
    pub missing: usize,
    /// Products left in the store
    pub remaining: usize,
    /// Database file, `None` when the store was in memory
    pub database: Option<PathBuf>,
    /// Artifacts written, excluding the summary itself
    pub artifacts: Vec<PathBuf>,
}

/// A configured batch run
pub struct Job {
    config: JobConfig,
}

impl Job {
    /// Create a job from a config
    pub fn new(config: JobConfig) -> Self {
        Self { config }
    }

    /// Job configuration
    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Run every phase and write all artifacts.
    ///
    /// Both inputs are read before the store is touched, so an unreadable
    /// file ends the run with no artifacts written.
    pub fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let start = Instant::now();
        let config = &self.config;
        config.validate()?;

        let decoded = read_products(
            &config.products,
            config.product_format,
            config.record_path.as_deref(),
        )?;
        let change_log = read_change_log(&config.changes)?;

        let mut store = self.open_store()?;
        store.reset()?;

        let load_stats = load_products(&mut store, &decoded)?;
        tracing::info!(
            inserted = load_stats.inserted,
            duplicates = load_stats.duplicates,
            rejected = load_stats.rejected,
            "products loaded"
        );

        let report = UpdateEngine::new(&mut store)
            .with_config(config.apply.clone())
            .apply_all(parse_change_log(&change_log))?;
        tracing::info!(
            records = report.stats.total,
            applied = report.stats.applied,
            removed = report.stats.removed,
            missing = report.missing.len(),
            skipped = report.stats.skipped,
            failed = report.stats.failed,
            "change log applied"
        );

        let writer = ReportWriter::new(&config.output_dir, config.report.format)?;
        let mut written = vec![writer.write_names(artifacts::MISSING_PRODUCTS, &report.missing)?];
        let reports = ReportSet::generate(&store, &config.report)?;
        written.extend(reports.write(&writer)?);

        let summary = RunSummary {
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            products: load_stats,
            changes: report.stats,
            missing: report.missing.len(),
            remaining: store.len()?,
            database: store.path().map(Path::to_path_buf),
            artifacts: written,
        };
        writer.write_json(artifacts::RUN_SUMMARY, &summary)?;

        tracing::info!(duration_ms = summary.duration_ms, "run complete");
        Ok(summary)
    }

    /// Write reports from an existing database file without loading or applying
    pub fn report(&self) -> Result<Vec<PathBuf>> {
        let config = &self.config;
        let path = config
            .database
            .as_ref()
            .ok_or_else(|| Error::missing_field("database"))?;
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let store = ProductStore::open(path)?;
        let writer = ReportWriter::new(&config.output_dir, config.report.format)?;
        ReportSet::generate(&store, &config.report)?.write(&writer)
    }

    fn open_store(&self) -> Result<ProductStore> {
        match &self.config.database {
            Some(path) => {
                tracing::debug!(path = %path.display(), "opening database file");
                ProductStore::open(path)
            }
            None => ProductStore::open_in_memory(),
        }
    }
}
