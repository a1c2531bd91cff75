//! Update engine module
//!
//! Applies parsed change records to the product store, one at a time and in
//! log order.
//!
//! # Overview
//!
//! The engine module provides:
//! - `UpdateEngine` - Resolves each record by name and applies its operator
//! - `ApplyConfig` - Configuration for a pass over the change log
//! - `ApplyOutcome` / `ApplyStats` / `ApplyReport` - Per-record and per-run results
//!
//! Each record reads the product's current value and writes the new one before
//! the next record is looked at, so later records see earlier effects. Errors
//! stay confined to the record that caused them.

mod operators;
mod types;

pub use operators::{plan, Operation};
pub use types::{ApplyConfig, ApplyOutcome, ApplyReport, ApplyStats};

use crate::changelog::ChangeRecord;
use crate::database::RecordStore;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Applies change records against a store
pub struct UpdateEngine<'a, S: RecordStore> {
    /// Store handle
    store: &'a mut S,
    /// Apply configuration
    config: ApplyConfig,
    /// Statistics
    stats: ApplyStats,
    /// Unresolved names in first-encounter order
    missing: Vec<String>,
    /// Membership set for `missing`
    missing_seen: HashSet<String>,
}

impl<'a, S: RecordStore> UpdateEngine<'a, S> {
    /// Create a new engine over a store
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            config: ApplyConfig::default(),
            stats: ApplyStats::default(),
            missing: Vec::new(),
            missing_seen: HashSet::new(),
        }
    }

    /// Set apply configuration
    #[must_use]
    pub fn with_config(mut self, config: ApplyConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the apply configuration
    pub fn config(&self) -> &ApplyConfig {
        &self.config
    }

    /// Get statistics
    pub fn stats(&self) -> &ApplyStats {
        &self.stats
    }

    /// Names referenced so far that could not be resolved
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Apply one record and count its outcome
    pub fn apply(&mut self, record: &ChangeRecord) -> ApplyOutcome {
        let outcome = self.resolve_and_apply(record);
        self.stats.record(&outcome);

        match &outcome {
            ApplyOutcome::Applied { name, method } => {
                tracing::debug!(record = record.index, name = %name, method = %method, "applied change");
            }
            ApplyOutcome::Removed { name } => {
                tracing::debug!(record = record.index, name = %name, "removed product");
            }
            ApplyOutcome::Missing { name } => {
                tracing::debug!(record = record.index, name = %name, "product not found");
            }
            ApplyOutcome::Skipped { reason } => {
                tracing::warn!(record = record.index, reason = %reason, "skipping invalid change record");
            }
            ApplyOutcome::Ignored { name, method } => {
                tracing::debug!(record = record.index, name = %name, method = %method, "unknown method, ignoring");
            }
            ApplyOutcome::Failed { name, error } => {
                tracing::warn!(record = record.index, name = %name, error = %error, "failed to apply change");
            }
        }

        outcome
    }

    /// Apply records in order and return the final report.
    ///
    /// Failed records are logged and skipped unless `fail_fast` is set or the
    /// error is not confined to the record; then the record's own error is
    /// returned.
    pub fn apply_all<I>(mut self, records: I) -> Result<ApplyReport>
    where
        I: IntoIterator<Item = ChangeRecord>,
    {
        for record in records {
            if let ApplyOutcome::Failed { name, error } = self.apply(&record) {
                if self.config.fail_fast || !error.is_record_level() {
                    tracing::debug!(record = record.index, name = %name, "aborting change log");
                    return Err(error);
                }
            }
        }

        Ok(self.finish())
    }

    /// Consume the engine and return its report
    pub fn finish(self) -> ApplyReport {
        ApplyReport {
            stats: self.stats,
            missing: self.missing,
        }
    }

    fn resolve_and_apply(&mut self, record: &ChangeRecord) -> ApplyOutcome {
        let change = match record.validate() {
            Ok(change) => change,
            Err(reason) => return ApplyOutcome::Skipped { reason },
        };
        let name = change.name.to_string();

        let product = match self.store.get_by_key(change.name) {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.note_missing(&name);
                return ApplyOutcome::Missing { name };
            }
            Err(error) => return ApplyOutcome::Failed { name, error },
        };

        let operation = match plan(&product, change.method, change.param, &self.config) {
            Ok(operation) => operation,
            Err(error) => return ApplyOutcome::Failed { name, error },
        };

        let written = match &operation {
            Operation::Update(update) => self.store.update_fields(&name, update),
            Operation::Remove => self.store.delete(&name),
            Operation::Noop => {
                return ApplyOutcome::Ignored {
                    name,
                    method: change.method.to_string(),
                };
            }
        };

        match written {
            Ok(true) => match operation {
                Operation::Remove => ApplyOutcome::Removed { name },
                _ => ApplyOutcome::Applied {
                    name,
                    method: change.method.clone(),
                },
            },
            Ok(false) => ApplyOutcome::Failed {
                error: Error::store(format!("product '{name}' vanished during update")),
                name,
            },
            Err(error) => ApplyOutcome::Failed { name, error },
        }
    }

    fn note_missing(&mut self, name: &str) {
        if self.missing_seen.insert(name.to_string()) {
            self.missing.push(name.to_string());
        }
    }
}
