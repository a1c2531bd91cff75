//! Engine types
//!
//! Outcomes, counters, and configuration for applying change records.

use crate::changelog::InvalidReason;
use crate::error::Error;
use crate::types::UpdateMethod;
use serde::{Deserialize, Serialize};

/// Result of applying one change record
#[derive(Debug)]
pub enum ApplyOutcome {
    /// Operator ran and `update_count` was incremented
    Applied {
        /// Product name
        name: String,
        /// Operator that ran
        method: UpdateMethod,
    },
    /// Product was deleted
    Removed {
        /// Product name
        name: String,
    },
    /// No product with this name exists
    Missing {
        /// Referenced name
        name: String,
    },
    /// Record lacked `name` or `method`; the store was not touched
    Skipped {
        /// Which key was missing
        reason: InvalidReason,
    },
    /// Unrecognised operator; nothing changed
    Ignored {
        /// Product name
        name: String,
        /// Unrecognised tag
        method: String,
    },
    /// Param parsing or store access failed for this record
    Failed {
        /// Product name
        name: String,
        /// Underlying cause
        error: Error,
    },
}

impl ApplyOutcome {
    /// Short status label, as used in logs and `parse` output
    pub fn status(&self) -> &'static str {
        match self {
            Self::Applied { .. } => "applied",
            Self::Removed { .. } => "removed",
            Self::Missing { .. } => "missing",
            Self::Skipped { .. } => "skipped",
            Self::Ignored { .. } => "ignored",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Configuration for applying a change log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    /// Clamp `quantity_add` results at zero like `quantity_sub`
    pub clamp_quantity_add: bool,
    /// Abort the run on the first failed record
    pub fail_fast: bool,
}

impl ApplyConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `quantity_add` clamping
    #[must_use]
    pub fn with_clamp_quantity_add(mut self, clamp: bool) -> Self {
        self.clamp_quantity_add = clamp;
        self
    }

    /// Set fail fast
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Counters for one pass over a change log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyStats {
    /// Records seen
    pub total: usize,
    /// Operators applied (excluding removals)
    pub applied: usize,
    /// Products removed
    pub removed: usize,
    /// Records whose target was not found
    pub missing: usize,
    /// Invalid records
    pub skipped: usize,
    /// Records with an unknown operator
    pub ignored: usize,
    /// Records that failed
    pub failed: usize,
}

impl ApplyStats {
    /// Count an outcome
    pub fn record(&mut self, outcome: &ApplyOutcome) {
        self.total += 1;
        match outcome {
            ApplyOutcome::Applied { .. } => self.applied += 1,
            ApplyOutcome::Removed { .. } => self.removed += 1,
            ApplyOutcome::Missing { .. } => self.missing += 1,
            ApplyOutcome::Skipped { .. } => self.skipped += 1,
            ApplyOutcome::Ignored { .. } => self.ignored += 1,
            ApplyOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Records that changed the store
    pub fn mutations(&self) -> usize {
        self.applied + self.removed
    }
}

/// Final result of applying a change log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Outcome counters
    pub stats: ApplyStats,
    /// Unresolved names, unique, in first-encounter order
    pub missing: Vec<String>,
}
