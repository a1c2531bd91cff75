//! Job configuration
//!
//! A run is described by a YAML job file. Every field has a default, and CLI
//! flags override whatever the file sets.

use crate::decode::DecoderFormat;
use crate::engine::ApplyConfig;
use crate::error::{Error, Result};
use crate::output::ReportFormat;
use crate::report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Job Config
// ============================================================================

/// Complete job configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Product source file
    pub products: PathBuf,

    /// Change log file
    pub changes: PathBuf,

    /// Directory for report artifacts
    pub output_dir: PathBuf,

    /// DuckDB database file (`None` for in-memory)
    pub database: Option<PathBuf>,

    /// Product source format (`None` to infer from the extension)
    pub product_format: Option<DecoderFormat>,

    /// Dot path to the product array inside a JSON source
    pub record_path: Option<String>,

    /// Report settings
    pub report: ReportConfig,

    /// Change application settings
    pub apply: ApplyConfig,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            products: PathBuf::from("data/4/_product_data.json"),
            changes: PathBuf::from("data/4/_update_data.text"),
            output_dir: PathBuf::from("output_data/4"),
            database: None,
            product_format: None,
            record_path: None,
            report: ReportConfig::default(),
            apply: ApplyConfig::default(),
        }
    }
}

impl JobConfig {
    /// Parse a job config from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a job config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path.display().to_string())
            } else {
                Error::config(format!("Failed to read '{}': {e}", path.display()))
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply CLI overrides on top of file values
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(products) = &overrides.products {
            self.products.clone_from(products);
        }
        if let Some(changes) = &overrides.changes {
            self.changes.clone_from(changes);
        }
        if let Some(output_dir) = &overrides.output_dir {
            self.output_dir.clone_from(output_dir);
        }
        if let Some(database) = &overrides.database {
            self.database = Some(database.clone());
        }
        if let Some(format) = overrides.product_format {
            self.product_format = Some(format);
        }
        if let Some(top_n) = overrides.top_n {
            self.report.top_n = top_n;
        }
        if let Some(threshold) = overrides.price_threshold {
            self.report.price_threshold = threshold;
        }
        if let Some(format) = overrides.report_format {
            self.report.format = format;
        }
        if overrides.clamp_quantity_add {
            self.apply.clamp_quantity_add = true;
        }
        if overrides.fail_fast {
            self.apply.fail_fast = true;
        }
        self
    }

    /// Check the config before anything is read or written
    pub fn validate(&self) -> Result<()> {
        if self.products.as_os_str().is_empty() {
            return Err(Error::missing_field("products"));
        }
        if self.changes.as_os_str().is_empty() {
            return Err(Error::missing_field("changes"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::missing_field("output_dir"));
        }
        if self.report.top_n == 0 {
            return Err(Error::invalid_value("report.top_n", "must be greater than 0"));
        }
        let threshold = self.report.price_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::invalid_value(
                "report.price_threshold",
                format!("must be a finite, non-negative number, got {threshold}"),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Overrides
// ============================================================================

/// Values given on the command line; `None` keeps the file value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub products: Option<PathBuf>,
    pub changes: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub product_format: Option<DecoderFormat>,
    pub top_n: Option<usize>,
    pub price_threshold: Option<f64>,
    pub report_format: Option<ReportFormat>,
    /// Only ever turns clamping on
    pub clamp_quantity_add: bool,
    /// Only ever turns fail-fast on
    pub fail_fast: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
products: in/products.csv
changes: in/changes.txt
output_dir: out
database: state/products.duckdb
product_format: csv
report:
  top_n: 5
  price_threshold: 250.5
  format: parquet
apply:
  clamp_quantity_add: true
";
        let config = JobConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.products, PathBuf::from("in/products.csv"));
        assert_eq!(config.database, Some(PathBuf::from("state/products.duckdb")));
        assert_eq!(config.product_format, Some(DecoderFormat::Csv));
        assert_eq!(config.report.top_n, 5);
        assert_eq!(config.report.price_threshold, 250.5);
        assert_eq!(config.report.format, ReportFormat::Parquet);
        assert!(config.apply.clamp_quantity_add);
        assert!(!config.apply.fail_fast);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = JobConfig::from_yaml("report:\n  top_n: 3\n").unwrap();
        assert_eq!(config.report.top_n, 3);
        assert_eq!(config.report.price_threshold, 1000.0);
        assert_eq!(config.output_dir, PathBuf::from("output_data/4"));
        assert!(config.database.is_none());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(JobConfig::from_yaml("").unwrap(), JobConfig::default());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = JobConfig::from_yaml("report:\n  format: xml\n");
        assert!(matches!(result, Err(Error::YamlParse(_))));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = ConfigOverrides {
            changes: Some(PathBuf::from("other.txt")),
            top_n: Some(20),
            report_format: Some(ReportFormat::Csv),
            fail_fast: true,
            ..ConfigOverrides::default()
        };
        let config = JobConfig::default().with_overrides(&overrides);
        assert_eq!(config.changes, PathBuf::from("other.txt"));
        assert_eq!(config.products, PathBuf::from("data/4/_product_data.json"));
        assert_eq!(config.report.top_n, 20);
        assert_eq!(config.report.format, ReportFormat::Csv);
        assert!(config.apply.fail_fast);
        assert!(!config.apply.clamp_quantity_add);
    }

    #[test]
    fn test_validate_top_n() {
        let mut config = JobConfig::default();
        config.report.top_n = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { field, .. }) if field == "report.top_n"
        ));
    }

    #[test]
    fn test_validate_threshold() {
        let mut config = JobConfig::default();
        config.report.price_threshold = -1.0;
        assert!(config.validate().is_err());
        config.report.price_threshold = f64::NAN;
        assert!(config.validate().is_err());
        config.report.price_threshold = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_input() {
        let mut config = JobConfig::default();
        config.changes = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(Error::MissingConfigField { field }) if field == "changes"
        ));
    }

    #[test]
    fn test_from_file_not_found() {
        let err = JobConfig::from_file("/nonexistent/job.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
