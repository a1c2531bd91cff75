//! Report file writer
//!
//! Writes report rows as pretty JSON, CSV, or Parquet files into one
//! output directory.

use super::schema::json_to_arrow;
use crate::error::{Error, Result};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Report artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pretty-printed JSON array (default)
    #[default]
    Json,
    /// CSV with a header row
    Csv,
    /// Parquet file
    Parquet,
}

impl ReportFormat {
    /// File extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

/// Configuration for Parquet output
#[derive(Debug, Clone)]
pub(crate) struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 1024 * 1024, // 1M rows
        }
    }
}

impl ParquetWriterConfig {
    /// Build writer properties
    fn build_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Writes named report artifacts into a directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    /// Output directory
    dir: PathBuf,
    /// Artifact format
    format: ReportFormat,
    /// Parquet settings
    parquet: ParquetWriterConfig,
}

impl ReportWriter {
    /// Create a writer, creating the directory if needed
    pub fn new(dir: impl AsRef<Path>, format: ReportFormat) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::output(format!(
                "Failed to create output directory {}: {e}",
                dir.display()
            ))
        })?;

        Ok(Self {
            dir,
            format,
            parquet: ParquetWriterConfig::default(),
        })
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an artifact named `name` is written to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.format.extension()))
    }

    /// Write rows as `<dir>/<name>.<ext>`.
    ///
    /// `columns` fixes the column order for CSV and Parquet; JSON keeps the
    /// rows' own field order.
    pub fn write_rows<T: Serialize>(
        &self,
        name: &str,
        rows: &[T],
        columns: &[&str],
    ) -> Result<PathBuf> {
        let path = self.path_for(name);

        match self.format {
            ReportFormat::Json => write_json_file(&path, rows)?,
            ReportFormat::Csv | ReportFormat::Parquet => {
                let records = rows
                    .iter()
                    .map(serde_json::to_value)
                    .collect::<std::result::Result<Vec<Value>, _>>()?;
                let batch = json_to_arrow(&records, columns)?;
                if self.format == ReportFormat::Csv {
                    write_batch_to_csv(&path, &batch)?;
                } else {
                    write_batch_to_parquet(&path, &batch, &self.parquet)?;
                }
            }
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "wrote report");
        Ok(path)
    }

    /// Write a list of names; a bare JSON array, or a single `name` column
    pub fn write_names(&self, name: &str, names: &[String]) -> Result<PathBuf> {
        if self.format == ReportFormat::Json {
            return self.write_rows(name, names, &[]);
        }

        let rows: Vec<Value> = names
            .iter()
            .map(|n| serde_json::json!({ "name": n }))
            .collect();
        self.write_rows(name, &rows, &["name"])
    }

    /// Write any serializable value as `<dir>/<name>.json`, whatever the format
    pub fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.dir.join(format!("{name}.json"));
        write_json_file(&path, value)?;
        Ok(path)
    }
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::Output {
        message: format!("Failed to create file {}: {e}", path.display()),
    })
}

fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut out = BufWriter::new(create_file(path)?);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Write a RecordBatch as CSV with a header row
pub fn write_batch_to_csv(path: impl AsRef<Path>, batch: &RecordBatch) -> Result<usize> {
    let file = create_file(path.as_ref())?;
    let mut writer = arrow::csv::WriterBuilder::new()
        .with_header(true)
        .build(BufWriter::new(file));
    writer.write(batch)?;
    writer.into_inner().flush()?;
    Ok(batch.num_rows())
}

/// Write a single RecordBatch to a Parquet file
pub(crate) fn write_batch_to_parquet(
    path: impl AsRef<Path>,
    batch: &RecordBatch,
    config: &ParquetWriterConfig,
) -> Result<usize> {
    let file = create_file(path.as_ref())?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(config.build_properties()))
        .map_err(|e| Error::Output {
            message: format!("Failed to create Parquet writer: {e}"),
        })?;

    writer.write(batch).map_err(|e| Error::Output {
        message: format!("Failed to write batch: {e}"),
    })?;
    writer.close().map_err(|e| Error::Output {
        message: format!("Failed to close Parquet writer: {e}"),
    })?;

    Ok(batch.num_rows())
}
