//! Decoder implementations
//!
//! Each decoder handles a specific source format.

use super::types::{DecoderFormat, RecordDecoder};
use crate::error::{Error, Result};
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::json::ArrayWriter;
use serde_json::{Deserializer, Value};
use std::io::Cursor;
use std::sync::Arc;

/// Build the decoder for a format
pub fn build_decoder(format: DecoderFormat, record_path: Option<&str>) -> Box<dyn RecordDecoder> {
    match format {
        DecoderFormat::Json => match record_path {
            Some(path) => Box::new(JsonDecoder::with_path(path)),
            None => Box::new(JsonDecoder::new()),
        },
        DecoderFormat::Jsonl => Box::new(JsonlDecoder::new()),
        DecoderFormat::Csv => Box::new(CsvDecoder::new()),
    }
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Dot path to the records array, e.g. `data.products`
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Extract records from a JSON value using the path
    fn extract_records(&self, value: Value) -> Vec<Value> {
        let target = match &self.record_path {
            Some(path) => match extract_simple_path(&value, path) {
                Some(v) => v.clone(),
                None => return vec![],
            },
            None => value,
        };

        match target {
            Value::Array(arr) => arr,
            Value::Null => vec![],
            v => vec![v],
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;
        Ok(self.extract_records(value))
    }
}

/// Follow a dot-separated path of object keys
fn extract_simple_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    path.split('.')
        .filter(|part| !part.is_empty())
        .try_fold(value, |current, part| current.get(part))
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder; any whitespace may separate the values
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        Deserializer::from_str(body)
            .into_iter::<Value>()
            .map(|value| {
                value.map_err(|e| {
                    Error::decode(format!("Failed to parse JSONL at line {}: {e}", e.line()))
                })
            })
            .collect()
    }
}

// ============================================================================
// CSV Decoder
// ============================================================================

/// CSV decoder backed by the Arrow CSV reader.
///
/// The first row is the header. Column types are inferred from the body;
/// columns listed with `with_text_columns` are always read as strings.
#[derive(Debug, Clone, Default)]
pub struct CsvDecoder {
    /// Columns never coerced to numbers or booleans
    text_columns: Vec<String>,
}

impl CsvDecoder {
    /// Create a new CSV decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep these columns as strings whatever their values look like
    #[must_use]
    pub fn with_text_columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.text_columns = columns.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    fn schema(&self, body: &str, format: &Format) -> Result<Schema> {
        let (inferred, _) = format
            .infer_schema(Cursor::new(body.as_bytes()), None)
            .map_err(|e| Error::decode(format!("Failed to read CSV header: {e}")))?;

        let fields: Vec<Field> = inferred
            .fields()
            .iter()
            .map(|field| {
                if self.text_columns.iter().any(|c| c == field.name()) {
                    Field::new(field.name(), DataType::Utf8, true)
                } else {
                    field.as_ref().clone()
                }
            })
            .collect();
        Ok(Schema::new(fields))
    }
}

impl RecordDecoder for CsvDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let format = Format::default().with_header(true);
        let schema = Arc::new(self.schema(body, &format)?);
        let reader = ReaderBuilder::new(schema)
            .with_header(true)
            .build(Cursor::new(body.as_bytes()))
            .map_err(|e| Error::decode(format!("Failed to open CSV reader: {e}")))?;

        let mut writer = ArrayWriter::new(Vec::new());
        for batch in reader {
            let batch = batch.map_err(|e| Error::decode(format!("Failed to parse CSV: {e}")))?;
            writer.write(&batch)?;
        }
        writer.finish()?;

        let json = writer.into_inner();
        if json.is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&json)?)
    }
}
