//! Product source parser
//!
//! Decodes the source file and deserializes each record into a `Product`.

use super::types::{DecodedProducts, LoadStats};
use crate::database::RecordStore;
use crate::decode::{build_decoder, CsvDecoder, DecoderFormat, RecordDecoder};
use crate::error::{Error, Result};
use crate::types::Product;
use std::fs;
use std::path::Path;

/// Product fields that stay strings in CSV sources, e.g. a product named `1984`
const TEXT_COLUMNS: &[&str] = &["name", "category", "origin", "fromCity", "from_city"];

/// Read products from a file.
///
/// The format comes from `format` or, failing that, the file extension.
/// A file that cannot be read is fatal; individual bad records are not.
pub fn read_products(
    path: impl AsRef<Path>,
    format: Option<DecoderFormat>,
    record_path: Option<&str>,
) -> Result<DecodedProducts> {
    let path = path.as_ref();
    let format = format
        .or_else(|| DecoderFormat::from_path(path))
        .ok_or_else(|| {
            Error::config(format!(
                "Cannot infer product format from '{}'; set product_format",
                path.display()
            ))
        })?;

    let body = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })?;

    tracing::debug!(path = %path.display(), ?format, "decoding product source");
    decode_products(&body, format, record_path)
}

/// Decode products from an in-memory body
pub fn decode_products(
    body: &str,
    format: DecoderFormat,
    record_path: Option<&str>,
) -> Result<DecodedProducts> {
    let decoder: Box<dyn RecordDecoder> = match format {
        DecoderFormat::Csv => Box::new(CsvDecoder::new().with_text_columns(TEXT_COLUMNS)),
        _ => build_decoder(format, record_path),
    };
    let records = decoder.decode(body)?;

    let mut decoded = DecodedProducts::default();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Product>(record) {
            Ok(product) => decoded.products.push(product),
            Err(e) => {
                tracing::warn!(record = index, error = %e, "skipping malformed product record");
                decoded.rejected += 1;
            }
        }
    }

    Ok(decoded)
}

/// Insert decoded products into the store, first write wins per name
pub fn load_products<S: RecordStore>(
    store: &mut S,
    decoded: &DecodedProducts,
) -> Result<LoadStats> {
    let mut stats = LoadStats {
        decoded: decoded.products.len() + decoded.rejected,
        rejected: decoded.rejected,
        ..LoadStats::default()
    };

    for product in &decoded.products {
        if store.insert_if_absent(product)? {
            stats.inserted += 1;
        } else {
            tracing::debug!(name = %product.name, "duplicate product name, keeping first");
            stats.duplicates += 1;
        }
    }

    Ok(stats)
}
