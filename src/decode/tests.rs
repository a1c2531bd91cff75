//! Tests for decoder module

use super::*;
use serde_json::json;

// ============================================================================
// DecoderFormat Tests
// ============================================================================

#[test]
fn test_decoder_format_default() {
    assert_eq!(DecoderFormat::default(), DecoderFormat::Json);
}

#[test]
fn test_decoder_format_from_path() {
    assert_eq!(
        DecoderFormat::from_path("data/_product_data.json"),
        Some(DecoderFormat::Json)
    );
    assert_eq!(
        DecoderFormat::from_path("products.JSONL"),
        Some(DecoderFormat::Jsonl)
    );
    assert_eq!(
        DecoderFormat::from_path("products.csv"),
        Some(DecoderFormat::Csv)
    );
    assert_eq!(DecoderFormat::from_path("products.msgpack"), None);
    assert_eq!(DecoderFormat::from_path("products"), None);
}

#[test]
fn test_decoder_format_serde() {
    let format: DecoderFormat = serde_json::from_value(json!("jsonl")).unwrap();
    assert_eq!(format, DecoderFormat::Jsonl);
}

// ============================================================================
// JSON Decoder Tests
// ============================================================================

#[test]
fn test_json_decoder_array() {
    let decoder = JsonDecoder::new();
    let records = decoder
        .decode(r#"[{"name": "A"}, {"name": "B"}]"#)
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["name"], "B");
}

#[test]
fn test_json_decoder_single_object() {
    let records = JsonDecoder::new().decode(r#"{"name": "A"}"#).unwrap();
    assert_eq!(records, vec![json!({"name": "A"})]);
}

#[test]
fn test_json_decoder_with_path() {
    let decoder = JsonDecoder::with_path("data.products");
    let body = r#"{"data": {"products": [{"name": "A"}]}, "meta": {}}"#;
    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 1);

    let records = JsonDecoder::with_path("$.data.products").decode(body).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn test_json_decoder_missing_path() {
    let records = JsonDecoder::with_path("items")
        .decode(r#"{"data": []}"#)
        .unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_json_decoder_invalid() {
    let result = JsonDecoder::new().decode("not json");
    assert!(matches!(result, Err(crate::Error::Decode { .. })));
}

// ============================================================================
// JSONL Decoder Tests
// ============================================================================

#[test]
fn test_jsonl_decoder() {
    let body = "{\"name\": \"A\"}\n\n{\"name\": \"B\"}\n";
    let records = JsonlDecoder::new().decode(body).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_jsonl_decoder_reports_line() {
    let err = JsonlDecoder::new()
        .decode("{\"name\": \"A\"}\n{broken\n")
        .unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

// ============================================================================
// CSV Decoder Tests
// ============================================================================

#[test]
fn test_csv_decoder_types() {
    let body = "name,price,quantity,category,isAvailable\nLamp,99.5,3,Home,true\n\"Desk, oak\",120,1,,FALSE\n";
    let records = CsvDecoder::new().decode(body).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Lamp");
    assert_eq!(records[0]["price"], json!(99.5));
    assert_eq!(records[0]["quantity"], json!(3));
    assert_eq!(records[0]["isAvailable"], json!(true));
    assert_eq!(records[1]["name"], "Desk, oak");
    assert_eq!(records[1]["category"], json!(null));
    assert_eq!(records[1]["isAvailable"], json!(false));
}

#[test]
fn test_csv_decoder_quoted_newline() {
    let body = "name,price,quantity,category\n\"Lamp\nDeluxe\",10,1,Home\nDesk,20,2,Home\n";
    let records = CsvDecoder::new().decode(body).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Lamp\nDeluxe");
    assert_eq!(records[1]["name"], "Desk");
    assert_eq!(records[1]["quantity"], json!(2));
}

#[test]
fn test_csv_decoder_text_columns() {
    let body = "name,price\n1984,12.5\n2001,8\n";

    let records = CsvDecoder::new().decode(body).unwrap();
    assert_eq!(records[0]["name"], json!(1984));

    let records = CsvDecoder::new()
        .with_text_columns(&["name"])
        .decode(body)
        .unwrap();
    assert_eq!(records[0]["name"], "1984");
    assert_eq!(records[1]["price"].as_f64(), Some(8.0));
}

#[test]
fn test_csv_decoder_ragged_row_is_error() {
    let result = CsvDecoder::new().decode("name,price\nLamp,1,extra\n");
    assert!(matches!(result, Err(crate::Error::Decode { .. })));
}

#[test]
fn test_jsonl_decoder_multiline_value() {
    let body = "{\"name\": \"A\",\n \"price\": 1}\n{\"name\": \"B\"}";
    let records = JsonlDecoder::new().decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["price"], json!(1));
}

#[test]
fn test_csv_decoder_empty() {
    assert!(CsvDecoder::new().decode("").unwrap().is_empty());
    assert!(CsvDecoder::new().decode("name,price\n").unwrap().is_empty());
}

#[test]
fn test_build_decoder() {
    let decoder = build_decoder(DecoderFormat::Csv, None);
    assert_eq!(decoder.decode("name\nA\n").unwrap().len(), 1);

    let decoder = build_decoder(DecoderFormat::Json, Some("items"));
    assert_eq!(
        decoder.decode(r#"{"items": [{"name": "A"}]}"#).unwrap().len(),
        1
    );
}
