//! Tests for loader module

use super::*;
use crate::database::{ProductStore, RecordStore};
use crate::decode::DecoderFormat;
use pretty_assertions::assert_eq;

const PRODUCTS_JSON: &str = r#"[
    {"name": "Lamp", "price": 100, "quantity": 10, "category": "Home",
     "fromCity": "Kazan", "isAvailable": true, "views": 500},
    {"name": "Desk", "price": 250.5, "quantity": 2, "category": "Home",
     "fromCity": "Omsk", "isAvailable": false, "views": 12},
    {"name": "Lamp", "price": 1, "quantity": 1, "category": "Other",
     "fromCity": "Tver", "isAvailable": false, "views": 0}
]"#;

// ============================================================================
// Decoding Tests
// ============================================================================

#[test]
fn test_decode_products_json() {
    let decoded = decode_products(PRODUCTS_JSON, DecoderFormat::Json, None).unwrap();
    assert_eq!(decoded.products.len(), 3);
    assert_eq!(decoded.rejected, 0);

    let lamp = &decoded.products[0];
    assert_eq!(lamp.origin.as_deref(), Some("Kazan"));
    assert!(lamp.is_available);
    assert_eq!(lamp.views, 500);
    assert_eq!(lamp.update_count, 0);
}

#[test]
fn test_decode_products_rejects_malformed_records() {
    let body = r#"[{"name": "Ok", "price": 1, "quantity": 1}, {"price": 5}, {"name": "Bad", "quantity": "many"}]"#;
    let decoded = decode_products(body, DecoderFormat::Json, None).unwrap();
    assert_eq!(decoded.products.len(), 1);
    assert_eq!(decoded.rejected, 2);
}

#[test]
fn test_decode_products_null_price_is_kept() {
    let body = r#"[{"name": "Lamp", "price": null, "quantity": 3, "category": "Home"}]"#;
    let decoded = decode_products(body, DecoderFormat::Json, None).unwrap();

    assert_eq!(decoded.rejected, 0);
    assert_eq!(decoded.products[0].price, 0.0);
    assert_eq!(decoded.products[0].quantity, 3);
}

#[test]
fn test_decode_products_csv() {
    let body = "name,price,quantity,category,fromCity,isAvailable,views\n\
                Lamp,100,10,Home,Kazan,true,500\n";
    let decoded = decode_products(body, DecoderFormat::Csv, None).unwrap();
    assert_eq!(decoded.products.len(), 1);
    assert_eq!(decoded.products[0].quantity, 10);
    assert_eq!(decoded.products[0].category.as_deref(), Some("Home"));
}

#[test]
fn test_decode_products_csv_keeps_quoted_newline_and_numeric_names() {
    let body = "name,price,quantity,category\n\"Lamp\nDeluxe\",10,1,Home\n1984,20,2,Books\n";
    let decoded = decode_products(body, DecoderFormat::Csv, None).unwrap();

    assert_eq!(decoded.rejected, 0);
    let names: Vec<_> = decoded.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Lamp\nDeluxe", "1984"]);
    assert!((decoded.products[1].price - 20.0).abs() < f64::EPSILON);
}

#[test]
fn test_decode_products_jsonl() {
    let body = "{\"name\": \"A\", \"price\": 1.5, \"quantity\": 2}\n{\"name\": \"B\", \"price\": 3, \"quantity\": 4}\n";
    let decoded = decode_products(body, DecoderFormat::Jsonl, None).unwrap();
    let names: Vec<_> = decoded.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

// ============================================================================
// File Reading Tests
// ============================================================================

#[test]
fn test_read_products_infers_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, PRODUCTS_JSON).unwrap();

    let decoded = read_products(&path, None, None).unwrap();
    assert_eq!(decoded.products.len(), 3);
}

#[test]
fn test_read_products_unknown_extension_needs_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.data");
    std::fs::write(&path, PRODUCTS_JSON).unwrap();

    assert!(matches!(
        read_products(&path, None, None),
        Err(crate::Error::Config { .. })
    ));
    let decoded = read_products(&path, Some(DecoderFormat::Json), None).unwrap();
    assert_eq!(decoded.products.len(), 3);
}

#[test]
fn test_read_products_missing_file() {
    let err = read_products("/nonexistent/products.json", None, None).unwrap_err();
    assert!(matches!(err, crate::Error::FileNotFound { .. }));
}

// ============================================================================
// Store Loading Tests
// ============================================================================

#[test]
fn test_load_products_first_write_wins() {
    let mut store = ProductStore::open_in_memory().unwrap();
    let decoded = decode_products(PRODUCTS_JSON, DecoderFormat::Json, None).unwrap();

    let stats = load_products(&mut store, &decoded).unwrap();
    assert_eq!(
        stats,
        LoadStats {
            decoded: 3,
            rejected: 0,
            inserted: 2,
            duplicates: 1,
        }
    );

    let lamp = store.get_by_key("Lamp").unwrap().unwrap();
    assert_eq!(lamp.category.as_deref(), Some("Home"));
    assert_eq!(lamp.origin.as_deref(), Some("Kazan"));
}
