//! Tests for report module

use super::*;
use crate::database::{FieldUpdate, ProductStore, RecordStore};
use crate::output::ReportFormat;
use crate::types::Product;
use pretty_assertions::assert_eq;

/// Books: 10 + 20, Toys: 1500, uncategorised: 2000
fn seeded_store() -> ProductStore {
    let mut store = ProductStore::open_in_memory().unwrap();
    let products = [
        Product::new("Novel", 10.0, 5).with_category("Books"),
        Product::new("Atlas", 20.0, 1).with_category("Books"),
        Product::new("Robot", 1500.0, 3).with_category("Toys"),
        Product::new("Crate", 2000.0, 7),
    ];
    for product in &products {
        store.insert_if_absent(product).unwrap();
    }
    store
}

fn bump(store: &mut ProductStore, name: &str, times: usize) {
    for _ in 0..times {
        assert!(store
            .update_fields(name, &FieldUpdate::new().counted())
            .unwrap());
    }
}

// ============================================================================
// Top-N Tests
// ============================================================================

#[test]
fn test_top_by_update_count_descending() {
    let mut store = seeded_store();
    bump(&mut store, "Robot", 3);
    bump(&mut store, "Atlas", 1);

    let top = ReportGenerator::new(&store).top_by_update_count(2).unwrap();
    assert_eq!(
        top,
        vec![
            TopProduct {
                name: "Robot".to_string(),
                update_count: 3,
            },
            TopProduct {
                name: "Atlas".to_string(),
                update_count: 1,
            },
        ]
    );
}

#[test]
fn test_top_by_update_count_ties_in_load_order() {
    let store = seeded_store();
    let top = ReportGenerator::new(&store).top_by_update_count(10).unwrap();
    let names: Vec<_> = top.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Novel", "Atlas", "Robot", "Crate"]);
}

#[test]
fn test_top_by_update_count_empty_store() {
    let store = ProductStore::open_in_memory().unwrap();
    assert!(ReportGenerator::new(&store)
        .top_by_update_count(10)
        .unwrap()
        .is_empty());
}

// ============================================================================
// Aggregate Tests
// ============================================================================

#[test]
fn test_price_by_category() {
    let store = seeded_store();
    let stats = ReportGenerator::new(&store).price_by_category().unwrap();
    assert_eq!(stats.len(), 3);

    // NULL category sorts first and forms its own group
    assert_eq!(stats[0].category, None);
    assert_eq!(stats[0].product_count, 1);

    let books = &stats[1];
    assert_eq!(books.category.as_deref(), Some("Books"));
    assert_eq!(books.total_price, 30.0);
    assert_eq!(books.min_price, 10.0);
    assert_eq!(books.max_price, 20.0);
    assert_eq!(books.average_price, 15.0);
    assert_eq!(books.product_count, 2);
}

#[test]
fn test_quantity_by_category() {
    let store = seeded_store();
    let stats = ReportGenerator::new(&store).quantity_by_category().unwrap();

    let books = stats
        .iter()
        .find(|s| s.category.as_deref() == Some("Books"))
        .unwrap();
    assert_eq!(books.total_quantity, 6);
    assert_eq!(books.min_quantity, 1);
    assert_eq!(books.max_quantity, 5);
    assert_eq!(books.average_quantity, 3.0);
}

#[test]
fn test_removed_product_absent_from_aggregates() {
    let mut store = seeded_store();
    store.delete("Atlas").unwrap();

    let stats = ReportGenerator::new(&store).price_by_category().unwrap();
    let books = stats
        .iter()
        .find(|s| s.category.as_deref() == Some("Books"))
        .unwrap();
    assert_eq!(books.product_count, 1);
    assert_eq!(books.total_price, 10.0);
}

// ============================================================================
// Filter Tests
// ============================================================================

#[test]
fn test_price_above_is_strict() {
    let store = seeded_store();
    let generator = ReportGenerator::new(&store);

    let above: Vec<_> = generator
        .price_above(1000.0)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(above, vec!["Robot", "Crate"]);

    let above = generator.price_above(1500.0).unwrap();
    assert_eq!(
        above,
        vec![PricedProduct {
            name: "Crate".to_string(),
            price: 2000.0,
        }]
    );
}

// ============================================================================
// Report Set Tests
// ============================================================================

#[test]
fn test_report_config_defaults() {
    let config = ReportConfig::default();
    assert_eq!(config.top_n, 10);
    assert_eq!(config.price_threshold, 1000.0);
    assert_eq!(config.format, ReportFormat::Json);
}

#[test]
fn test_report_set_generate_and_write() {
    let store = seeded_store();
    let config = ReportConfig::new().with_top_n(2);
    let reports = ReportSet::generate(&store, &config).unwrap();
    assert_eq!(reports.top_products.len(), 2);
    assert_eq!(reports.custom_query.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path(), ReportFormat::Json).unwrap();
    let paths = reports.write(&writer).unwrap();
    assert_eq!(paths.len(), 4);

    let price: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("price_analysis.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(price[1]["category"], "Books");
    assert_eq!(price[1]["average_price"], 15.0);
}

#[test]
fn test_report_set_write_csv() {
    let store = seeded_store();
    let reports = ReportSet::generate(&store, &ReportConfig::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path(), ReportFormat::Csv).unwrap();
    reports.write(&writer).unwrap();

    let text = std::fs::read_to_string(dir.path().join("top_products.csv")).unwrap();
    assert_eq!(text.lines().next(), Some("name,update_count"));
    assert_eq!(text.lines().count(), 5);
}
