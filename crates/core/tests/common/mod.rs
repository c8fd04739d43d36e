//! Common test helpers for catalog search tests

use std::io::Write;
use tempfile::NamedTempFile;

/// Catalog in the upstream wire format, in upstream order
pub const CATALOG_JSON: &str = r#"[
    {"product_id": 1, "name": "Corn", "type": "grain", "farm_id": "north",
     "quantity": 5, "price_per_unit": 10.0, "description": null,
     "harvest_date": "2025-02-01T00:00:00", "created_at": "2025-02-02T08:00:00"},
    {"product_id": 2, "name": "Corn Sweet", "type": "grain", "farm_id": 7,
     "quantity": 3, "price_per_unit": 20.0, "description": "Yellow",
     "harvest_date": "2025-06-15T06:30:00"},
    {"product_id": 3, "name": "Tomato", "type": "fruit", "farm_id": "south",
     "quantity": 8, "price_per_unit": 30.0,
     "harvest_date": "2024-11-30"},
    {"product_id": 4, "name": "Potato", "type": "Root Vegetable", "farm_id": "north",
     "quantity": 40, "price_per_unit": 5.0,
     "harvest_date": "2026-01-01T00:00:00Z"},
    {"product_id": 5, "name": "Apple", "farm_id": "east",
     "quantity": 3, "price_per_unit": 20.0,
     "harvest_date": "2025-12-31T23:00:00"}
]"#;

/// Write `content` to a temporary JSON file
pub fn write_catalog(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write catalog");
    file
}

/// Product names in result order
pub fn names(products: &[harvest_core::Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}
