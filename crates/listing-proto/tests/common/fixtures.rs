#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

/// The Salt Lake City listing used across the feed tests.
pub fn slc_listing() -> Value {
    json!({
        "price": 450000,
        "price_per_sq_ft": 210,
        "beds": 3,
        "baths": 2,
        "sq_ft": 2140,
        "num_kitchens": 1,
        "year_built": 1998,
        "current_days_on_market": 12,
        "street_address": "1420 E Harvard Ave",
        "city": "Salt Lake City",
        "state": "UT",
        "zip_code": "84105",
        "mls_number": "UT12345",
        "url": "https://utahrealestate.com/UT12345",
        "images": ["https://img.example.com/UT12345/front.jpg"],
        "seller_motivation": true,
        "seller_motivation_score": "High",
        "events": [
            {"mls_number": "UT12345", "event_date": "2024-05-02 00:00:00",
             "old_price": 455000, "new_price": 450000, "price_diff": -5000}
        ],
        "new": true
    })
}

/// A sparse row: no price, images or events at all.
pub fn sparse_listing() -> Value {
    json!({
        "mls_number": "UT99999",
        "street_address": "88 W Center St",
        "city": "Provo",
        "seller_motivation_score": "Undetected",
        "new": false
    })
}

/// Write `doc` to a fresh temp dir; the dir must outlive the path.
pub fn write_feed(doc: &Value) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("feed.json");
    std::fs::write(&path, serde_json::to_string_pretty(doc).expect("serialize"))
        .expect("write feed");
    (dir, path)
}
