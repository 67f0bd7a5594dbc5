// src/tests/router_tests/search_tests.rs
use crate::router::handle;
use crate::domain::listing::TransactionType;
use crate::tests::utils::{body_string, get, init_test_app, listing, seed, seed_default};
use serde_json::Value;

fn search_json(uri: &str) -> Value {
    let app = init_test_app();
    seed_default(&app);
    let resp = handle(get(uri), &app).expect("search failed");
    assert_eq!(resp.status(), 200);
    serde_json::from_str(&body_string(resp)).unwrap()
}

fn ids(v: &Value) -> Vec<String> {
    v["listings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn default_search_shows_sales_newest_first() {
    let v = search_json("/api/search");
    assert_eq!(ids(&v), vec!["l3", "l1"]);
    assert_eq!(v["count"], 2);
}

#[test]
fn response_echoes_effective_filters() {
    let v = search_json("/api/search?type=rent&sort=price-asc&bedrooms=4%2B");
    let filters = &v["filters"];
    assert_eq!(filters["type"], "rent");
    assert_eq!(filters["sort"], "price-asc");
    assert_eq!(filters["bedrooms"], "4+");
    assert_eq!(filters["bathrooms"], "any");
    assert_eq!(filters["min_price"], 0.0);
    assert_eq!(filters["max_price"], 5_000_000.0);
    assert_eq!(ids(&v), vec!["l2"]);
}

#[test]
fn lone_minimum_price_has_no_ceiling() {
    let app = init_test_app();
    seed(
        &app,
        &[listing("villa", "Villa Cenote", 7_500_000.0, TransactionType::Sale, Some(6), 5)],
    );
    let resp = handle(get("/api/search?min_price=6000000"), &app).expect("search failed");
    assert_eq!(resp.status(), 200);
    let v: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert!(v["filters"]["max_price"].is_null());
    assert_eq!(ids(&v), vec!["villa"]);
}

#[test]
fn all_types_sorted_by_price() {
    let v = search_json("/api/search?type=all&sort=price-asc");
    assert_eq!(ids(&v), vec!["l4", "l1", "l2", "l3"]);

    let v = search_json("/api/search?type=all&sort=price-desc");
    assert_eq!(ids(&v), vec!["l3", "l2", "l1", "l4"]);
}

#[test]
fn bedroom_threshold_and_term() {
    let v = search_json("/api/search?type=all&bedrooms=4%2B");
    assert_eq!(ids(&v), vec!["l3", "l2"]);

    let v = search_json("/api/search?type=all&q=laguna");
    assert_eq!(ids(&v), vec!["l2"]);
}

#[test]
fn price_range_is_inclusive() {
    let v = search_json("/api/search?type=all&min_price=1400&max_price=100000&sort=price-asc");
    assert_eq!(ids(&v), vec!["l4", "l1"]);
}

#[test]
fn listings_serialize_with_normalized_images() {
    let v = search_json("/api/search?q=selva");
    let first = &v["listings"][0];
    assert_eq!(first["type"], "sale");
    assert_eq!(first["images"][0], "https://img.example.com/l1.jpg");
    assert_eq!(first["is_favorite"], false);
}

#[test]
fn search_page_reports_count_and_empty_state() {
    let app = init_test_app();
    seed_default(&app);

    let body = body_string(handle(get("/search?type=rent"), &app).unwrap());
    assert!(body.contains("2 Properties Found"));
    assert!(body.contains("Villa Laguna"));
    assert!(!body.contains("Casa Selva"));

    let body = body_string(handle(get("/search?q=nowhere"), &app).unwrap());
    assert!(body.contains("0 Properties Found"));
    assert!(body.contains("No properties found"));
}

#[test]
fn malformed_filters_are_bad_requests() {
    let app = init_test_app();
    for uri in [
        "/search?bedrooms=lots",
        "/search?type=lease",
        "/search?sort=random",
        "/search?min_price=10&max_price=5",
    ] {
        match handle(get(uri), &app) {
            Err(crate::errors::ServerError::BadRequest(_)) => {}
            other => panic!("{uri}: expected BadRequest, got {:?}", other.map(|r| r.status())),
        }
    }
}
