// src/tests/router_tests/pages_tests.rs
use crate::domain::images::RawImageField;
use crate::domain::listing::TransactionType;
use crate::router::handle;
use crate::tests::utils::{body_string, get, init_test_app, listing, seed, seed_default};

#[test]
fn home_page_has_featured_sale_and_rent_sections() {
    let app = init_test_app();
    seed_default(&app);

    let resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Featured Properties"));
    assert!(body.contains("Homes for Sale"));
    assert!(body.contains("Rentals"));
    assert!(body.contains("Studio Centro"));
}

#[test]
fn property_page_shows_every_image() {
    let app = init_test_app();
    let mut l = listing("p1", "Casa Coral", 250_000.0, TransactionType::Sale, None, 5);
    l.images = RawImageField::ScalarString(r#"["a.jpg","b.jpg"]"#.into());
    seed(&app, &[l]);

    let body = body_string(handle(get("/property/p1"), &app).unwrap());
    assert!(body.contains(r#"src="a.jpg""#));
    assert!(body.contains(r#"src="b.jpg""#));
    assert!(body.contains("$250,000"));
    assert!(body.contains("About Casa Coral"));
}

#[test]
fn rent_prices_are_monthly() {
    let app = init_test_app();
    seed_default(&app);
    let body = body_string(handle(get("/property/l4"), &app).unwrap());
    assert!(body.contains("$1,400"));
    assert!(body.contains("/mo"));
}

#[test]
fn unknown_routes_and_listings_are_not_found() {
    let app = init_test_app();
    assert!(matches!(
        handle(get("/property/missing"), &app),
        Err(crate::errors::ServerError::NotFound)
    ));
    assert!(matches!(
        handle(get("/nope"), &app),
        Err(crate::errors::ServerError::NotFound)
    ));
}

#[test]
fn error_response_renders_status_page() {
    let resp = crate::responses::error_response(crate::errors::ServerError::DbError(
        "no such table: listings".into(),
    ));
    assert_eq!(resp.status(), 500);
    let body = body_string(resp);
    assert!(body.contains("Error 500"));
    assert!(!body.contains("no such table"));
}
