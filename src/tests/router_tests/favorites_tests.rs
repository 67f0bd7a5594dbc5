// src/tests/router_tests/favorites_tests.rs
use crate::router::handle;
use crate::tests::utils::{
    body_string, favorite_count, header, init_test_app, request, seed_default, sign_in,
};
use http::Method;

fn htmx_toggle(id: &str, session: Option<&str>) -> astra::Request {
    let mut req = request(Method::POST, &format!("/favorites/{id}/toggle"), session);
    req.headers_mut().insert("hx-request", "true".parse().unwrap());
    req
}

#[test]
fn toggle_without_session_redirects_to_login() {
    let app = init_test_app();
    seed_default(&app);

    let resp = handle(request(Method::POST, "/favorites/l1/toggle", None), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/login");

    let resp = handle(htmx_toggle("l1", None), &app).unwrap();
    assert_eq!(header(&resp, "HX-Redirect"), "/login");

    assert_eq!(favorite_count(&app), 0);
}

#[test]
fn toggle_round_trip_returns_button_fragment() {
    let app = init_test_app();
    seed_default(&app);
    let token = sign_in(&app, "buyer@example.com");

    let body = body_string(handle(htmx_toggle("l2", Some(&token)), &app).unwrap());
    assert!(body.contains(r#"aria-pressed="true""#));
    assert!(!body.contains("<html"));
    assert_eq!(favorite_count(&app), 1);

    let body = body_string(handle(htmx_toggle("l2", Some(&token)), &app).unwrap());
    assert!(body.contains(r#"aria-pressed="false""#));
    assert_eq!(favorite_count(&app), 0);
}

#[test]
fn toggle_unknown_listing_is_not_found() {
    let app = init_test_app();
    seed_default(&app);
    let token = sign_in(&app, "buyer@example.com");

    match handle(htmx_toggle("ghost", Some(&token)), &app) {
        Err(crate::errors::ServerError::NotFound) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|r| r.status())),
    }
    assert_eq!(favorite_count(&app), 0);
}

#[test]
fn favorites_page_lists_only_saved_listings() {
    let app = init_test_app();
    seed_default(&app);
    let token = sign_in(&app, "buyer@example.com");
    handle(htmx_toggle("l3", Some(&token)), &app).unwrap();

    let resp = handle(request(Method::GET, "/favorites", Some(&token)), &app).unwrap();
    let body = body_string(resp);
    assert!(body.contains("Penthouse Mar"));
    assert!(!body.contains("Casa Selva"));

    // Favorite flag flows into the search results for this session only.
    let resp = handle(request(Method::GET, "/api/search?q=penthouse", Some(&token)), &app).unwrap();
    assert!(body_string(resp).contains(r#""is_favorite":true"#));
    let resp = handle(request(Method::GET, "/api/search?q=penthouse", None), &app).unwrap();
    assert!(body_string(resp).contains(r#""is_favorite":false"#));
}

#[test]
fn favorites_page_requires_login() {
    let app = init_test_app();
    let resp = handle(request(Method::GET, "/favorites", None), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/login");
}

#[test]
fn non_htmx_toggle_redirects_back_to_listing() {
    let app = init_test_app();
    seed_default(&app);
    let token = sign_in(&app, "buyer@example.com");

    let req = request(Method::POST, "/favorites/l1/toggle", Some(&token));
    let resp = handle(req, &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/property/l1");
    assert_eq!(favorite_count(&app), 1);
}

#[test]
fn overlapping_toggles_all_succeed() {
    let app = init_test_app();
    seed_default(&app);
    let token = sign_in(&app, "buyer@example.com");

    // An even number of toggles in total leaves the listing unfavorited.
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let resp = handle(htmx_toggle("l1", Some(&token)), &app)
                        .expect("overlapping toggle failed");
                    assert_eq!(resp.status(), 200);
                }
            });
        }
    });

    assert_eq!(favorite_count(&app), 0);
}
