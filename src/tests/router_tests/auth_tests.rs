// src/tests/router_tests/auth_tests.rs
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, header, init_test_app, request, sign_in};
use astra::Body;
use http::Method;

fn post_email(email: &str, htmx: bool) -> astra::Request {
    let mut builder = http::Request::builder()
        .method(Method::POST)
        .uri("/auth/request-link")
        .header("Content-Type", "application/x-www-form-urlencoded");
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    builder
        .body(Body::from(format!("email={email}").into_bytes()))
        .unwrap()
}

/// Pulls the token out of the exposed development link.
fn token_from(body: &str) -> String {
    let start = body.find("/auth/magic?token=").expect("link in body") + "/auth/magic?token=".len();
    body[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[test]
fn login_page_loads() {
    let app = init_test_app();
    let resp = handle(get("/login"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("form"));
}

#[test]
fn request_link_returns_fragment_for_htmx() {
    let app = init_test_app();
    let body = body_string(handle(post_email("test%40example.com", true), &app).unwrap());

    assert!(body.contains("Check your email"));
    assert!(body.contains("test@example.com"));
    assert!(!body.contains("<!DOCTYPE html>"));
}

#[test]
fn request_link_rejects_bad_email() {
    let app = init_test_app();
    assert!(matches!(
        handle(post_email("nobody", false), &app),
        Err(ServerError::BadRequest(_))
    ));
}

#[test]
fn magic_link_signs_in_once() {
    let app = init_test_app();
    let body = body_string(handle(post_email("a%40b.com", false), &app).unwrap());
    assert!(body.contains("<!DOCTYPE html>"));
    let token = token_from(&body);

    let resp = handle(get(&format!("/auth/magic?token={token}")), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/search");
    let cookie = header(&resp, "Set-Cookie").to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    // The cookie now identifies the visitor.
    let session = cookie
        .trim_start_matches("session=")
        .split(';')
        .next()
        .unwrap()
        .to_string();
    let body = body_string(handle(request(Method::GET, "/", Some(&session)), &app).unwrap());
    assert!(body.contains("a@b.com"));
    assert!(body.contains("Log out"));

    assert!(matches!(
        handle(get(&format!("/auth/magic?token={token}")), &app),
        Err(ServerError::Unauthorized(_))
    ));
}

#[test]
fn logout_revokes_the_session() {
    let app = init_test_app();
    let token = sign_in(&app, "bye@example.com");

    let resp = handle(request(Method::POST, "/logout", Some(&token)), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));

    let body = body_string(handle(request(Method::GET, "/", Some(&token)), &app).unwrap());
    assert!(!body.contains("bye@example.com"));
    assert!(body.contains("Login"));
}
