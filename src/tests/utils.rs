use crate::auth::magic::{MagicLinkConfig, MagicLinkService};
use crate::auth::sessions::{create_session, unix_now};
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::listings::upsert_listing;
use crate::domain::images::RawImageField;
use crate::domain::listing::{Listing, TransactionType};
use crate::errors::ServerError;
use crate::state::AppState;
use astra::{Body, Request, Response};
use chrono::{TimeZone, Utc};
use http::Method;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Fresh temp-file database with the production schema.
pub fn init_test_app() -> AppState {
    let path = std::env::temp_dir().join(format!(
        "casa_test_{}_{}_{}.sqlite",
        std::process::id(),
        DB_COUNTER.fetch_add(1, Ordering::SeqCst),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path);
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let config = AppConfig {
        expose_magic_links: true,
        ..AppConfig::default()
    };
    AppState::new(db, &config)
}

pub fn listing(
    id: &str,
    title: &str,
    price: f64,
    kind: TransactionType,
    bedrooms: Option<u32>,
    day: u32,
) -> Listing {
    Listing {
        id: id.into(),
        title: title.into(),
        address: format!("{title} street, Tulum"),
        price: Some(price),
        kind,
        bedrooms,
        bathrooms: Some(1),
        sqft: Some(1000.0),
        images: RawImageField::Sequence(vec![format!("https://img.example.com/{id}.jpg")]),
        description: Some(format!("About {title}")),
        year_built: None,
        status: Some("active".into()),
        created_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
    }
}

pub fn seed(app: &AppState, listings: &[Listing]) {
    app.db
        .with_conn(|conn| {
            for l in listings {
                upsert_listing(conn, l)?;
            }
            Ok(())
        })
        .unwrap();
}

/// Four listings covering both types and a spread of prices/bedrooms.
pub fn seed_default(app: &AppState) {
    seed(
        app,
        &[
            listing("l1", "Casa Selva", 100_000.0, TransactionType::Sale, Some(2), 1),
            listing("l2", "Villa Laguna", 300_000.0, TransactionType::Rent, Some(4), 2),
            listing("l3", "Penthouse Mar", 900_000.0, TransactionType::Sale, Some(5), 3),
            listing("l4", "Studio Centro", 1_400.0, TransactionType::Rent, Some(1), 4),
        ],
    );
}

/// Signs `email` in and returns the raw session token.
pub fn sign_in(app: &AppState, email: &str) -> String {
    app.db
        .with_conn(|conn| {
            let svc = MagicLinkService::new(MagicLinkConfig::default());
            let now = unix_now();
            let issued = svc.request_link(conn, email, now)?;
            let redeemed = svc.redeem(conn, &issued.token, now)?;
            create_session(conn, redeemed.user_id, now)
        })
        .unwrap()
}

pub fn request(method: Method, uri: &str, session: Option<&str>) -> Request {
    let mut builder = http::Request::builder().method(method).uri(uri);
    if let Some(token) = session {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn get(uri: &str) -> Request {
    request(Method::GET, uri, None)
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn header<'a>(resp: &'a Response, name: &str) -> &'a str {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

pub fn favorite_count(app: &AppState) -> i64 {
    app.db
        .with_conn(|conn| {
            conn.query_row("select count(*) from favorites", [], |r| r.get(0))
                .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap()
}
