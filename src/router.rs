use crate::auth::magic::MagicLinkService;
use crate::auth::sessions::{
    clear_session_cookie, create_session, end_session, load_session, session_cookie,
    session_token, unix_now, Session,
};
use crate::db::ListingRepository;
use crate::domain::catalog::{load_catalog, load_favorites, load_listing};
use crate::domain::favorites::{FavoriteState, FavoriteToggle, ToggleError};
use crate::domain::filter::{apply_filters, featured, of_kind, FilterSpec};
use crate::domain::listing::{NormalizedListing, TransactionType};
use crate::errors::ServerError;
use crate::responses::redirect::is_htmx;
use crate::responses::{
    html_response, json_response, login_redirect, redirect, redirect_with_cookie, ResultResp,
};
use crate::state::AppState;
use crate::templates::components::favorite_button;
use crate::templates::pages;
use astra::Request;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;

const FEATURED_COUNT: usize = 3;
const MAX_FORM_BYTES: u64 = 16 * 1024;

pub fn handle(mut req: Request, app: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let session = current_session(&req, app)?;
    tracing::debug!(%method, %path, signed_in = session.is_some(), "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => home(app, session.as_ref()),
        ("GET", ["search"]) => search(&req, app, session.as_ref()),
        ("GET", ["api", "search"]) => api_search(&req, app, session.as_ref()),
        ("GET", ["property", id]) => {
            let listing = load_listing(&app.db, id, session.as_ref())?;
            html_response(pages::property_page(&listing, session.as_ref()))
        }
        ("GET", ["favorites"]) => match &session {
            Some(s) => html_response(pages::favorites_page(&load_favorites(&app.db, s)?, s)),
            None => login_redirect(&req),
        },
        ("POST", ["favorites", id, "toggle"]) => toggle_favorite(&req, app, session.as_ref(), id),

        ("GET", ["login"]) => html_response(pages::login_page()),
        ("POST", ["auth", "request-link"]) => request_link(&mut req, app),
        ("GET", ["auth", "magic"]) => redeem_link(&req, app),
        ("POST", ["logout"]) => logout(&req, app),

        _ => Err(ServerError::NotFound),
    }
}

fn current_session(req: &Request, app: &AppState) -> Result<Option<Session>, ServerError> {
    let Some(token) = session_token(req) else {
        return Ok(None);
    };
    app.db
        .with_conn(|conn| load_session(conn, &token, unix_now()))
}

fn home(app: &AppState, session: Option<&Session>) -> ResultResp {
    let catalog = load_catalog(&app.db, session)?;
    let vm = pages::HomeVm {
        featured: featured(&catalog, FEATURED_COUNT),
        for_sale: of_kind(&catalog, TransactionType::Sale),
        for_rent: of_kind(&catalog, TransactionType::Rent),
    };
    html_response(pages::home_page(&vm, session))
}

fn run_search(
    req: &Request,
    app: &AppState,
    session: Option<&Session>,
) -> Result<(FilterSpec, Vec<NormalizedListing>), ServerError> {
    let spec = FilterSpec::from_query(&parse_query(req))?;
    let catalog = load_catalog(&app.db, session)?;
    let results = apply_filters(&catalog, &spec);
    tracing::debug!(?spec, matched = results.len(), total = catalog.len(), "search");
    Ok((spec, results))
}

fn search(req: &Request, app: &AppState, session: Option<&Session>) -> ResultResp {
    let (spec, results) = run_search(req, app, session)?;
    html_response(pages::search_page(&spec, &results, session))
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    count: usize,
    filters: &'a FilterSpec,
    listings: &'a [NormalizedListing],
}

fn api_search(req: &Request, app: &AppState, session: Option<&Session>) -> ResultResp {
    let (spec, results) = run_search(req, app, session)?;
    json_response(&SearchResponse {
        count: results.len(),
        filters: &spec,
        listings: &results,
    })
}

fn toggle_favorite(
    req: &Request,
    app: &AppState,
    session: Option<&Session>,
    listing_id: &str,
) -> ResultResp {
    let current = app.db.fetch_favorite_ids(session)?.contains(listing_id);
    let mut toggle = FavoriteToggle::new(listing_id, FavoriteState::from_flag(current));

    match toggle.toggle(&app.db, session) {
        Ok(state) if is_htmx(req) => html_response(favorite_button(listing_id, state.is_favorited())),
        Ok(_) => redirect(&format!("/property/{listing_id}")),
        Err(ToggleError::AuthenticationRequired) => {
            tracing::debug!(listing_id, "favorite toggle needs login");
            login_redirect(req)
        }
        Err(ToggleError::Store(e)) => Err(e),
    }
}

fn request_link(req: &mut Request, app: &AppState) -> ResultResp {
    let form = read_form(req)?;
    let email = form.get("email").map(String::as_str).unwrap_or("");

    let service = MagicLinkService::new(app.magic.clone());
    let issued = app
        .db
        .with_conn(|conn| service.request_link(conn, email, unix_now()))?;

    // No mailer yet: the log line is the delivery channel.
    tracing::info!(
        user_id = issued.user_id,
        email = %issued.email,
        expires_at = issued.expires_at,
        link = %issued.link,
        "magic link issued"
    );

    let shown_link = app.expose_magic_links.then_some(issued.link.as_str());
    if is_htmx(req) {
        html_response(pages::check_email_content(&issued.email, shown_link))
    } else {
        html_response(pages::check_email_page(&issued.email, shown_link))
    }
}

fn redeem_link(req: &Request, app: &AppState) -> ResultResp {
    let params = parse_query(req);
    let token = params.get("token").map(String::as_str).unwrap_or("");
    let now = unix_now();

    let service = MagicLinkService::new(app.magic.clone());
    let (redeemed, session_token) = app.db.with_conn(|conn| {
        let redeemed = service.redeem(conn, token, now)?;
        let session_token = create_session(conn, redeemed.user_id, now)?;
        Ok((redeemed, session_token))
    })?;

    tracing::info!(user_id = redeemed.user_id, email = %redeemed.email, "signed in");
    redirect_with_cookie("/search", &session_cookie(&session_token))
}

fn logout(req: &Request, app: &AppState) -> ResultResp {
    if let Some(token) = session_token(req) {
        let revoked = app
            .db
            .with_conn(|conn| end_session(conn, &token, unix_now()))?;
        tracing::debug!(revoked, "signed out");
    }
    redirect_with_cookie("/", &clear_session_cookie())
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;
    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}
