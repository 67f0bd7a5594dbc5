// src/auth/sessions.rs
use astra::Request;
use rusqlite::Connection;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::token::{hash_token, new_token};
use crate::db::auth as db_auth;
use crate::errors::ServerError;

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

/// The signed-in visitor for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub email: String,
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Creates a session row and returns the raw token for the cookie.
pub fn create_session(conn: &Connection, user_id: i64, now: i64) -> Result<String, ServerError> {
    let raw_token = new_token();
    let hash = hash_token(&raw_token);
    db_auth::insert_session(conn, user_id, &hash, now, now + SESSION_TTL_SECS)?;
    Ok(raw_token)
}

pub fn load_session(conn: &Connection, raw_token: &str, now: i64) -> Result<Option<Session>, ServerError> {
    let hash = hash_token(raw_token);
    Ok(db_auth::find_session_user(conn, &hash, now)?
        .map(|(user_id, email)| Session { user_id, email }))
}

pub fn end_session(conn: &Connection, raw_token: &str, now: i64) -> Result<bool, ServerError> {
    db_auth::revoke_session(conn, &hash_token(raw_token), now)
}

/// Raw `session` cookie value, if the request carries one.
pub fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(raw_token: &str) -> String {
    format!("{SESSION_COOKIE}={raw_token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECS}")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
