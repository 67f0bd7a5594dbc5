// src/db/auth.rs
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::errors::ServerError;

/// Insert a user if they don't exist, then return the user id.
/// Email should already be normalized by caller (trim/lowercase).
pub fn get_or_create_user(conn: &Connection, email: &str, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        "insert or ignore into users (email, created_at) values (?, ?)",
        params![email, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    conn.query_row(
        "select id from users where email = ?",
        params![email],
        |row| row.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select user id failed: {e}")))
}

pub fn get_user_email(conn: &Connection, user_id: i64) -> Result<String, ServerError> {
    conn.query_row(
        "select email from users where id = ?",
        params![user_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select user email failed: {e}")))
}

pub fn record_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last login failed: {e}")))?;
    Ok(())
}

/// Insert a magic link row (token_hash should be SHA-256 bytes).
pub fn insert_magic_link(
    conn: &Connection,
    user_id: i64,
    token_hash: &[u8],
    created_at: i64,
    expires_at: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "insert into magic_links (user_id, token_hash, created_at, expires_at) values (?, ?, ?, ?)",
        params![user_id, token_hash, created_at, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("insert magic link failed: {e}")))?;
    Ok(())
}

/// Mark an unexpired, unused magic link as used and return its user.
/// `Ok(None)` covers unknown, expired and already-used links alike.
pub fn consume_magic_link(
    conn: &mut Connection,
    token_hash: &[u8],
    now: i64,
) -> Result<Option<i64>, ServerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let candidate: Option<(i64, i64)> = tx
        .query_row(
            "select id, user_id from magic_links
             where token_hash = ? and used_at is null and expires_at > ?",
            params![token_hash, now],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("select magic link failed: {e}")))?;

    let Some((link_id, user_id)) = candidate else {
        tx.rollback().ok();
        return Ok(None);
    };

    // Guard on used_at so only one consumer wins.
    let updated = tx
        .execute(
            "update magic_links set used_at = ? where id = ? and used_at is null",
            params![now, link_id],
        )
        .map_err(|e| ServerError::DbError(format!("update magic link used_at failed: {e}")))?;

    if updated != 1 {
        tx.rollback().ok();
        return Ok(None);
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

    Ok(Some(user_id))
}

pub fn insert_session(
    conn: &Connection,
    user_id: i64,
    token_hash: &[u8],
    created_at: i64,
    expires_at: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "insert into sessions (user_id, token_hash, created_at, expires_at) values (?, ?, ?, ?)",
        params![user_id, token_hash, created_at, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;
    Ok(())
}

/// Live session owner for a token hash: `(user_id, email)`.
pub fn find_session_user(
    conn: &Connection,
    token_hash: &[u8],
    now: i64,
) -> Result<Option<(i64, String)>, ServerError> {
    conn.query_row(
        r#"
        select u.id, u.email
        from sessions s
        join users u on u.id = s.user_id
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![token_hash, now],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, token_hash: &[u8], now: i64) -> Result<bool, ServerError> {
    let n = conn
        .execute(
            "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
            params![now, token_hash],
        )
        .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(n == 1)
}
