// src/db/favorites.rs
use rusqlite::{params, Connection, TransactionBehavior};
use std::collections::HashSet;

use crate::db::listings::listing_exists;
use crate::errors::ServerError;

pub fn get_favorite_ids(conn: &Connection, user_id: i64) -> Result<HashSet<String>, ServerError> {
    let mut stmt = conn
        .prepare("select listing_id from favorites where user_id = ?")
        .map_err(|e| ServerError::DbError(format!("prepare favorites failed: {e}")))?;

    let rows = stmt
        .query_map(params![user_id], |r| r.get::<_, String>(0))
        .map_err(|e| ServerError::DbError(format!("query favorites failed: {e}")))?;

    let mut out = HashSet::new();
    for r in rows {
        out.insert(r.map_err(|e| ServerError::DbError(format!("read favorite failed: {e}")))?);
    }
    Ok(out)
}

/// Flip the (user, listing) association and return whether it now exists.
///
/// Check and write run in one IMMEDIATE transaction, so overlapping toggles
/// queue on the busy timeout and the last one to commit decides the outcome.
pub fn toggle_favorite(
    conn: &mut Connection,
    user_id: i64,
    listing_id: &str,
    now: i64,
) -> Result<bool, ServerError> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    if !listing_exists(&tx, listing_id)? {
        tx.rollback().ok();
        return Err(ServerError::NotFound);
    }

    let removed = tx
        .execute(
            "delete from favorites where user_id = ? and listing_id = ?",
            params![user_id, listing_id],
        )
        .map_err(|e| ServerError::DbError(format!("delete favorite failed: {e}")))?;

    if removed == 0 {
        tx.execute(
            "insert into favorites (user_id, listing_id, created_at) values (?, ?, ?)",
            params![user_id, listing_id, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert favorite failed: {e}")))?;
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

    Ok(removed == 0)
}
