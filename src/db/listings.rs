// src/db/listings.rs
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::images::RawImageField;
use crate::domain::listing::Listing;
use crate::errors::ServerError;

const LISTING_COLUMNS: &str = "id, title, address, price, type, bedrooms, bathrooms, sqft, \
                               images, description, year_built, status, created_at";

fn listing_from_row(row: &Row<'_>) -> rusqlite::Result<Listing> {
    Ok(Listing {
        id: row.get(0)?,
        title: row.get(1)?,
        address: row.get(2)?,
        price: row.get(3)?,
        kind: row.get(4)?,
        bedrooms: row.get(5)?,
        bathrooms: row.get(6)?,
        sqft: row.get(7)?,
        images: RawImageField::from_sql_value(row.get::<_, SqlValue>(8)?),
        description: row.get(9)?,
        year_built: row.get(10)?,
        status: row.get(11)?,
        created_at: row.get(12)?,
    })
}

/// All listings in insertion order.
pub fn get_all_listings(conn: &Connection) -> Result<Vec<Listing>, ServerError> {
    let sql = format!("select {LISTING_COLUMNS} from listings order by rowid");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(format!("prepare listings failed: {e}")))?;

    let rows = stmt
        .query_map([], listing_from_row)
        .map_err(|e| ServerError::DbError(format!("query listings failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read listing row failed: {e}")))?);
    }
    Ok(out)
}

pub fn get_listing(conn: &Connection, id: &str) -> Result<Option<Listing>, ServerError> {
    let sql = format!("select {LISTING_COLUMNS} from listings where id = ?");
    conn.query_row(&sql, params![id], listing_from_row)
        .optional()
        .map_err(|e| ServerError::DbError(format!("select listing failed: {e}")))
}

pub fn listing_exists(conn: &Connection, id: &str) -> Result<bool, ServerError> {
    conn.query_row(
        "select exists(select 1 from listings where id = ?)",
        params![id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("check listing failed: {e}")))
}

/// Insert or replace a listing row. Listings are written by other tools in
/// production; the site itself only reads them.
#[cfg(test)]
pub fn upsert_listing(conn: &Connection, listing: &Listing) -> Result<(), ServerError> {
    let now = chrono::Utc::now();
    conn.execute(
        r#"
        insert into listings (
            id, title, address, price, type, bedrooms, bathrooms, sqft,
            images, description, year_built, status, created_at, updated_at
        )
        values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
        on conflict(id) do update set
            title = excluded.title,
            address = excluded.address,
            price = excluded.price,
            type = excluded.type,
            bedrooms = excluded.bedrooms,
            bathrooms = excluded.bathrooms,
            sqft = excluded.sqft,
            images = excluded.images,
            description = excluded.description,
            year_built = excluded.year_built,
            status = excluded.status,
            updated_at = excluded.updated_at
        "#,
        params![
            listing.id,
            listing.title,
            listing.address,
            listing.price,
            listing.kind,
            listing.bedrooms,
            listing.bathrooms,
            listing.sqft,
            listing.images.to_stored_text(),
            listing.description,
            listing.year_built,
            listing.status,
            listing.created_at,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("upsert listing failed: {e}")))?;
    Ok(())
}
