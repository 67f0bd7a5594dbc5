// src/domain/listing.rs

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::images::{normalize_images, RawImageField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Rent,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Rent => "rent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Sale => "For Sale",
            TransactionType::Rent => "For Rent",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sale" => Ok(TransactionType::Sale),
            "rent" => Ok(TransactionType::Rent),
            other => Err(format!("unknown transaction type '{other}'")),
        }
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// A property row as stored in the `listings` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub address: String,
    /// Currency-agnostic units. Absent only on malformed rows.
    pub price: Option<f64>,
    pub kind: TransactionType,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub sqft: Option<f64>,
    pub images: RawImageField,
    pub description: Option<String>,
    pub year_built: Option<u32>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A listing prepared for one request: image URLs resolved and the
/// favorite flag scoped to the requesting session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedListing {
    pub id: String,
    pub title: String,
    pub address: String,
    pub price: Option<f64>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub sqft: Option<f64>,
    pub description: Option<String>,
    pub year_built: Option<u32>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub images: Vec<String>,
    pub is_favorite: bool,
}

impl NormalizedListing {
    pub fn from_listing(listing: Listing, is_favorite: bool) -> Self {
        let images = normalize_images(&listing.images);
        Self {
            id: listing.id,
            title: listing.title,
            address: listing.address,
            price: listing.price,
            kind: listing.kind,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            sqft: listing.sqft,
            description: listing.description,
            year_built: listing.year_built,
            status: listing.status,
            created_at: listing.created_at,
            images,
            is_favorite,
        }
    }

    /// Cover image for cards; empty string when the listing has none.
    pub fn cover_image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or("")
    }
}

/// "$1,250,000" style formatting, whole units only.
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price else {
        return "N/A".to_string();
    };
    let whole = price.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
