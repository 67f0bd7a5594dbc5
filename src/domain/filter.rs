// src/domain/filter.rs

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::domain::listing::{NormalizedListing, TransactionType};
use crate::errors::ServerError;

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 5_000_000.0;
/// Granularity of the price inputs on the search form.
pub const PRICE_STEP: f64 = 50_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSelector {
    All,
    Only(TransactionType),
}

impl TypeSelector {
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            TypeSelector::All => true,
            TypeSelector::Only(wanted) => *wanted == kind,
        }
    }
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSelector::All => f.write_str("all"),
            TypeSelector::Only(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for TypeSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeSelector::All);
        }
        s.parse().map(TypeSelector::Only)
    }
}

/// Bedroom/bathroom selector: `any`, an exact count, or a threshold (`4+`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSelector {
    Any,
    Exact(u32),
    AtLeast(u32),
}

impl CountSelector {
    /// Absent counts only satisfy `Any`.
    pub fn matches(&self, count: Option<u32>) -> bool {
        match (self, count) {
            (CountSelector::Any, _) => true,
            (CountSelector::Exact(n), Some(c)) => c == *n,
            (CountSelector::AtLeast(n), Some(c)) => c >= *n,
            (_, None) => false,
        }
    }
}

impl fmt::Display for CountSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountSelector::Any => f.write_str("any"),
            CountSelector::Exact(n) => write!(f, "{n}"),
            CountSelector::AtLeast(n) => write!(f, "{n}+"),
        }
    }
}

impl FromStr for CountSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(CountSelector::Any);
        }
        let (digits, threshold) = match s.strip_suffix('+') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let n: u32 = digits
            .parse()
            .map_err(|_| format!("invalid count selector '{s}'"))?;
        Ok(if threshold {
            CountSelector::AtLeast(n)
        } else {
            CountSelector::Exact(n)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Newest, SortKey::PriceAsc, SortKey::PriceDesc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
        }
    }

    fn compare(&self, a: &NormalizedListing, b: &NormalizedListing) -> Ordering {
        match self {
            SortKey::Newest => b.created_at.cmp(&a.created_at),
            SortKey::PriceAsc => cmp_price(a.price, b.price, false),
            SortKey::PriceDesc => cmp_price(a.price, b.price, true),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort key '{}'", s.trim()))
    }
}

// Missing prices go last in either direction.
fn cmp_price(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Everything the search page lets a visitor narrow down or reorder by.
///
/// Serializes with the same textual forms the query string uses, so an
/// unbounded `max_price` comes out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSpec {
    pub term: String,
    pub min_price: f64,
    /// Infinite when a visitor asks for a minimum above the default ceiling.
    #[serde(serialize_with = "finite_or_null")]
    pub max_price: f64,
    #[serde(rename = "type", serialize_with = "as_text")]
    pub kind: TypeSelector,
    #[serde(serialize_with = "as_text")]
    pub bedrooms: CountSelector,
    #[serde(serialize_with = "as_text")]
    pub bathrooms: CountSelector,
    #[serde(serialize_with = "sort_key")]
    pub sort: SortKey,
}

fn as_text<T: fmt::Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

fn sort_key<S: Serializer>(key: &SortKey, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(key.as_str())
}

fn finite_or_null<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        s.serialize_f64(*value)
    } else {
        s.serialize_none()
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            term: String::new(),
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            kind: TypeSelector::Only(TransactionType::Sale),
            bedrooms: CountSelector::Any,
            bathrooms: CountSelector::Any,
            sort: SortKey::Newest,
        }
    }
}

impl FilterSpec {
    /// Builds a spec from search-page query parameters. Missing or blank
    /// values keep their defaults; malformed ones are rejected.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, ServerError> {
        let mut spec = FilterSpec::default();
        let get = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        if let Some(q) = get("q") {
            spec.term = q.to_string();
        }
        if let Some(v) = get("min_price") {
            spec.min_price = parse_price("min_price", v)?;
        }
        match get("max_price") {
            Some(v) => spec.max_price = parse_price("max_price", v)?,
            // A lone minimum above the default ceiling means "this much or more".
            None if spec.min_price > spec.max_price => spec.max_price = f64::INFINITY,
            None => {}
        }
        if spec.min_price > spec.max_price {
            return Err(ServerError::BadRequest(
                "min_price must not exceed max_price".into(),
            ));
        }
        if let Some(v) = get("type") {
            spec.kind = v.parse().map_err(ServerError::BadRequest)?;
        }
        if let Some(v) = get("bedrooms") {
            spec.bedrooms = v.parse().map_err(ServerError::BadRequest)?;
        }
        if let Some(v) = get("bathrooms") {
            spec.bathrooms = v.parse().map_err(ServerError::BadRequest)?;
        }
        if let Some(v) = get("sort") {
            spec.sort = v.parse().map_err(ServerError::BadRequest)?;
        }

        Ok(spec)
    }

    /// Query string that [`FilterSpec::from_query`] reads back to `self`.
    pub fn to_query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("q", &self.term)
            .append_pair("min_price", &self.min_price.to_string());
        if let Some(max) = self.price_ceiling() {
            query.append_pair("max_price", &max.to_string());
        }
        query
            .append_pair("type", &self.kind.to_string())
            .append_pair("bedrooms", &self.bedrooms.to_string())
            .append_pair("bathrooms", &self.bathrooms.to_string())
            .append_pair("sort", self.sort.as_str())
            .finish()
    }

    /// Upper price bound, or `None` when there is none.
    pub fn price_ceiling(&self) -> Option<f64> {
        self.max_price.is_finite().then_some(self.max_price)
    }

    pub fn matches_term(&self, listing: &NormalizedListing) -> bool {
        let term = self.term.trim().to_lowercase();
        term.is_empty()
            || listing.title.to_lowercase().contains(&term)
            || listing.address.to_lowercase().contains(&term)
    }

    pub fn matches_price(&self, listing: &NormalizedListing) -> bool {
        listing
            .price
            .is_some_and(|p| p >= self.min_price && p <= self.max_price)
    }

    /// Logical AND of every predicate.
    pub fn matches(&self, listing: &NormalizedListing) -> bool {
        self.matches_term(listing)
            && self.matches_price(listing)
            && self.kind.matches(listing.kind)
            && self.bedrooms.matches(listing.bedrooms)
            && self.bathrooms.matches(listing.bathrooms)
    }
}

fn parse_price(field: &str, raw: &str) -> Result<f64, ServerError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("{field} is not a number: {raw}")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ServerError::BadRequest(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(value)
}

/// Runs the search pipeline: keep listings matching `spec`, then order
/// them by `spec.sort`. Ties keep their input order.
pub fn apply_filters(listings: &[NormalizedListing], spec: &FilterSpec) -> Vec<NormalizedListing> {
    let mut out: Vec<NormalizedListing> = listings
        .iter()
        .filter(|l| spec.matches(l))
        .cloned()
        .collect();
    // `sort_by` is stable.
    out.sort_by(|a, b| spec.sort.compare(a, b));
    out
}

/// The first `n` listings in store order, for the home page.
pub fn featured(listings: &[NormalizedListing], n: usize) -> Vec<NormalizedListing> {
    listings.iter().take(n).cloned().collect()
}

pub fn of_kind(listings: &[NormalizedListing], kind: TransactionType) -> Vec<NormalizedListing> {
    listings.iter().filter(|l| l.kind == kind).cloned().collect()
}
