// src/domain/catalog.rs

use crate::auth::sessions::Session;
use crate::db::repository::ListingRepository;
use crate::domain::listing::NormalizedListing;
use crate::errors::ServerError;

/// Every listing in store order, normalized for `session`.
///
/// Favorites are re-read from the store on each call; nothing is cached
/// between requests.
pub fn load_catalog<R>(repo: &R, session: Option<&Session>) -> Result<Vec<NormalizedListing>, ServerError>
where
    R: ListingRepository + ?Sized,
{
    let listings = repo.fetch_all_listings()?;
    let favorite_ids = repo.fetch_favorite_ids(session)?;

    tracing::debug!(
        listings = listings.len(),
        favorites = favorite_ids.len(),
        "catalog loaded"
    );

    Ok(listings
        .into_iter()
        .map(|l| {
            let is_favorite = favorite_ids.contains(&l.id);
            NormalizedListing::from_listing(l, is_favorite)
        })
        .collect())
}

pub fn load_listing<R>(repo: &R, id: &str, session: Option<&Session>) -> Result<NormalizedListing, ServerError>
where
    R: ListingRepository + ?Sized,
{
    let listing = repo.fetch_listing(id)?.ok_or(ServerError::NotFound)?;
    let is_favorite = repo.fetch_favorite_ids(session)?.contains(&listing.id);
    Ok(NormalizedListing::from_listing(listing, is_favorite))
}

/// The session's favorited listings, store order.
pub fn load_favorites<R>(repo: &R, session: &Session) -> Result<Vec<NormalizedListing>, ServerError>
where
    R: ListingRepository + ?Sized,
{
    Ok(load_catalog(repo, Some(session))?
        .into_iter()
        .filter(|l| l.is_favorite)
        .collect())
}
