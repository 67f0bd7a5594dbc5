// src/db/repository.rs
use std::collections::HashSet;

use crate::auth::sessions::{unix_now, Session};
use crate::db::connection::Database;
use crate::db::{favorites, listings};
use crate::domain::favorites::ToggleError;
use crate::domain::listing::Listing;
use crate::errors::ServerError;

/// What the site needs from the listing store.
pub trait ListingRepository {
    /// Every listing, in the store's own order.
    fn fetch_all_listings(&self) -> Result<Vec<Listing>, ServerError>;

    fn fetch_listing(&self, id: &str) -> Result<Option<Listing>, ServerError>;

    /// Listing ids favorited by `session`; empty when there is no session.
    fn fetch_favorite_ids(&self, session: Option<&Session>) -> Result<HashSet<String>, ServerError>;

    /// Flip the association for `session` and return the resulting state.
    fn toggle_favorite_association(
        &self,
        listing_id: &str,
        session: Option<&Session>,
    ) -> Result<bool, ToggleError>;
}

impl ListingRepository for Database {
    fn fetch_all_listings(&self) -> Result<Vec<Listing>, ServerError> {
        self.with_conn(|conn| listings::get_all_listings(conn))
    }

    fn fetch_listing(&self, id: &str) -> Result<Option<Listing>, ServerError> {
        self.with_conn(|conn| listings::get_listing(conn, id))
    }

    fn fetch_favorite_ids(&self, session: Option<&Session>) -> Result<HashSet<String>, ServerError> {
        let Some(session) = session else {
            return Ok(HashSet::new());
        };
        self.with_conn(|conn| favorites::get_favorite_ids(conn, session.user_id))
    }

    fn toggle_favorite_association(
        &self,
        listing_id: &str,
        session: Option<&Session>,
    ) -> Result<bool, ToggleError> {
        let session = session.ok_or(ToggleError::AuthenticationRequired)?;
        let now = unix_now();
        let state = self.with_conn(|conn| {
            favorites::toggle_favorite(conn, session.user_id, listing_id, now)
        })?;

        tracing::info!(
            user_id = session.user_id,
            listing_id,
            favorited = state,
            "favorite toggled"
        );
        Ok(state)
    }
}
