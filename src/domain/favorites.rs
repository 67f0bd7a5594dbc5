// src/domain/favorites.rs

use thiserror::Error;

use crate::auth::sessions::Session;
use crate::db::repository::ListingRepository;
use crate::errors::ServerError;

#[derive(Debug, Error)]
pub enum ToggleError {
    /// No session: the caller should send the visitor to the login flow.
    #[error("authentication required")]
    AuthenticationRequired,
    #[error(transparent)]
    Store(#[from] ServerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Unfavorited,
    Favorited,
}

impl FavoriteState {
    pub fn from_flag(is_favorite: bool) -> Self {
        if is_favorite {
            FavoriteState::Favorited
        } else {
            FavoriteState::Unfavorited
        }
    }

    pub fn is_favorited(&self) -> bool {
        matches!(self, FavoriteState::Favorited)
    }

    pub fn flipped(&self) -> Self {
        match self {
            FavoriteState::Unfavorited => FavoriteState::Favorited,
            FavoriteState::Favorited => FavoriteState::Unfavorited,
        }
    }
}

/// The state a toggle is aiming for, or the reason it may not start.
pub fn transition(current: FavoriteState, has_session: bool) -> Result<FavoriteState, ToggleError> {
    if !has_session {
        return Err(ToggleError::AuthenticationRequired);
    }
    Ok(current.flipped())
}

/// Resolves a finished round trip. The store's answer is authoritative; on
/// failure the caller keeps its current state.
pub fn settle(outcome: Result<bool, ToggleError>) -> Result<FavoriteState, ToggleError> {
    outcome.map(FavoriteState::from_flag)
}

/// Favorite state of one listing as seen by one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    listing_id: String,
    state: FavoriteState,
}

impl FavoriteToggle {
    pub fn new(listing_id: impl Into<String>, state: FavoriteState) -> Self {
        Self {
            listing_id: listing_id.into(),
            state,
        }
    }

    pub fn state(&self) -> FavoriteState {
        self.state
    }

    /// One round trip to the store. `self.state` only changes once the store
    /// has confirmed the new association state.
    pub fn toggle<R>(&mut self, repo: &R, session: Option<&Session>) -> Result<FavoriteState, ToggleError>
    where
        R: ListingRepository + ?Sized,
    {
        let intended = transition(self.state, session.is_some())?;
        let confirmed = settle(repo.toggle_favorite_association(&self.listing_id, session))?;

        if confirmed != intended {
            // Another request toggled the same pair in between.
            tracing::debug!(
                listing_id = %self.listing_id,
                ?intended,
                ?confirmed,
                "favorite toggle raced, keeping store state"
            );
        }

        self.state = confirmed;
        Ok(confirmed)
    }
}
