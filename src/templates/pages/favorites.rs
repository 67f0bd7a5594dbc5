// templates/pages/favorites.rs

use crate::auth::Session;
use crate::domain::listing::NormalizedListing;
use crate::templates::{components::property_grid, desktop_layout};
use maud::{html, Markup};

pub fn favorites_page(listings: &[NormalizedListing], session: &Session) -> Markup {
    desktop_layout(
        "Favorites",
        Some(session),
        html! {
            main class="container px-4 py-8" {
                h1 class="mb-6 text-3xl font-bold" { "Your Favorites" }
                @if listings.is_empty() {
                    div class="empty-state" {
                        p class="mb-6 text-muted" { "You haven't saved any properties yet." }
                        a href="/search" class="btn" { "Browse listings" }
                    }
                } @else {
                    (property_grid(listings, false))
                }
            }
        },
    )
}
