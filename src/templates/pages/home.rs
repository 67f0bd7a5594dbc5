// templates/pages/home.rs

use crate::auth::Session;
use crate::domain::listing::NormalizedListing;
use crate::templates::{components::property_grid, desktop_layout};
use maud::{html, Markup};

pub struct HomeVm {
    pub featured: Vec<NormalizedListing>,
    pub for_sale: Vec<NormalizedListing>,
    pub for_rent: Vec<NormalizedListing>,
}

fn section(title: &str, blurb: &str, listings: &[NormalizedListing], featured: bool) -> Markup {
    html! {
        section class="py-16" {
            div class="container" {
                div class="mb-10 text-center" {
                    h2 class="mb-2 text-3xl font-bold" { (title) }
                    p class="text-muted" { (blurb) }
                }
                @if listings.is_empty() {
                    p class="text-center text-muted" { "Nothing here yet." }
                } @else {
                    (property_grid(listings, featured))
                }
            }
        }
    }
}

pub fn home_page(vm: &HomeVm, session: Option<&Session>) -> Markup {
    desktop_layout(
        "Home",
        session,
        html! {
            section class="hero" {
                h1 { "Find Your Perfect Home" }
                p { "Discover properties for sale and rent across the Mexican Riviera" }
                form method="get" action="/search" class="hero-search" {
                    input type="search" name="q" placeholder="Search by location, property name...";
                    button type="submit" class="btn" { "Search" }
                }
            }

            (section(
                "Featured Properties",
                "Explore our handpicked selection of outstanding properties.",
                &vm.featured,
                true,
            ))
            (section("Homes for Sale", "Newly listed homes you can buy today.", &vm.for_sale, false))
            (section("Rentals", "Long-stay rentals, priced per month.", &vm.for_rent, false))
        },
    )
}
