// templates/pages/search.rs

use crate::auth::Session;
use crate::domain::filter::FilterSpec;
use crate::domain::listing::NormalizedListing;
use crate::templates::{
    components::{filter_form, property_grid},
    desktop_layout,
};
use maud::{html, Markup};

pub fn results_heading(count: usize) -> String {
    match count {
        1 => "1 Property Found".to_string(),
        n => format!("{n} Properties Found"),
    }
}

pub fn search_page(spec: &FilterSpec, results: &[NormalizedListing], session: Option<&Session>) -> Markup {
    desktop_layout(
        "Search",
        session,
        html! {
            main class="container px-4 py-8" {
                h1 class="mb-6 text-3xl font-bold" { "Popular Homes" }

                (filter_form(spec))

                div class="mb-6 flex items-center justify-between" {
                    h2 class="text-xl font-semibold" { (results_heading(results.len())) }
                    a href=(format!("/api/search?{}", spec.to_query())) class="text-sm" { "JSON" }
                }

                @if results.is_empty() {
                    div class="empty-state" {
                        h3 class="mb-2 text-xl font-medium" { "No properties found" }
                        p class="mb-6 text-muted" {
                            "Try adjusting your search criteria or explore our featured listings."
                        }
                        a href="/search" class="btn" { "Reset Filters" }
                    }
                } @else {
                    (property_grid(results, false))
                }
            }
        },
    )
}
