// templates/pages/property.rs

use crate::auth::Session;
use crate::domain::listing::NormalizedListing;
use crate::templates::components::property_card::{price_line, sqft_label};
use crate::templates::{
    components::favorite_button,
    desktop_layout,
};
use maud::{html, Markup};

fn detail_section(heading: &str, body: Markup) -> Markup {
    html! {
        section class="detail-section border rounded-lg p-4 mt-6" {
            h2 class="text-xl font-semibold mb-2" { (heading) }
            (body)
        }
    }
}

pub fn property_page(listing: &NormalizedListing, session: Option<&Session>) -> Markup {
    desktop_layout(
        &listing.title,
        session,
        html! {
            main class="container px-4 py-8" {
                div class="flex items-center justify-between" {
                    h1 class="text-3xl font-bold" { (listing.title) }
                    (favorite_button(&listing.id, listing.is_favorite))
                }
                p class="text-muted" { (listing.address) }
                (price_line(listing))

                @if listing.images.is_empty() {
                    div class="gallery-empty bg-gray-200" { "No photos yet" }
                } @else {
                    div class="gallery" {
                        @for (i, url) in listing.images.iter().enumerate() {
                            img src=(url) alt=(format!("{} photo {}", listing.title, i + 1)) loading="lazy";
                        }
                    }
                }

                (detail_section("Details", html! {
                    dl class="details" {
                        dt { "Type" } dd { (listing.kind.label()) }
                        dt { "Bedrooms" } dd { (listing.bedrooms.map(|n| n.to_string()).unwrap_or_else(|| "N/A".into())) }
                        dt { "Bathrooms" } dd { (listing.bathrooms.map(|n| n.to_string()).unwrap_or_else(|| "N/A".into())) }
                        dt { "Area" } dd { (sqft_label(listing.sqft)) }
                        @if let Some(year) = listing.year_built {
                            dt { "Year built" } dd { (year) }
                        }
                        @if let Some(status) = &listing.status {
                            dt { "Status" } dd { (status) }
                        }
                        dt { "Listed" } dd { (listing.created_at.format("%B %-d, %Y").to_string()) }
                    }
                }))

                @if let Some(description) = &listing.description {
                    (detail_section("About this property", html! { p { (description) } }))
                }
            }
        },
    )
}
