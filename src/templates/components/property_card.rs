use crate::domain::listing::{format_price, NormalizedListing, TransactionType};
use maud::{html, Markup};

/// Heart button. Posting to the toggle route swaps this element for the
/// re-rendered button carrying the confirmed state.
pub fn favorite_button(listing_id: &str, is_favorite: bool) -> Markup {
    let label = if is_favorite {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };

    html! {
        button.favorite-btn.favorited[is_favorite]
            type="button"
            id=(format!("fav-{listing_id}"))
            hx-post=(format!("/favorites/{listing_id}/toggle"))
            hx-swap="outerHTML"
            aria-pressed=(if is_favorite { "true" } else { "false" })
            aria-label=(label)
            title=(label)
        {
            svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24"
                fill=(if is_favorite { "#ef4444" } else { "none" })
                stroke=(if is_favorite { "#ef4444" } else { "currentColor" })
                stroke-width="2" stroke-linecap="round" stroke-linejoin="round"
            {
                path d="M19.5 12.572l-7.5 7.428l-7.5 -7.428a5 5 0 1 1 7.5 -6.566a5 5 0 1 1 7.5 6.572" {}
            }
        }
    }
}

fn count_label(count: Option<u32>, singular: &str, plural: &str) -> String {
    match count {
        Some(1) => format!("1 {singular}"),
        Some(n) => format!("{n} {plural}"),
        None => "N/A".to_string(),
    }
}

pub fn sqft_label(sqft: Option<f64>) -> String {
    match sqft {
        Some(s) if s > 0.0 => format!("{} sq ft", format_price(Some(s)).trim_start_matches('$')),
        _ => "N/A".to_string(),
    }
}

pub fn price_line(listing: &NormalizedListing) -> Markup {
    html! {
        p class="mb-4 text-xl font-bold" {
            (format_price(listing.price))
            @if listing.kind == TransactionType::Rent {
                span class="text-sm font-normal text-muted" { "/mo" }
            }
        }
    }
}

pub fn property_card(listing: &NormalizedListing, is_featured: bool) -> Markup {
    html! {
        article class="property-card" id=(format!("listing-{}", listing.id)) {
            div class="relative" {
                div class="aspect-4-3 bg-gray-200" {
                    @if !listing.cover_image().is_empty() {
                        img src=(listing.cover_image()) alt=(listing.title) loading="lazy" class="object-cover";
                    }
                }
                div class="absolute top-2 left-2 right-2 flex justify-between" {
                    span class="badge" { (listing.kind.label()) }
                    (favorite_button(&listing.id, listing.is_favorite))
                }
            }

            div class="p-4" {
                div class="mb-2 flex items-baseline justify-between" {
                    h3 class="font-semibold line-clamp-1" { (listing.title) }
                    @if is_featured {
                        p class="text-yellow-500 text-sm" { "★ Featured" }
                    }
                }
                p class="mb-2 text-sm text-muted line-clamp-1" { (listing.address) }
                (price_line(listing))

                div class="flex items-center justify-between text-sm text-muted" {
                    span { (count_label(listing.bedrooms, "bed", "beds")) }
                    span { (count_label(listing.bathrooms, "bath", "baths")) }
                    span { (sqft_label(listing.sqft)) }
                }
            }

            div class="p-4 pt-0" {
                a class="btn btn-outline w-full" href=(format!("/property/{}", listing.id)) { "View Details" }
            }
        }
    }
}

pub fn property_grid(listings: &[NormalizedListing], featured: bool) -> Markup {
    html! {
        div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3" {
            @for listing in listings {
                (property_card(listing, featured))
            }
        }
    }
}
