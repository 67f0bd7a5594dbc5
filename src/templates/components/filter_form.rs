use crate::domain::filter::{
    FilterSpec, SortKey, TypeSelector, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE, PRICE_STEP,
};
use crate::domain::listing::TransactionType;
use maud::{html, Markup};

const COUNT_OPTIONS: [(&str, &str); 5] = [
    ("any", "Any"),
    ("1", "1"),
    ("2", "2"),
    ("3", "3"),
    ("4+", "4+"),
];

const TYPE_OPTIONS: [(TypeSelector, &str); 3] = [
    (TypeSelector::All, "All"),
    (TypeSelector::Only(TransactionType::Sale), "For Sale"),
    (TypeSelector::Only(TransactionType::Rent), "For Rent"),
];

fn count_select(name: &str, label: &str, current: &str) -> Markup {
    html! {
        label for=(name) { (label) }
        select name=(name) id=(name) {
            @for (value, text) in COUNT_OPTIONS {
                option value=(value) selected[current == value] { (text) }
            }
        }
    }
}

/// The search form. Submitting is a plain GET so every result page has a
/// shareable URL.
pub fn filter_form(spec: &FilterSpec) -> Markup {
    let bedrooms = spec.bedrooms.to_string();
    let bathrooms = spec.bathrooms.to_string();

    html! {
        form method="get" action="/search" class="mb-8 flex flex-col gap-4" {
            div class="relative flex-1" {
                label class="sr-only" for="q" { "Search" }
                input type="search" id="q" name="q" value=(spec.term)
                    placeholder="Search by location, property name...";
            }

            fieldset {
                legend { "Price Range" }
                input type="number" name="min_price" aria-label="Minimum price"
                    min=(DEFAULT_MIN_PRICE) max=(DEFAULT_MAX_PRICE) step=(PRICE_STEP)
                    value=(spec.min_price);
                " – "
                input type="number" name="max_price" aria-label="Maximum price"
                    min=(DEFAULT_MIN_PRICE) max=(DEFAULT_MAX_PRICE) step=(PRICE_STEP)
                    value=[spec.price_ceiling()];
            }

            fieldset {
                legend { "Property Type" }
                @for (selector, text) in TYPE_OPTIONS {
                    label {
                        input type="radio" name="type" value=(selector.to_string()) checked[spec.kind == selector];
                        " " (text)
                    }
                }
            }

            div { (count_select("bedrooms", "Bedrooms", &bedrooms)) }
            div { (count_select("bathrooms", "Bathrooms", &bathrooms)) }

            div {
                label for="sort" { "Sort by" }
                select name="sort" id="sort" {
                    @for key in SortKey::ALL {
                        option value=(key.as_str()) selected[spec.sort == key] { (key.label()) }
                    }
                }
            }

            div class="flex gap-2" {
                button type="submit" class="btn" { "Search" }
                a href="/search" class="btn btn-outline" { "Reset Filters" }
            }
        }
    }
}
