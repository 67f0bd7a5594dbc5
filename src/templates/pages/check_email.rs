use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Fragment swapped in place of the login form result.
/// `link` is only passed when magic links are exposed (local development).
pub fn check_email_content(email: &str, link: Option<&str>) -> Markup {
    html! {
        div class="text-center py-8 px-4 fade-in" {
            h3 class="text-lg font-medium" { "Check your email" }

            div class="mt-2" {
                p class="text-sm text-gray-500" {
                    "We sent a sign-in link to "
                    strong { (email) }
                    "."
                }
                @if let Some(link) = link {
                    p class="text-sm mt-2" {
                        "Development link: "
                        a href=(link) { "sign in" }
                    }
                }
            }

            div class="mt-6" {
                a href="/login" class="text-sm font-medium text-blue-600" {
                    "Try with a different email"
                }
            }
        }
    }
}

/// Full page for non-htmx form posts.
pub fn check_email_page(email: &str, link: Option<&str>) -> Markup {
    desktop_layout(
        "Check your email",
        None,
        html! {
            main class="container narrow" {
                (check_email_content(email, link))
            }
        },
    )
}
