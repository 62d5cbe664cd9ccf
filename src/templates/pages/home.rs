// templates/pages/home.rs

use crate::catalog::{CollectionKind, Section};
use crate::domain::Listing;
use crate::templates::{card, desktop_layout, listing_card};
use maud::{html, Markup};

/// How many listings each section shows on the home page.
pub const FEATURED_PER_SECTION: usize = 3;

pub struct FeaturedSection<'a> {
    pub section: &'a Section,
    /// The section's current listings, or the error message that replaced them.
    pub listings: Result<Vec<Listing>, String>,
}

pub fn home_page(sections: &[Section], featured: &[FeaturedSection<'_>]) -> Markup {
    desktop_layout(
        "Home",
        sections,
        html! {
            main class="container" {
                section class="hero" {
                    h1 { "Commercial Real Estate & Business Brokerage" }
                    p { "Buy, sell, or invest with a team that knows the market." }
                    a href="/contact" class="button primary" { "Contact Us Today" }
                }

                @for entry in featured {
                    section class="featured" {
                        div class="featured-header" {
                            h2 { (entry.section.title) }
                            a href=(format!("/{}/listings", entry.section.slug)) { "View all listings →" }
                        }
                        @match &entry.listings {
                            Err(msg) => (card("Listings unavailable", html! { p class="text-error" { (msg) } })),
                            Ok(listings) if listings.is_empty() => p class="text-muted" { "No current listings." },
                            Ok(listings) => div class="listing-grid" {
                                @for listing in listings.iter().take(FEATURED_PER_SECTION) {
                                    (listing_card(&entry.section.slug, CollectionKind::Current, listing))
                                }
                            },
                        }
                    }
                }
            }
        },
    )
}
