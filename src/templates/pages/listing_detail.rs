// templates/pages/listing_detail.rs

use crate::catalog::{CollectionKind, Section};
use crate::domain::details::display_date;
use crate::domain::Listing;
use crate::templates::components::{
    image_gallery, listing_href, safe_url, status_badge, PLACEHOLDER_IMAGE,
};
use crate::templates::{desktop_layout, inquiry_form};
use maud::{html, Markup};

pub struct DetailVm<'a> {
    pub sections: &'a [Section],
    pub section: &'a Section,
    pub kind: CollectionKind,
    pub listing: &'a Listing,
}

pub fn listing_detail_page(vm: &DetailVm<'_>) -> Markup {
    let listing = vm.listing;
    let closed = vm.kind == CollectionKind::Previous;
    let hero = listing
        .cover_image()
        .and_then(safe_url)
        .unwrap_or(PLACEHOLDER_IMAGE);

    let back_href = if closed {
        format!("/{}/closed", vm.section.slug)
    } else {
        format!("/{}/listings", vm.section.slug)
    };

    // Pass-through fields some records carry.
    let sale_date = listing.extra_value("saleDate").and_then(display_date);
    let listed_on = listing.extra_value("createdAt").and_then(display_date);
    let employees = listing.extra_text("employees");
    let established = listing.extra_text("established");
    let flyer = listing
        .extra_text("flyerUrl")
        .filter(|url| safe_url(url).is_some());

    desktop_layout(
        &listing.title,
        vm.sections,
        html! {
            header class="detail-hero" style=(format!("background-image: url('{hero}')")) {
                div class="detail-hero-inner" {
                    a href=(back_href) class="back-link" { "← Back" }
                    h1 { (listing.title) }
                    p class="detail-location" { (listing.location) }
                    div class="detail-badges" {
                        span class="badge" { (listing.category) }
                        (status_badge(listing.status))
                        span class="detail-price" { (listing.price) }
                    }
                }
            }

            main class="container detail-grid" {
                section class="detail-main" {
                    (image_gallery(&listing.images, &listing.title))

                    h2 { "Overview" }
                    @match &listing.description {
                        Some(text) => p class="detail-description" { (text) },
                        None => p class="text-muted" { "No description provided." },
                    }

                    h2 { "Highlights" }
                    @if listing.highlights.is_empty() {
                        p class="text-muted" { "No highlights provided." }
                    } @else {
                        ul class="highlights" {
                            @for h in &listing.highlights {
                                li { (h) }
                            }
                        }
                    }
                }

                aside class="detail-side" {
                    dl class="facts" {
                        dt { @if closed { "Sold Price" } @else { "Price" } }
                        dd { (listing.price) }

                        @if let Some(size) = &listing.size {
                            dt { "Size" } dd { (size) }
                        }
                        @if let Some(n) = &employees {
                            dt { "Employees" } dd { (n) }
                        }
                        @if let Some(year) = &established {
                            dt { "Established" } dd { (year) }
                        }
                        @if let Some(date) = &listed_on {
                            dt { "Listed" } dd { (date) }
                        }
                        @if let Some(date) = &sale_date {
                            dt { "Sold" } dd { (date) }
                        }
                    }

                    @if let Some(url) = &flyer {
                        a href=(url) class="button" download { "Download Flyer" }
                    }

                    @if !closed {
                        (inquiry_form(
                            &format!("{}/inquire", listing_href(&vm.section.slug, CollectionKind::Current, &listing.id)),
                            "Request Information",
                            &[],
                        ))
                    }
                }
            }
        },
    )
}
