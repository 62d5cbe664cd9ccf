// templates/pages/listings.rs

use crate::catalog::{CollectionKind, Section};
use crate::domain::{Facets, Listing, ListingFilter};
use crate::templates::{desktop_layout, listing_card};
use maud::{html, Markup};

pub struct ListingsVm<'a> {
    pub sections: &'a [Section],
    pub section: &'a Section,
    pub kind: CollectionKind,
    pub total: usize,
    pub shown: Vec<&'a Listing>,
    pub filter: &'a ListingFilter,
    pub facets: Facets,
}

pub fn listings_page(vm: &ListingsVm<'_>) -> Markup {
    let (heading, blurb) = match vm.kind {
        CollectionKind::Current => (
            format!("{}: Current Listings", vm.section.title),
            "Explore opportunities across our current listings. All listings are confidential and pre-qualified.",
        ),
        CollectionKind::Previous => (
            format!("{}: Closed Transactions", vm.section.title),
            "A selection of deals we have closed for our clients.",
        ),
    };

    desktop_layout(
        &heading,
        vm.sections,
        html! {
            main class="container" {
                section class="page-intro" {
                    h1 { (heading) }
                    p { (blurb) }
                }

                @if vm.kind == CollectionKind::Current {
                    (filter_form(vm))
                }

                p class="result-count" { "Showing " (vm.shown.len()) " of " (vm.total) " listings" }

                @if vm.shown.is_empty() {
                    div class="empty-state" {
                        h3 { "No listings found" }
                        @if vm.filter.is_empty() {
                            p { "Please check back soon." }
                        } @else {
                            p { "Try adjusting your search criteria or " a href=(format!("/{}/listings", vm.section.slug)) { "browse all listings" } "." }
                        }
                    }
                } @else {
                    div class="listing-grid" {
                        @for listing in &vm.shown {
                            (listing_card(&vm.section.slug, vm.kind, listing))
                        }
                    }
                }
            }
        },
    )
}

fn filter_form(vm: &ListingsVm<'_>) -> Markup {
    let selected_category = vm.filter.category.as_deref();
    let selected_location = vm.filter.location.as_deref();

    html! {
        form class="listing-filter" method="get" action=(format!("/{}/listings", vm.section.slug)) {
            input type="search" name="q" placeholder="Search listings..." value=[vm.filter.search.as_deref()];

            select name="category" {
                option value="all" { "All Categories" }
                @for category in &vm.facets.categories {
                    option value=(category) selected[selected_category == Some(category.as_str())] { (category) }
                }
            }

            select name="location" {
                option value="all" { "All Locations" }
                @for location in &vm.facets.locations {
                    option value=(location) selected[selected_location == Some(location.as_str())] { (location) }
                }
            }

            button type="submit" { "Filter" }
        }
    }
}
