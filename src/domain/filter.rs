// src/domain/filter.rs

use crate::domain::listing::Listing;

/// Search box plus the two dropdowns on the listings page. Empty / "all"
/// means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

impl ListingFilter {
    pub fn new(search: Option<&str>, category: Option<&str>, location: Option<&str>) -> Self {
        fn clean(v: Option<&str>) -> Option<String> {
            v.map(str::trim)
                .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
                .map(str::to_string)
        }

        Self {
            search: trimmed(search),
            category: clean(category),
            location: clean(location),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none() && self.location.is_none()
    }

    /// Case-insensitive substring over title, category and description;
    /// category and location must match exactly.
    pub fn matches(&self, listing: &Listing) -> bool {
        let matches_search = match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                [
                    Some(listing.title.as_str()),
                    Some(listing.category.as_str()),
                    listing.description.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&term))
            }
        };

        let matches_category = self
            .category
            .as_deref()
            .map_or(true, |c| listing.category == c);
        let matches_location = self
            .location
            .as_deref()
            .map_or(true, |l| listing.location == l);

        matches_search && matches_category && matches_location
    }

    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

fn trimmed(v: Option<&str>) -> Option<String> {
    v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Dropdown options, distinct and in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub categories: Vec<String>,
    pub locations: Vec<String>,
}

impl Facets {
    pub fn collect(listings: &[Listing]) -> Self {
        let mut facets = Facets::default();
        for listing in listings {
            push_distinct(&mut facets.categories, &listing.category);
            push_distinct(&mut facets.locations, &listing.location);
        }
        facets
    }
}

fn push_distinct(into: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !into.iter().any(|v| v == value) {
        into.push(value.to_string());
    }
}
