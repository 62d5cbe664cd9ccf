// src/catalog.rs

use serde::Deserialize;

/// Whether a collection holds live listings or closed / sold deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Current,
    Previous,
}

/// One brand on the site: a current collection and its closed-deals collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    /// URL prefix, e.g. "commercial" -> `/commercial/listings`.
    pub slug: String,
    pub title: String,
    pub current: String,
    pub previous: String,
}

impl Section {
    pub fn new(slug: &str, title: &str, current: &str, previous: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            current: current.to_string(),
            previous: previous.to_string(),
        }
    }

    pub fn collection(&self, kind: CollectionKind) -> &str {
        match kind {
            CollectionKind::Current => &self.current,
            CollectionKind::Previous => &self.previous,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Section::new(
                "commercial",
                "Kulshan Commercial",
                "Kulshan_Commercial_current",
                "Kulshan_Commercial_previous",
            ),
            Section::new(
                "business",
                "B2B Business Brokers",
                "B2B_Business_Brokers_current",
                "B2B_Business_Brokers_previous",
            ),
        ])
    }
}

impl Catalog {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// The single-brand layout: `listings` and `previous-deals`.
    pub fn legacy() -> Self {
        Self::new(vec![Section::new(
            "listings",
            "Kulshan Commercial",
            "listings",
            "previous-deals",
        )])
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, slug: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.slug == slug)
    }

    /// Collections named as some section's `previous` are closed deals.
    pub fn kind_of(&self, collection: &str) -> CollectionKind {
        if self.sections.iter().any(|s| s.previous == collection) {
            CollectionKind::Previous
        } else {
            CollectionKind::Current
        }
    }
}
