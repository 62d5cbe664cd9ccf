// src/fetcher.rs

use std::sync::Arc;
use thiserror::Error;

use crate::catalog::{Catalog, CollectionKind};
use crate::domain::{map_document, Listing, Status};
use crate::store::{DocumentStore, RawDocument, StoreError};

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error(
        "Missing or insufficient permissions. Please update the document store's security \
         rules to allow read access to the '{collection}' collection."
    )]
    PermissionDenied { collection: String },

    /// Anything else, with the store's message as-is.
    #[error("{0}")]
    Store(String),
}

impl From<StoreError> for FetchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PermissionDenied { collection } => FetchError::PermissionDenied { collection },
            other => FetchError::Store(other.to_string()),
        }
    }
}

/// Reads collections and single documents, returning display-ready listings.
/// No caching and no retries here.
#[derive(Clone)]
pub struct ListingFetcher {
    store: Arc<dyn DocumentStore>,
    catalog: Catalog,
}

impl ListingFetcher {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: Catalog) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn fetch_collection(&self, collection: &str) -> Result<Vec<Listing>, FetchError> {
        let docs = self
            .store
            .list(collection)
            .map_err(|e| report(collection, e))?;

        tracing::info!(collection, count = docs.len(), "fetched collection");

        Ok(docs.iter().map(|doc| self.to_listing(collection, doc)).collect())
    }

    /// `Ok(None)` when no document has this id. If the id arrived
    /// percent-encoded and the raw form misses, the decoded form is tried once.
    pub fn fetch_by_id(&self, collection: &str, id: &str) -> Result<Option<Listing>, FetchError> {
        if let Some(doc) = self.get(collection, id)? {
            return Ok(Some(self.to_listing(collection, &doc)));
        }

        let decoded = percent_decode(id);
        if decoded != id {
            if let Some(doc) = self.get(collection, &decoded)? {
                return Ok(Some(self.to_listing(collection, &doc)));
            }
        }

        tracing::debug!(collection, id, "listing not found");
        Ok(None)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<RawDocument>, FetchError> {
        self.store
            .get(collection, id)
            .map_err(|e| report(collection, e))
    }

    fn to_listing(&self, collection: &str, doc: &RawDocument) -> Listing {
        let mut listing = map_document(&doc.id, &doc.fields);
        // Closed deals are sold whatever the document says.
        if self.catalog.kind_of(collection) == CollectionKind::Previous {
            listing.status = Status::Sold;
        }
        listing
    }
}

fn report(collection: &str, err: StoreError) -> FetchError {
    let err = FetchError::from(err);
    match &err {
        FetchError::PermissionDenied { .. } => {
            tracing::warn!(collection, "permission denied; check the store's read rules")
        }
        FetchError::Store(msg) => tracing::error!(collection, error = %msg, "store read failed"),
    }
    err
}

/// True percent-decoding: `%XX` escapes only, a literal `+` stays `+`.
pub fn percent_decode(id: &str) -> String {
    // Literal `+` and `&` must survive form decoding.
    let escaped = format!("v={}", id.replace('+', "%2B").replace('&', "%26"));
    url::form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())
        .unwrap_or_else(|| id.to_string())
}
