// src/state.rs

use std::sync::Arc;
use std::time::Duration;

use crate::cache::QueryCache;
use crate::catalog::Catalog;
use crate::domain::Listing;
use crate::errors::ServerError;
use crate::fetcher::{percent_decode, ListingFetcher};
use crate::leads::LeadRelay;

/// Everything a request handler needs, shared by all server workers.
pub struct AppState {
    fetcher: ListingFetcher,
    collections: QueryCache<Vec<Listing>>,
    documents: QueryCache<Option<Listing>>,
    relay: Box<dyn LeadRelay>,
}

impl AppState {
    pub fn new(fetcher: ListingFetcher, relay: Box<dyn LeadRelay>, stale_after: Duration) -> Self {
        Self {
            fetcher,
            collections: QueryCache::new(stale_after),
            documents: QueryCache::new(stale_after),
            relay,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.fetcher.catalog()
    }

    pub fn relay(&self) -> &dyn LeadRelay {
        self.relay.as_ref()
    }

    /// Whole collection, served from cache while fresh.
    pub fn listings(&self, collection: &str) -> Result<Arc<Vec<Listing>>, ServerError> {
        self.collections
            .get_or_fetch(collection, || self.fetcher.fetch_collection(collection))
            .map_err(ServerError::from)
    }

    /// One listing. A fresh copy of its collection answers first, so opening
    /// a card from the list never costs a second read.
    pub fn listing(&self, collection: &str, id: &str) -> Result<Option<Listing>, ServerError> {
        if let Some(all) = self.collections.get(collection) {
            let decoded = percent_decode(id);
            if let Some(found) = all.iter().find(|l| l.id == id || l.id == decoded) {
                return Ok(Some(found.clone()));
            }
        }

        let key = format!("{collection}/{id}");
        let found = self
            .documents
            .get_or_fetch(&key, || self.fetcher.fetch_by_id(collection, id))
            .map_err(ServerError::from)?;
        Ok((*found).clone())
    }
}
