// src/tests/fetcher_tests.rs

use crate::catalog::Catalog;
use crate::domain::Status;
use crate::fetcher::{FetchError, ListingFetcher};
use crate::store::{DocumentStore, RawDocument, StoreError};
use crate::tests::utils::{seed, temp_store};
use serde_json::json;
use std::sync::Arc;

/// A store that fails every read the same way.
struct BrokenStore;

impl DocumentStore for BrokenStore {
    fn list(&self, _collection: &str) -> Result<Vec<RawDocument>, StoreError> {
        Err(StoreError::Transport("connection reset by peer".into()))
    }

    fn get(&self, _collection: &str, _id: &str) -> Result<Option<RawDocument>, StoreError> {
        Err(StoreError::Transport("connection reset by peer".into()))
    }
}

#[test]
fn closed_collections_are_always_sold() {
    let store = temp_store("closed_sold");
    seed(&store, "Kulshan_Commercial_previous", "p1", json!({"title": "Old Mill", "status": "available"}));
    seed(&store, "Kulshan_Commercial_previous", "p2", json!({"title": "Depot", "status": "pending"}));
    seed(&store, "Kulshan_Commercial_current", "c1", json!({"title": "New Mill", "status": "available"}));

    let fetcher = ListingFetcher::new(Arc::new(store), Catalog::default());

    let closed = fetcher.fetch_collection("Kulshan_Commercial_previous").unwrap();
    assert_eq!(closed.len(), 2);
    assert!(closed.iter().all(|l| l.status == Status::Sold));

    let single = fetcher
        .fetch_by_id("Kulshan_Commercial_previous", "p2")
        .unwrap()
        .expect("p2 exists");
    assert_eq!(single.status, Status::Sold);

    let current = fetcher.fetch_collection("Kulshan_Commercial_current").unwrap();
    assert_eq!(current[0].status, Status::Available);
}

#[test]
fn legacy_layout_treats_previous_deals_as_closed() {
    let store = temp_store("legacy");
    seed(&store, "previous-deals", "d1", json!({"title": "Sold Shop"}));

    let fetcher = ListingFetcher::new(Arc::new(store), Catalog::legacy());
    let closed = fetcher.fetch_collection("previous-deals").unwrap();
    assert_eq!(closed[0].status, Status::Sold);
}

#[test]
fn missing_id_is_not_found_not_an_error() {
    let store = temp_store("not_found");
    let fetcher = ListingFetcher::new(Arc::new(store), Catalog::default());

    let got = fetcher.fetch_by_id("B2B_Business_Brokers_current", "nope").unwrap();
    assert!(got.is_none());
}

#[test]
fn percent_encoded_ids_are_retried_decoded() {
    let store = temp_store("decoded");
    seed(&store, "B2B_Business_Brokers_current", "Cafe & Bakery #2", json!({"title": "Cafe"}));
    seed(&store, "B2B_Business_Brokers_current", "a+b", json!({"title": "Plus"}));

    let fetcher = ListingFetcher::new(Arc::new(store), Catalog::default());

    let found = fetcher
        .fetch_by_id("B2B_Business_Brokers_current", "Cafe%20%26%20Bakery%20%232")
        .unwrap()
        .expect("decoded id matches");
    assert_eq!(found.id, "Cafe & Bakery #2");

    let plus = fetcher
        .fetch_by_id("B2B_Business_Brokers_current", "a+b")
        .unwrap()
        .expect("literal plus kept");
    assert_eq!(plus.title, "Plus");
}

#[test]
fn permission_denied_carries_remediation_text() {
    let store = temp_store("denied").with_readable(["Kulshan_Commercial_current"]);
    let fetcher = ListingFetcher::new(Arc::new(store), Catalog::default());

    let err = fetcher
        .fetch_collection("B2B_Business_Brokers_current")
        .unwrap_err();
    match &err {
        FetchError::PermissionDenied { collection } => {
            assert_eq!(collection, "B2B_Business_Brokers_current")
        }
        other => panic!("expected permission denied, got {other:?}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("Missing or insufficient permissions"));
    assert!(msg.contains("'B2B_Business_Brokers_current'"));
}

#[test]
fn transport_errors_keep_their_message() {
    let fetcher = ListingFetcher::new(Arc::new(BrokenStore), Catalog::default());

    let err = fetcher.fetch_collection("Kulshan_Commercial_current").unwrap_err();
    assert_eq!(err.to_string(), "connection reset by peer");

    let err = fetcher.fetch_by_id("Kulshan_Commercial_current", "x").unwrap_err();
    assert!(matches!(err, FetchError::Store(_)));
}
