// src/tests/utils.rs

use crate::catalog::Catalog;
use crate::fetcher::ListingFetcher;
use crate::leads::{Lead, LeadRelay, RelayError};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use crate::store::{RawDocument, SqliteStore};
use astra::{Body, Request, Response};
use http::Method;
use serde_json::{Map, Value};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// A fresh store in its own temp file, with the production schema applied.
pub fn temp_store(name: &str) -> SqliteStore {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "kulshan_{name}_{}_{nanos}_{}.sqlite3",
        std::process::id(),
        NEXT_DB.fetch_add(1, Ordering::SeqCst)
    ));

    let store = SqliteStore::new(path.to_string_lossy().to_string());
    store
        .init()
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    store
}

/// Fields of a JSON object literal.
pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn seed(store: &SqliteStore, collection: &str, id: &str, value: Value) {
    store
        .put(collection, &RawDocument::new(id, fields(value)))
        .expect("seed document");
}

/// Records every lead it is handed; optionally refuses them.
#[derive(Clone, Default)]
pub struct StubRelay {
    pub received: Arc<Mutex<Vec<Lead>>>,
    pub reject_with: Option<String>,
}

impl StubRelay {
    pub fn rejecting(reason: &str) -> Self {
        Self {
            reject_with: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn leads(&self) -> Vec<Lead> {
        self.received.lock().unwrap().clone()
    }
}

impl LeadRelay for StubRelay {
    fn submit(&self, lead: &Lead) -> Result<(), RelayError> {
        self.received.lock().unwrap().push(lead.clone());
        match &self.reject_with {
            Some(reason) => Err(RelayError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

pub fn test_state(store: SqliteStore, relay: StubRelay) -> AppState {
    AppState::new(
        ListingFetcher::new(Arc::new(store), Catalog::default()),
        Box::new(relay),
        Duration::from_secs(300),
    )
}

/// Run a request through the router the way the server closure does.
pub fn send(state: &AppState, method: Method, uri: &str, body: &str) -> (u16, String) {
    let mut req = Request::new(Body::from(body.to_string()));
    *req.method_mut() = method;
    *req.uri_mut() = uri.parse().unwrap();

    let resp: Response = match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    };

    let status = resp.status().as_u16();
    let mut body = resp.into_body();
    let mut text = String::new();
    body.reader().read_to_string(&mut text).unwrap();
    (status, text)
}

pub fn get(state: &AppState, uri: &str) -> (u16, String) {
    send(state, Method::GET, uri, "")
}

pub fn post_form(state: &AppState, uri: &str, form: &str) -> (u16, String) {
    send(state, Method::POST, uri, form)
}
