// src/tests/store_tests.rs

use crate::store::firestore::{classify_reply, decode_fields, decode_value, Transport};
use crate::store::{DocumentStore, FirestoreConfig, FirestoreStore, StoreError};
use crate::tests::utils::{fields, seed, temp_store};
use serde_json::json;
use std::collections::VecDeque;
use std::fs;
use std::sync::{Arc, Mutex};
use url::Url;

/// Replays canned replies in order and records the URLs asked for.
#[derive(Clone, Default)]
struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<(u16, String)>>>,
    requested: Arc<Mutex<Vec<Url>>>,
}

impl ScriptedTransport {
    fn new(replies: &[(u16, &str)]) -> Self {
        let t = Self::default();
        t.replies
            .lock()
            .unwrap()
            .extend(replies.iter().map(|(s, b)| (*s, b.to_string())));
        t
    }

    fn requested(&self) -> Vec<Url> {
        self.requested.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &Url) -> Result<(u16, String), StoreError> {
        self.requested.lock().unwrap().push(url.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| StoreError::Transport("no scripted reply left".into()))
    }
}

fn firestore(transport: &ScriptedTransport) -> FirestoreStore {
    let cfg = FirestoreConfig {
        project_id: "kulshan-site".into(),
        api_key: Some("secret".into()),
        page_size: 2,
        ..FirestoreConfig::default()
    };
    FirestoreStore::with_transport(cfg, Box::new(transport.clone()))
}

#[test]
fn sqlite_lists_in_insert_order_and_gets_by_id() {
    let store = temp_store("list_get");
    seed(&store, "listings", "b", json!({"title": "Second"}));
    seed(&store, "listings", "a", json!({"title": "First"}));
    seed(&store, "previous-deals", "z", json!({"title": "Closed"}));

    let docs = store.list("listings").unwrap();
    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);

    let found = store.get("listings", "a").unwrap().expect("document a");
    assert_eq!(found.fields.get("title"), Some(&json!("First")));

    assert!(store.get("listings", "missing").unwrap().is_none());
    assert!(store.list("nothing-here").unwrap().is_empty());
}

#[test]
fn sqlite_put_replaces_existing_document() {
    let store = temp_store("replace");
    seed(&store, "listings", "a", json!({"title": "Old"}));
    seed(&store, "listings", "a", json!({"title": "New"}));

    let docs = store.list("listings").unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].fields.get("title"), Some(&json!("New")));
}

#[test]
fn sqlite_refuses_collections_outside_the_readable_set() {
    let store = temp_store("readable").with_readable(["listings"]);
    seed(&store, "previous-deals", "z", json!({"title": "Closed"}));

    assert!(store.list("listings").is_ok());
    match store.list("previous-deals") {
        Err(StoreError::PermissionDenied { collection }) => assert_eq!(collection, "previous-deals"),
        other => panic!("expected permission denied, got {other:?}"),
    }
    assert!(matches!(
        store.get("previous-deals", "z"),
        Err(StoreError::PermissionDenied { .. })
    ));
}

#[test]
fn sqlite_imports_array_and_keyed_exports() {
    let store = temp_store("import");
    let dir = std::env::temp_dir();

    let array_path = dir.join(format!("kulshan_import_array_{}.json", std::process::id()));
    fs::write(
        &array_path,
        r#"[{"id": "one", "title": "One"}, {"_id": 2, "title": "Two"}]"#,
    )
    .unwrap();
    assert_eq!(store.import_file("listings", &array_path).unwrap(), 2);

    let two = store.get("listings", "2").unwrap().expect("numeric id imported");
    assert_eq!(two.fields.get("title"), Some(&json!("Two")));
    assert!(!two.fields.contains_key("_id"));

    let keyed_path = dir.join(format!("kulshan_import_keyed_{}.json", std::process::id()));
    fs::write(&keyed_path, r#"{"k1": {"title": "Keyed"}}"#).unwrap();
    assert_eq!(store.import_file("previous-deals", &keyed_path).unwrap(), 1);
    assert!(store.get("previous-deals", "k1").unwrap().is_some());

    let bad_path = dir.join(format!("kulshan_import_bad_{}.json", std::process::id()));
    fs::write(&bad_path, r#"[{"title": "No id"}]"#).unwrap();
    assert!(matches!(
        store.import_file("listings", &bad_path),
        Err(StoreError::Parse(_))
    ));

    for p in [array_path, keyed_path, bad_path] {
        let _ = fs::remove_file(p);
    }
}

#[test]
fn firestore_values_decode_to_plain_json() {
    let raw = fields(json!({
        "title": {"stringValue": "Marina Office"},
        "price": {"integerValue": "1250000"},
        "cap": {"doubleValue": 6.5},
        "active": {"booleanValue": true},
        "gone": {"nullValue": null},
        "listedAt": {"timestampValue": "2025-03-03T00:00:00Z"},
        "address": {"mapValue": {"fields": {
            "city": {"stringValue": "Blaine"},
            "state": {"stringValue": "WA"}
        }}},
        "images": {"arrayValue": {"values": [
            {"stringValue": "https://img.example/1.jpg"},
            {"stringValue": "https://img.example/2.jpg"}
        ]}},
        "empty": {"arrayValue": {}},
    }));

    let decoded = decode_fields(&raw);
    assert_eq!(
        serde_json::Value::Object(decoded),
        json!({
            "title": "Marina Office",
            "price": 1250000,
            "cap": 6.5,
            "active": true,
            "gone": null,
            "listedAt": "2025-03-03T00:00:00Z",
            "address": {"city": "Blaine", "state": "WA"},
            "images": ["https://img.example/1.jpg", "https://img.example/2.jpg"],
            "empty": [],
        })
    );

    assert_eq!(decode_value(&json!({"doubleValue": "2.5"})), json!(2.5));
    assert_eq!(decode_value(&json!("already plain")), json!("already plain"));
}

#[test]
fn firestore_replies_are_classified() {
    assert_eq!(classify_reply("c", 200, "{}").unwrap(), Some("{}"));
    assert_eq!(classify_reply("c", 404, "").unwrap(), None);

    for status in [401, 403] {
        assert!(matches!(
            classify_reply("c", status, ""),
            Err(StoreError::PermissionDenied { ref collection }) if collection == "c"
        ));
    }

    let denied_body = r#"{"error": {"code": 400, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED"}}"#;
    assert!(matches!(
        classify_reply("c", 400, denied_body),
        Err(StoreError::PermissionDenied { .. })
    ));

    let failed_body = r#"{"error": {"code": 500, "message": "backend unavailable", "status": "INTERNAL"}}"#;
    match classify_reply("c", 500, failed_body) {
        Err(StoreError::Transport(msg)) => assert!(msg.contains("backend unavailable")),
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(matches!(
        classify_reply("c", 502, "<html>bad gateway</html>"),
        Err(StoreError::Transport(ref m)) if m.contains("bad gateway")
    ));
}

#[test]
fn firestore_list_follows_page_tokens() {
    let transport = ScriptedTransport::new(&[
        (
            200,
            r#"{"documents": [
                {"name": "projects/p/databases/(default)/documents/listings/a", "fields": {"title": {"stringValue": "A"}}},
                {"name": "projects/p/databases/(default)/documents/listings/b", "fields": {"title": {"stringValue": "B"}}}
            ], "nextPageToken": "page-2"}"#,
        ),
        (
            200,
            r#"{"documents": [
                {"name": "projects/p/databases/(default)/documents/listings/c", "fields": {"price": {"integerValue": "900000"}}}
            ]}"#,
        ),
    ]);

    let docs = firestore(&transport).list("listings").unwrap();
    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(docs[2].fields.get("price"), Some(&json!(900000)));

    let urls = transport.requested();
    assert_eq!(urls.len(), 2);
    assert!(urls[0]
        .path()
        .ends_with("/projects/kulshan-site/databases/(default)/documents/listings"));
    let query = |u: &Url, key: &str| {
        u.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    };
    assert_eq!(query(&urls[0], "pageSize").as_deref(), Some("2"));
    assert_eq!(query(&urls[0], "key").as_deref(), Some("secret"));
    assert_eq!(query(&urls[0], "pageToken"), None);
    assert_eq!(query(&urls[1], "pageToken").as_deref(), Some("page-2"));
}

#[test]
fn firestore_get_missing_is_none_and_denied_is_an_error() {
    let transport = ScriptedTransport::new(&[
        (404, r#"{"error": {"code": 404, "message": "not found", "status": "NOT_FOUND"}}"#),
        (403, ""),
        (200, r#"{"name": "projects/p/databases/(default)/documents/listings/Cafe & Bakery", "fields": {}}"#),
    ]);
    let store = firestore(&transport);

    assert!(store.get("listings", "ghost").unwrap().is_none());
    assert!(matches!(
        store.get("listings", "x"),
        Err(StoreError::PermissionDenied { .. })
    ));

    let found = store.get("listings", "Cafe & Bakery").unwrap().expect("document");
    assert_eq!(found.id, "Cafe & Bakery");
    assert!(transport.requested()[2]
        .path()
        .ends_with("/documents/listings/Cafe%20&%20Bakery"));
}

#[test]
fn firestore_list_of_unknown_collection_is_empty() {
    let transport = ScriptedTransport::new(&[(404, "")]);
    assert!(firestore(&transport).list("nothing").unwrap().is_empty());
}
