// src/store/sqlite.rs

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::store::{DocumentStore, RawDocument, StoreError};

const SCHEMA: &str = include_str!("../../sql/schema.sql");

// One connection per worker thread per database file.
thread_local! {
    static DB_CONNS: RefCell<HashMap<String, Connection>> = RefCell::new(HashMap::new());
}

/// Documents kept in a local SQLite file, one JSON blob per row.
#[derive(Clone)]
pub struct SqliteStore {
    path: String,
    /// When set, reads outside these collections are refused.
    readable: Option<HashSet<String>>,
}

impl SqliteStore {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            readable: None,
        }
    }

    /// Restrict reads to `collections`. An empty list leaves every collection readable.
    pub fn with_readable<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = collections.into_iter().map(Into::into).collect();
        self.readable = (!set.is_empty()).then_some(set);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut conns = cell.borrow_mut();
                if !conns.contains_key(&self.path) {
                    let conn = Connection::open(&self.path).map_err(|e| {
                        StoreError::Transport(format!("Open DB failed: {e}"))
                    })?;
                    conns.insert(self.path.clone(), conn);
                }
                let conn = conns
                    .get_mut(&self.path)
                    .ok_or_else(|| StoreError::Transport("connection slot missing".into()))?;
                f(conn)
            })
            .map_err(|_| StoreError::Transport("thread-local connection unavailable".into()))?
    }

    /// Create the tables if they don't exist yet.
    pub fn init(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA)
                .map_err(|e| StoreError::Transport(format!("Failed to apply schema: {e}")))
        })?;
        tracing::info!(path = %self.path, "document store ready");
        Ok(())
    }

    /// Insert or replace one document.
    pub fn put(&self, collection: &str, doc: &RawDocument) -> Result<(), StoreError> {
        let data = serde_json::to_string(&doc.fields)
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO documents (collection, id, data)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(collection, id) DO UPDATE SET data = excluded.data
                "#,
                params![collection, doc.id, data],
            )
            .map_err(|e| classify(collection, e))?;
            Ok(())
        })
    }

    /// Load a JSON export into `collection`. Accepts either an array of objects
    /// carrying an `id` (or `_id` / `docId`) field, or an object keyed by id.
    pub fn import_file(&self, collection: &str, path: &Path) -> Result<usize, StoreError> {
        let text = fs::read_to_string(path)
            .map_err(|e| StoreError::Transport(format!("reading {}: {e}", path.display())))?;
        let parsed: Value =
            serde_json::from_str(&text).map_err(|e| StoreError::Parse(e.to_string()))?;

        let docs = documents_from_export(parsed)?;

        self.with_conn(|conn| {
            let tx = conn.transaction().map_err(|e| classify(collection, e))?;
            for doc in &docs {
                let data = serde_json::to_string(&doc.fields)
                    .map_err(|e| StoreError::Parse(e.to_string()))?;
                tx.execute(
                    r#"
                    INSERT INTO documents (collection, id, data)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT(collection, id) DO UPDATE SET data = excluded.data
                    "#,
                    params![collection, doc.id, data],
                )
                .map_err(|e| classify(collection, e))?;
            }
            tx.commit().map_err(|e| classify(collection, e))
        })?;

        tracing::info!(collection, count = docs.len(), "imported documents");
        Ok(docs.len())
    }

    fn check_readable(&self, collection: &str) -> Result<(), StoreError> {
        match &self.readable {
            Some(allowed) if !allowed.contains(collection) => Err(StoreError::PermissionDenied {
                collection: collection.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl DocumentStore for SqliteStore {
    fn list(&self, collection: &str) -> Result<Vec<RawDocument>, StoreError> {
        self.check_readable(collection)?;

        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, data FROM documents WHERE collection = ?1 ORDER BY rowid")
                .map_err(|e| classify(collection, e))?;

            let rows = stmt
                .query_map([collection], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })
                .map_err(|e| classify(collection, e))?;

            let mut out = Vec::new();
            for row in rows {
                let (id, data) = row.map_err(|e| classify(collection, e))?;
                out.push(RawDocument::new(id, parse_fields(&data)?));
            }
            Ok(out)
        })
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<RawDocument>, StoreError> {
        self.check_readable(collection)?;

        self.with_conn(|conn| {
            let data: Option<String> = conn
                .query_row(
                    "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                    params![collection, id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| classify(collection, e))?;

            data.map(|d| Ok(RawDocument::new(id, parse_fields(&d)?)))
                .transpose()
        })
    }
}

fn parse_fields(data: &str) -> Result<Map<String, Value>, StoreError> {
    match serde_json::from_str::<Value>(data) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Parse(format!(
            "expected an object, found {}",
            json_kind(&other)
        ))),
        Err(e) => Err(StoreError::Parse(e.to_string())),
    }
}

fn documents_from_export(parsed: Value) -> Result<Vec<RawDocument>, StoreError> {
    match parsed {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let Value::Object(mut fields) = item else {
                    return Err(StoreError::Parse(format!("entry {i} is not an object")));
                };
                let id = ["id", "_id", "docId"]
                    .iter()
                    .find_map(|k| fields.shift_remove(*k))
                    .and_then(|v| match v {
                        Value::String(s) if !s.is_empty() => Some(s),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .ok_or_else(|| StoreError::Parse(format!("entry {i} has no id")))?;
                Ok(RawDocument::new(id, fields))
            })
            .collect(),
        Value::Object(by_id) => by_id
            .into_iter()
            .map(|(id, item)| match item {
                Value::Object(fields) => Ok(RawDocument::new(id, fields)),
                _ => Err(StoreError::Parse(format!("document '{id}' is not an object"))),
            })
            .collect(),
        other => Err(StoreError::Parse(format!(
            "expected an array or object of documents, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// SQLite's own access failures count as permission denied; everything else
/// keeps its message.
fn classify(collection: &str, err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if matches!(
                e.code,
                ErrorCode::PermissionDenied | ErrorCode::AuthorizationForStatementDenied
            ) =>
        {
            StoreError::PermissionDenied {
                collection: collection.to_string(),
            }
        }
        _ => StoreError::Transport(err.to_string()),
    }
}
