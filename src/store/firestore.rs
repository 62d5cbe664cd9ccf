// src/store/firestore.rs

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use url::Url;

use crate::store::{DocumentStore, RawDocument, StoreError};

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub database: String,
    pub page_size: u32,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            database: "(default)".to_string(),
            page_size: 300,
        }
    }
}

/// One GET against the REST API: status code and body text.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> Result<(u16, String), StoreError>;
}

/// The real transport, a blocking reqwest client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<(u16, String), StoreError> {
        // The query string carries the API key; keep it out of the logs.
        tracing::debug!(path = url.path(), "firestore request");
        let resp = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .map_err(|e| StoreError::Transport(format!("Firestore request failed: {e}")))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .map_err(|e| StoreError::Transport(format!("reading Firestore response: {e}")))?;
        Ok((status, text))
    }
}

/// Read-only client for the Firestore REST API.
pub struct FirestoreStore {
    cfg: FirestoreConfig,
    transport: Box<dyn Transport>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl FirestoreStore {
    pub fn new(cfg: FirestoreConfig) -> Self {
        Self::with_transport(cfg, Box::new(HttpTransport::new()))
    }

    pub fn with_transport(cfg: FirestoreConfig, transport: Box<dyn Transport>) -> Self {
        Self { cfg, transport }
    }

    /// `{base}/projects/{project}/databases/{db}/documents/{segments...}`,
    /// with each segment percent-encoded.
    fn documents_url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.cfg.base_url)
            .map_err(|e| StoreError::Transport(format!("bad Firestore base url: {e}")))?;

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| StoreError::Transport("Firestore base url cannot be a base".into()))?;
            path.pop_if_empty();
            path.extend([
                "projects",
                self.cfg.project_id.as_str(),
                "databases",
                self.cfg.database.as_str(),
                "documents",
            ]);
            path.extend(segments);
        }

        if let Some(key) = &self.cfg.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    /// GET and classify; `None` for a 404.
    fn fetch(&self, collection: &str, url: &Url) -> Result<Option<String>, StoreError> {
        let (status, body) = self.transport.get(url)?;
        classify_reply(collection, status, &body).map(|found| found.map(str::to_string))
    }
}

impl DocumentStore for FirestoreStore {
    fn list(&self, collection: &str) -> Result<Vec<RawDocument>, StoreError> {
        let mut out = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.documents_url(&[collection])?;
            {
                let mut q = url.query_pairs_mut();
                q.append_pair("pageSize", &self.cfg.page_size.to_string());
                if let Some(token) = &page_token {
                    q.append_pair("pageToken", token);
                }
            }

            // A collection that was never written reads as empty.
            let Some(body) = self.fetch(collection, &url)? else {
                break;
            };
            let page: ListResponse = parse_json(&body)?;

            out.extend(page.documents.into_iter().map(into_raw));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(out)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<RawDocument>, StoreError> {
        let url = self.documents_url(&[collection, id])?;
        match self.fetch(collection, &url)? {
            None => Ok(None),
            Some(body) => Ok(Some(into_raw(parse_json::<FirestoreDocument>(&body)?))),
        }
    }
}

/// Map a REST reply to the store's outcomes: the body on 2xx, `None` on 404,
/// permission denied on 401/403 or a `PERMISSION_DENIED` error body, and a
/// transport error carrying the server's message otherwise.
pub fn classify_reply<'a>(
    collection: &str,
    status: u16,
    body: &'a str,
) -> Result<Option<&'a str>, StoreError> {
    let denied = || StoreError::PermissionDenied {
        collection: collection.to_string(),
    };

    match status {
        200..=299 => Ok(Some(body)),
        404 => Ok(None),
        401 | 403 => Err(denied()),
        _ => Err(match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(env) if env.error.status == "PERMISSION_DENIED" => denied(),
            Ok(env) => StoreError::Transport(format!("Firestore {status}: {}", env.error.message)),
            Err(_) => StoreError::Transport(format!("Firestore {status}: {body}")),
        }),
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Parse(e.to_string()))
}

fn into_raw(doc: FirestoreDocument) -> RawDocument {
    let id = doc.name.rsplit('/').next().unwrap_or_default().to_string();
    RawDocument::new(id, decode_fields(&doc.fields))
}

pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), decode_value(v)))
        .collect()
}

/// Unwrap Firestore's typed value envelope (`{"stringValue": "..."}` and
/// friends) into plain JSON.
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return value.clone();
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            inner.clone()
        }
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| inner.clone()),
            other => other.clone(),
        },
        "doubleValue" => match inner {
            Value::Number(_) => inner.clone(),
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        },
        "geoPointValue" => inner.clone(),
        "mapValue" => inner
            .get("fields")
            .and_then(Value::as_object)
            .map(|f| Value::Object(decode_fields(f)))
            .unwrap_or_else(|| Value::Object(Map::new())),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|vals| vals.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        _ => value.clone(),
    }
}
