// src/config.rs

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::DEFAULT_STALE_AFTER;
use crate::catalog::{Catalog, Section};
use crate::leads::relay::WEB3FORMS_ENDPOINT;
use crate::store::FirestoreConfig;

pub const ENV_CONFIG_PATH: &str = "KULSHAN_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "kulshan.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub relay: RelayConfig,
    /// Built-in collection layout used when `sections` is empty.
    pub layout: Layout,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `Kulshan_Commercial_*` and `B2B_Business_Brokers_*`.
    #[default]
    Brands,
    /// `listings` and `previous-deals`.
    Legacy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub max_workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            max_workers: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sqlite,
    Firestore,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,
    pub sqlite_path: String,
    /// SQLite only: collections the site may read. Empty means all.
    pub readable_collections: Vec<String>,
    pub firestore: FirestoreConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            sqlite_path: "kulshan.sqlite3".to_string(),
            readable_collections: Vec::new(),
            firestore: FirestoreConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub stale_after_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: DEFAULT_STALE_AFTER.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub endpoint: String,
    pub access_key: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: WEB3FORMS_ENDPOINT.to_string(),
            access_key: String::new(),
        }
    }
}

impl AppConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing config TOML")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::parse(&text)
    }

    /// Config resolution:
    /// 1) `explicit` (from the command line)
    /// 2) $KULSHAN_CONFIG
    /// 3) ./kulshan.toml if present
    /// 4) built-in defaults
    ///
    /// Secrets in the environment override the file either way.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from);

        let mut cfg = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) if path.exists() => Self::load_from(&path)?,
            Some(path) => return Err(anyhow!("config file {} does not exist", path.display())),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load_from(&default)?
                } else {
                    Self::default()
                }
            }
        };

        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = set("WEB3FORMS_ACCESS_KEY") {
            self.relay.access_key = key;
        }
        if let Some(key) = set("FIRESTORE_API_KEY") {
            self.store.firestore.api_key = Some(key);
        }
        if let Some(project) = set("FIRESTORE_PROJECT_ID") {
            self.store.firestore.project_id = project;
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.server
            .addr
            .parse()
            .with_context(|| format!("invalid server.addr '{}'", self.server.addr))
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.cache.stale_after_secs)
    }

    /// Configured sections, or the built-in layout when none are listed.
    pub fn catalog(&self) -> Catalog {
        match (self.sections.is_empty(), self.layout) {
            (false, _) => Catalog::new(self.sections.clone()),
            (true, Layout::Brands) => Catalog::default(),
            (true, Layout::Legacy) => Catalog::legacy(),
        }
    }
}
