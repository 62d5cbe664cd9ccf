use crate::config::{AppConfig, Backend};
use crate::fetcher::ListingFetcher;
use crate::leads::Web3FormsRelay;
use crate::router::handle;
use crate::state::AppState;
use crate::store::{DocumentStore, FirestoreStore, SqliteStore};
use anyhow::{bail, Context, Result};
use astra::Server;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cache;
mod catalog;
mod config;
mod domain;
mod errors;
mod fetcher;
mod leads;
mod responses;
mod router;
mod state;
mod store;
mod templates;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "kulshan", about = "Listings site for Kulshan Commercial and B2B Business Brokers")]
struct Cli {
    /// Config file (defaults to $KULSHAN_CONFIG, then ./kulshan.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the site (default)
    Serve,
    /// Load a JSON export of documents into the local SQLite store
    Import {
        #[arg(long)]
        collection: String,
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kulshan_listings=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

fn open_store(cfg: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
    match cfg.store.backend {
        Backend::Sqlite => {
            let store = SqliteStore::new(cfg.store.sqlite_path.clone())
                .with_readable(cfg.store.readable_collections.iter().cloned());
            store.init().context("initializing SQLite document store")?;
            Ok(Arc::new(store))
        }
        Backend::Firestore => {
            if cfg.store.firestore.project_id.is_empty() {
                bail!("store.firestore.project_id (or FIRESTORE_PROJECT_ID) is required");
            }
            Ok(Arc::new(FirestoreStore::new(cfg.store.firestore.clone())))
        }
    }
}

fn serve(cfg: AppConfig) -> Result<()> {
    let addr = cfg.socket_addr()?;
    let store = open_store(&cfg)?;

    if cfg.relay.access_key.is_empty() {
        tracing::warn!("relay.access_key is empty; lead forms will be rejected by the relay");
    }

    let state = AppState::new(
        ListingFetcher::new(store, cfg.catalog()),
        Box::new(Web3FormsRelay::new(
            cfg.relay.endpoint.clone(),
            cfg.relay.access_key.clone(),
        )),
        cfg.stale_after(),
    );

    tracing::info!(%addr, sections = state.catalog().sections().len(), "starting server");

    let server = Server::bind(&addr).max_workers(cfg.server.max_workers);

    server
        .serve(move |req, _info| match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => responses::error_to_response(err),
        })
        .context("server ended with error")?;

    tracing::info!("server shut down cleanly");
    Ok(())
}

fn import(cfg: &AppConfig, collection: &str, file: &Path) -> Result<()> {
    if cfg.store.backend != Backend::Sqlite {
        bail!("import only writes to the SQLite store");
    }
    let store = SqliteStore::new(cfg.store.sqlite_path.clone());
    store.init()?;
    let count = store
        .import_file(collection, file)
        .with_context(|| format!("importing {}", file.display()))?;
    println!("Imported {count} documents into '{collection}' ({})", store.path());
    Ok(())
}

fn main() -> Result<()> {
    // .env is optional; it only fills in secrets for local runs.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg),
        Command::Import { collection, file } => import(&cfg, &collection, &file),
    }
}
