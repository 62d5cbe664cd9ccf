// src/errors.rs

use thiserror::Error;

use crate::fetcher::FetchError;
use crate::leads::RelayError;

/// Errors originating from either the server logic
/// (routing, missing resources, bad forms) or downstream layers (store, relay).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Carries the remediation text from the fetcher.
    #[error("{0}")]
    PermissionDenied(String),

    #[error("Store Error: {0}")]
    StoreError(String),

    #[error("Form Relay Error: {0}")]
    RelayError(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::PermissionDenied(_) => 403,
            ServerError::RelayError(_) => 502,
            ServerError::StoreError(_) | ServerError::InternalError => 500,
        }
    }
}

impl From<FetchError> for ServerError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::PermissionDenied { .. } => ServerError::PermissionDenied(err.to_string()),
            FetchError::Store(msg) => ServerError::StoreError(msg),
        }
    }
}

impl From<RelayError> for ServerError {
    fn from(err: RelayError) -> Self {
        ServerError::RelayError(err.to_string())
    }
}
