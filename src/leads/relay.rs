// src/leads/relay.rs

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::leads::Lead;

pub const WEB3FORMS_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The relay answered but did not report success.
    #[error("Form relay rejected the submission: {0}")]
    Rejected(String),
}

/// Somewhere to send captured leads.
pub trait LeadRelay: Send + Sync {
    fn submit(&self, lead: &Lead) -> Result<(), RelayError>;
}

#[derive(Serialize)]
pub struct RelayPayload<'a> {
    pub access_key: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_industry: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_price: Option<&'a str>,
    pub redirect: &'a str,
}

impl<'a> RelayPayload<'a> {
    pub fn from_lead(access_key: &'a str, lead: &'a Lead) -> Self {
        let listing = lead.listing.as_ref();
        Self {
            access_key,
            name: &lead.name,
            email: &lead.email,
            phone: &lead.phone,
            subject: lead.subject(),
            message: lead.message.as_deref(),
            listing_name: listing.map(|l| l.title.as_str()),
            listing_industry: listing.map(|l| l.category.as_str()),
            listing_price: listing.map(|l| l.price.as_str()),
            redirect: "",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RelayResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl RelayResponse {
    pub fn into_result(self) -> Result<(), RelayError> {
        if self.success {
            Ok(())
        } else {
            Err(RelayError::Rejected(
                self.message.unwrap_or_else(|| "no reason given".to_string()),
            ))
        }
    }
}

/// Posts leads as JSON to a Web3Forms-compatible endpoint.
pub struct Web3FormsRelay {
    endpoint: String,
    access_key: String,
    client: Client,
}

impl Web3FormsRelay {
    pub fn new(endpoint: String, access_key: String) -> Self {
        Self {
            endpoint,
            access_key,
            client: Client::new(),
        }
    }
}

impl LeadRelay for Web3FormsRelay {
    fn submit(&self, lead: &Lead) -> Result<(), RelayError> {
        let payload = RelayPayload::from_lead(&self.access_key, lead);

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| RelayError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        let body: RelayResponse = resp.json().map_err(|e| {
            RelayError::RequestFailed(format!("unreadable relay response ({status}): {e}"))
        })?;

        match body.into_result() {
            Ok(()) => {
                tracing::info!(subject = %payload.subject, "lead relayed");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%status, error = %err, "lead rejected by relay");
                Err(err)
            }
        }
    }
}
