// src/leads/mod.rs
//
// Lead capture: the "Request information" form on a listing and the general
// contact form both end up as a `Lead` handed to the relay.

pub mod relay;

pub use relay::{LeadRelay, RelayError, Web3FormsRelay};

use crate::domain::Listing;
use crate::errors::ServerError;

/// The listing a lead is about, as shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRef {
    pub title: String,
    pub category: String,
    pub price: String,
}

impl From<&Listing> for ListingRef {
    fn from(listing: &Listing) -> Self {
        Self {
            title: listing.title.clone(),
            category: listing.category.clone(),
            price: listing.price.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    /// Contact-page division, e.g. "Commercial Real Estate".
    pub topic: Option<String>,
    pub listing: Option<ListingRef>,
}

impl Lead {
    /// Build from decoded form fields. Name, email and phone are required.
    pub fn from_form<'a, I>(pairs: I) -> Result<Self, ServerError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut name = String::new();
        let mut email = String::new();
        let mut phone = String::new();
        let mut message = None;
        let mut topic = None;

        for (key, value) in pairs {
            let value = value.trim();
            match key {
                "name" => name = value.to_string(),
                "email" => email = value.to_string(),
                "phone" => phone = value.to_string(),
                "message" if !value.is_empty() => message = Some(value.to_string()),
                "topic" if !value.is_empty() => topic = Some(value.to_string()),
                _ => {}
            }
        }

        if name.is_empty() {
            return Err(ServerError::BadRequest("Please enter your name.".into()));
        }
        let email = normalize_email(&email)?;
        if phone.is_empty() {
            return Err(ServerError::BadRequest("Please enter a phone number.".into()));
        }

        Ok(Self {
            name,
            email,
            phone,
            message,
            topic,
            listing: None,
        })
    }

    pub fn about(mut self, listing: &Listing) -> Self {
        self.listing = Some(ListingRef::from(listing));
        self
    }

    pub fn subject(&self) -> String {
        match (&self.listing, &self.topic) {
            (Some(listing), _) => format!("Business Listing Inquiry: {}", listing.title),
            (None, Some(topic)) => format!("Contact Inquiry: {topic}"),
            (None, None) => "Business Listing Inquiry: General Inquiry".to_string(),
        }
    }
}

/// Trim + lowercase, minimal sanity check.
pub fn normalize_email(email: &str) -> Result<String, ServerError> {
    let e = email.trim().to_lowercase();
    if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
        return Err(ServerError::BadRequest(
            "Please enter a valid email address.".into(),
        ));
    }
    Ok(e)
}
