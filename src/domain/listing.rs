// src/domain/listing.rs

use serde_json::{Map, Value};

use crate::domain::details::{format_size, normalize_highlights};
use crate::domain::fallback::{as_text, is_present, resolve_alias, scan_price_like};
use crate::domain::location::format_location;
use crate::domain::price::display_price;

pub const UNTITLED: &str = "Untitled Property";
pub const DEFAULT_CATEGORY: &str = "Commercial";

// Alias lists, highest priority first. The store's schema is not ours, so
// these are the contract with whoever writes the documents.
pub const TITLE_KEYS: &[&str] = &["title", "name", "propertyName"];
pub const LOCATION_KEYS: &[&str] = &["location", "address", "city", "locationName"];
pub const PRICE_KEYS: &[&str] = &["price", "askingPrice", "priceFormatted", "priceAmount", "value"];
pub const DETAIL_PRICE_KEYS: &[&str] = &[
    "originalAskingPrice",
    "soldPrice",
    "listPrice",
    "amount",
    "salePrice",
    "priceString",
    "price_string",
];
pub const CATEGORY_KEYS: &[&str] = &["type", "industry", "propertyType", "category"];
pub const SIZE_KEYS: &[&str] = &["size", "sizeFormatted", "squareFeet", "area"];
pub const IMAGE_KEYS: &[&str] = &["image", "imageUrl", "photo", "thumbnail", "imageURL"];
pub const GALLERY_KEYS: &[&str] = &["images", "photos", "gallery"];
pub const DESCRIPTION_KEYS: &[&str] = &["description", "details"];
pub const HIGHLIGHT_KEYS: &[&str] = &["keyHighlights", "highlights"];
pub const STATUS_KEY: &str = "status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Available,
    Sold,
    Pending,
}

impl Status {
    /// Unrecognised or missing values read as `Available`.
    pub fn parse(raw: Option<&Value>) -> Self {
        match raw.and_then(Value::as_str).map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "sold" => Status::Sold,
            Some(s) if s == "pending" => Status::Pending,
            _ => Status::Available,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Sold => "sold",
            Status::Pending => "pending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Available => "Available",
            Status::Sold => "Sold",
            Status::Pending => "Pending",
        }
    }
}

/// A property or business opportunity, current or closed, normalized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub location: String,
    /// Display price, "Price on request" when the record has none.
    pub price: String,
    /// The value the display price was derived from.
    pub raw_price: Option<Value>,
    pub category: String,
    pub size: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub highlights: Vec<String>,
    pub status: Status,
    /// Every raw field the mapper did not consume, untouched.
    pub extra: Map<String, Value>,
}

impl Listing {
    /// Read a pass-through field as text, e.g. `employees` or `established`.
    pub fn extra_text(&self, key: &str) -> Option<String> {
        self.extra.get(key).and_then(as_text)
    }

    pub fn extra_value(&self, key: &str) -> Option<&Value> {
        self.extra.get(key).filter(|v| is_present(v))
    }

    /// Hero / card image: first gallery entry, else the single image.
    pub fn cover_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or(self.image.as_deref())
    }
}

/// Turn one raw document into a [`Listing`]. Never fails: missing fields fall
/// back to placeholders.
pub fn map_document(id: &str, fields: &Map<String, Value>) -> Listing {
    let title = resolve_alias(fields, TITLE_KEYS)
        .and_then(as_text)
        .unwrap_or_else(|| UNTITLED.to_string());

    let location = format_location(resolve_alias(fields, LOCATION_KEYS));

    let raw_price = resolve_price(fields).cloned();
    let price = display_price(raw_price.as_ref());

    let category = resolve_alias(fields, CATEGORY_KEYS)
        .and_then(as_text)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let size = resolve_alias(fields, SIZE_KEYS).and_then(format_size);

    let image = resolve_alias(fields, IMAGE_KEYS).and_then(as_text);
    let images = resolve_images(fields, image.as_deref());

    let description = resolve_alias(fields, DESCRIPTION_KEYS).and_then(as_text);

    let highlights = HIGHLIGHT_KEYS
        .iter()
        .map(|key| normalize_highlights(fields.get(*key)))
        .find(|list| !list.is_empty())
        .unwrap_or_default();

    let status = Status::parse(fields.get(STATUS_KEY));

    Listing {
        id: id.to_string(),
        title,
        location,
        price,
        raw_price,
        category,
        size,
        image,
        images,
        description,
        highlights,
        status,
        extra: pass_through(fields),
    }
}

/// Card aliases, then the detail-page aliases, then any price-looking key.
pub fn resolve_price(fields: &Map<String, Value>) -> Option<&Value> {
    resolve_alias(fields, PRICE_KEYS)
        .or_else(|| resolve_alias(fields, DETAIL_PRICE_KEYS))
        .or_else(|| {
            let tried: Vec<&str> = PRICE_KEYS.iter().chain(DETAIL_PRICE_KEYS).copied().collect();
            scan_price_like(fields, &tried)
        })
}

fn resolve_images(fields: &Map<String, Value>, image: Option<&str>) -> Vec<String> {
    GALLERY_KEYS
        .iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_array))
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .find(|urls| !urls.is_empty())
        .or_else(|| image.map(|url| vec![url.to_string()]))
        .unwrap_or_default()
}

fn pass_through(fields: &Map<String, Value>) -> Map<String, Value> {
    let consumed: [&[&str]; 11] = [
        TITLE_KEYS,
        LOCATION_KEYS,
        PRICE_KEYS,
        DETAIL_PRICE_KEYS,
        CATEGORY_KEYS,
        SIZE_KEYS,
        IMAGE_KEYS,
        GALLERY_KEYS,
        DESCRIPTION_KEYS,
        HIGHLIGHT_KEYS,
        &[STATUS_KEY],
    ];

    fields
        .iter()
        .filter(|(key, _)| !consumed.iter().any(|group| group.contains(&key.as_str())))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
