pub mod card;
pub mod error;
pub mod gallery;
pub mod inquiry_form;

pub use card::{card, listing_card, listing_href, safe_url, status_badge, PLACEHOLDER_IMAGE};
pub use error::error_page;
pub use gallery::image_gallery;
pub use inquiry_form::{inquiry_form, inquiry_result};
