pub mod details;
pub mod fallback;
pub mod filter;
pub mod listing;
pub mod location;
pub mod price;

pub use filter::{Facets, ListingFilter};
pub use listing::{map_document, Listing, Status};
