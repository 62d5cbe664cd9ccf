pub mod contact;
pub mod home;
pub mod listing_detail;
pub mod listings;

pub use contact::contact_page;
pub use home::{home_page, FeaturedSection};
pub use listing_detail::{listing_detail_page, DetailVm};
pub use listings::{listings_page, ListingsVm};
