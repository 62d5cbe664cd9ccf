pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{card, error_page, inquiry_form, inquiry_result, listing_card};
pub use layouts::desktop::desktop_layout;
