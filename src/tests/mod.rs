mod fetcher_tests;
mod store_tests;
mod template_tests;
mod utils;
