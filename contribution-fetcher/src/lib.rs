// Export the fetcher module
pub mod fetcher;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key functions for easier access
pub use crate::fetcher::{
    collect_txt_links, fetch_txt_for_date, fetch_txt_for_date_into, filename_for, OUTPUT_ROOT,
    SEARCH_URL,
};
