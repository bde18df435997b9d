// Export the search module
pub mod search;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::search::{
    download_transcript, download_transcript_from, sanitise_filename, DOWNLOAD_DIR,
    SEARCH_INPUT_SELECTORS, SEARCH_URL,
};
