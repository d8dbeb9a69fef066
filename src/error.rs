//! Error types for the pagekeep crate

use thiserror::Error;

use crate::extractor::{ExtractError, FetchError};

/// Result type for pagekeep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for turning a URL into an article
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching the page failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Extracting the article failed
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),
}
