//! Error types for the extractor module

use thiserror::Error;

/// Error type for fetching a page
///
/// Every variant is scoped to the request that triggered the fetch. A bad URL
/// or an unreachable upstream never takes the service down.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed as an absolute URL
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The URL as supplied by the caller
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// The URL uses a scheme other than http or https
    #[error("Unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    /// Network or transport failure, including a failure to read the body
    #[error("Transport error: {cause}")]
    Transport {
        /// Underlying client error
        #[source]
        cause: reqwest::Error,
    },

    /// The upstream answered with anything other than 200 OK
    #[error("Unexpected status code: {status} {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase, empty if unknown
        reason: String,
    },

    /// The response body exceeded the configured size cap
    #[error("Response body larger than {limit} bytes")]
    BodyTooLarge {
        /// The cap in bytes
        limit: usize,
    },

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(cause: reqwest::Error) -> Self {
        FetchError::Transport { cause }
    }
}

/// Error type for article extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A configured CSS selector failed to parse
    #[error("Invalid selector '{selector}': {reason}")]
    Selector {
        /// The selector text
        selector: String,
        /// Parser message
        reason: String,
    },
}
