//! # Extractor Configuration Module
//!
//! Configuration for fetching a page and pulling its article out. Both structs
//! come with defaults that reproduce the plain extraction rules: strip
//! `style`, `noscript` and `script`, take the first `article` as the body and
//! its first `h1` as the title, and cap the body at 5000 characters.
//!
//! ## Key Components
//!
//! - `ExtractorConfig`: selectors and the content length cap
//! - `ExtractorConfigBuilder`: builder for `ExtractorConfig`
//! - `FetchConfig`: request timeout, user agent and body size cap for the
//!   fetcher

use std::time::Duration;

/// Maximum number of characters kept from the article body
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 5000;

/// Default timeout for fetching a page in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Largest response body the fetcher reads, in bytes
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Configuration for the extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// CSS selectors for elements removed before any text is read
    pub strip_selectors: Vec<String>,

    /// CSS selector for the article body; the first match is used
    pub content_selector: String,

    /// CSS selector for the title, searched inside the article body
    pub title_selector: String,

    /// Maximum number of characters kept from the normalized body
    pub max_content_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            strip_selectors: vec![
                "style".to_string(),
                "noscript".to_string(),
                "script".to_string(),
            ],
            content_selector: "article".to_string(),
            title_selector: "h1".to_string(),
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
        }
    }
}

/// Builder for ExtractorConfig
#[derive(Debug, Default)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    /// Set the selectors for elements to strip
    pub fn strip_selectors(mut self, strip_selectors: Vec<String>) -> Self {
        self.config.strip_selectors = strip_selectors;
        self
    }

    /// Set the selector for the article body
    pub fn content_selector(mut self, content_selector: impl Into<String>) -> Self {
        self.config.content_selector = content_selector.into();
        self
    }

    /// Set the selector for the title
    pub fn title_selector(mut self, title_selector: impl Into<String>) -> Self {
        self.config.title_selector = title_selector.into();
        self
    }

    /// Set the content length cap
    pub fn max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.config.max_content_chars = max_content_chars;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

impl ExtractorConfig {
    /// Create a new builder
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }
}

/// Configuration for the page fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Responses with a larger body are rejected
    pub max_body_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: format!("pagekeep/{}", env!("CARGO_PKG_VERSION")),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FetchConfig {
    /// Get the timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
