//! # Service Configuration Module
//!
//! Settings for the HTTP service: where it listens, where the record store
//! lives, which collection articles go into, where pages and static files are
//! read from, and how pages are fetched and extracted.

use std::path::PathBuf;

use crate::extractor::{ExtractorConfig, FetchConfig};

/// Configuration for the service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to (e.g. "127.0.0.1:8090")
    pub bind_address: String,

    /// Path of the LibSQL database file
    pub database_path: PathBuf,

    /// Collection extracted articles are stored in
    pub collection: String,

    /// Directory static files are served from
    pub public_dir: PathBuf,

    /// Directory holding the page layout and page bodies
    pub views_dir: PathBuf,

    /// Fetcher settings
    pub fetch: FetchConfig,

    /// Extraction settings
    pub extractor: ExtractorConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8090".to_string(),
            database_path: PathBuf::from("pb_data/data.db"),
            collection: "articles".to_string(),
            public_dir: PathBuf::from("pb_public"),
            views_dir: PathBuf::from("views"),
            fetch: FetchConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

/// Builder for ServiceConfig
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
        }
    }

    /// Set the bind address
    pub fn bind_address(mut self, bind_address: impl Into<String>) -> Self {
        self.config.bind_address = bind_address.into();
        self
    }

    /// Set the database path
    pub fn database_path(mut self, database_path: impl Into<PathBuf>) -> Self {
        self.config.database_path = database_path.into();
        self
    }

    /// Set the article collection
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.config.collection = collection.into();
        self
    }

    /// Set the static file directory
    pub fn public_dir(mut self, public_dir: impl Into<PathBuf>) -> Self {
        self.config.public_dir = public_dir.into();
        self
    }

    /// Set the views directory
    pub fn views_dir(mut self, views_dir: impl Into<PathBuf>) -> Self {
        self.config.views_dir = views_dir.into();
        self
    }

    /// Set the fetcher settings
    pub fn fetch(mut self, fetch: FetchConfig) -> Self {
        self.config.fetch = fetch;
        self
    }

    /// Set the extraction settings
    pub fn extractor(mut self, extractor: ExtractorConfig) -> Self {
        self.config.extractor = extractor;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ServiceConfig {
        self.config
    }
}

impl ServiceConfig {
    /// Create a new builder
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::new()
    }
}
