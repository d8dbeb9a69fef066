//! # Article Extraction Module
//!
//! Turns a URL into an [`Article`]: the page is fetched with a single GET,
//! parsed into a document tree, stripped of non-content elements, and reduced
//! to a title and a whitespace-normalized, length-capped body.
//!
//! ## Key Components
//!
//! - `Fetcher`: single-request page retrieval with recoverable errors
//! - `Document`: the select / remove / text capability the rules run against
//! - `extract_article`: the extraction rules over any `Document`
//! - `ExtractorConfig`, `FetchConfig`: selectors, length cap, timeout

mod config;
mod content_extraction;
mod document;
mod error;
mod fetch;

pub use config::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_CONTENT_CHARS, ExtractorConfig,
    ExtractorConfigBuilder, FetchConfig,
};
pub use content_extraction::{
    extract_article, extract_article_from_html, normalize_whitespace, truncate_chars,
};
pub use document::{Document, HtmlDocument};
pub use error::{ExtractError, FetchError};
pub use fetch::Fetcher;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

/// An article extracted from a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Text of the first heading inside the article, may be empty
    pub title: String,

    /// Normalized and capped article body, may be empty
    pub content: String,
}

impl Article {
    /// Fetch `url` and extract its article
    #[instrument(skip(fetcher, config))]
    pub async fn fetch_and_extract(
        fetcher: &Fetcher,
        url: &str,
        config: &ExtractorConfig,
    ) -> crate::Result<Self> {
        let body = fetcher.fetch(url).await?;
        let article = extract_article_from_html(&body, config)?;
        info!(
            title = %article.title,
            content_chars = article.content.chars().count(),
            "Extracted article"
        );
        Ok(article)
    }

    /// The two record fields this article is stored as
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(self.title));
        fields.insert("content".to_string(), Value::String(self.content));
        fields
    }
}
