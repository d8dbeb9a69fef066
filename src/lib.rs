//! # pagekeep - save the article behind a link
//!
//! A small web service that takes a URL, fetches the page, pulls out its
//! article (title and body text) and stores the result as a record in an
//! embedded LibSQL document store.
//!
//! ## Features
//!
//! - Single-request page fetching with per-request, recoverable errors
//! - Article extraction over a pluggable document abstraction
//! - Whitespace normalization and a fixed cap on stored body length
//! - A minimal collection/record store with generated ids
//! - An axum HTTP surface with JSON endpoints, pages and static files
//!
//! ## Example
//!
//! ```rust,no_run
//! use pagekeep::extractor::{Article, ExtractorConfig, FetchConfig, Fetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = Fetcher::new(&FetchConfig::default())?;
//!     let article = Article::fetch_and_extract(
//!         &fetcher,
//!         "https://example.com/post",
//!         &ExtractorConfig::default(),
//!     )
//!     .await?;
//!
//!     println!("{}\n\n{}", article.title, article.content);
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod extractor;
pub mod server;
pub mod store;

pub use error::{Error, Result};

