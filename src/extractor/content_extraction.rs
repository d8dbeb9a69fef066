//! Article extraction from a parsed document

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::extractor::Article;
use crate::extractor::config::ExtractorConfig;
use crate::extractor::document::{Document, HtmlDocument};
use crate::extractor::error::ExtractError;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Extract an article from raw HTML
pub fn extract_article_from_html(
    html: &str,
    config: &ExtractorConfig,
) -> Result<Article, ExtractError> {
    extract_article(HtmlDocument::parse(html), config)
}

/// Extract an article from a parsed document
///
/// Strips the configured non-content elements, then reads the title from the
/// first title match inside the first body match and the content from the
/// body match itself. A missing title or body yields an empty string rather
/// than an error.
///
/// # Errors
///
/// Only an invalid configured selector fails the extraction.
#[instrument(skip_all)]
pub fn extract_article<D: Document>(
    mut document: D,
    config: &ExtractorConfig,
) -> Result<Article, ExtractError> {
    for selector in &config.strip_selectors {
        let nodes = document.select(selector)?;
        debug!("Stripping {} '{}' elements", nodes.len(), selector);
        for node in nodes {
            document.remove(node);
        }
    }

    let Some(body) = document.select_first(&config.content_selector)? else {
        debug!("No '{}' element found", config.content_selector);
        return Ok(Article::default());
    };

    let title = document
        .select_first_in(body, &config.title_selector)?
        .map(|heading| document.text(heading))
        .unwrap_or_default();

    let content = truncate_chars(
        normalize_whitespace(&document.text(body)),
        config.max_content_chars,
    );

    Ok(Article { title, content })
}

/// Collapse every whitespace run into a single space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Keep at most `max_chars` characters of `text`
///
/// Cuts at the character boundary without looking for word breaks.
pub fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_index, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_index);
    }
    text
}
