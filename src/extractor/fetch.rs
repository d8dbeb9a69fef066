//! Page fetching for the extractor

use reqwest::{Client as ReqwestClient, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::extractor::config::FetchConfig;
use crate::extractor::error::FetchError;

/// Fetches the HTML body of a single page
#[derive(Debug, Clone)]
pub struct Fetcher {
    /// The underlying reqwest client
    client: ReqwestClient,
    /// Largest body read before giving up
    max_body_bytes: usize,
}

impl Fetcher {
    /// Create a new fetcher with the given configuration
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Fetch `url` with a single GET and return the body as text
    ///
    /// Only a 200 response counts as success. Transport failures, any other
    /// status and bodies over the size cap come back as a [`FetchError`];
    /// nothing is retried. Bytes that are not valid UTF-8 are replaced.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = parse_url(url)?;

        debug!("Sending GET request to {}", parsed);
        let mut response = self.client.get(parsed).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Upstream answered {} for {}", status, url);
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let limit = self.max_body_bytes;
        if response.content_length().is_some_and(|len| len > limit as u64) {
            warn!("Declared body of {} exceeds {} bytes", url, limit);
            return Err(FetchError::BodyTooLarge { limit });
        }

        // The declared length may be absent or wrong, so count what arrives.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                warn!("Body of {} exceeds {} bytes", url, limit);
                return Err(FetchError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn fetcher() -> Fetcher {
        Fetcher::new(&FetchConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>hello</body></html>")
            .expect(1)
            .create_async()
            .await;

        let body = fetcher()
            .fetch(&format!("{}/page", server.url()))
            .await
            .unwrap();
        assert_eq!(body, "<html><body>hello</body></html>");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_an_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let result = fetcher()
            .fetch(&format!("{}/missing", server.url()))
            .await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_other_success_codes_are_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/empty")
            .with_status(204)
            .create_async()
            .await;

        let result = fetcher().fetch(&format!("{}/empty", server.url())).await;
        assert!(matches!(result, Err(FetchError::Status { status: 204, .. })));
    }

    #[tokio::test]
    async fn test_fetch_body_over_cap_is_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/big")
            .with_status(200)
            .with_body("x".repeat(64))
            .create_async()
            .await;

        let small = Fetcher::new(&FetchConfig {
            max_body_bytes: 16,
            ..Default::default()
        })
        .unwrap();
        let result = small.fetch(&format!("{}/big", server.url())).await;
        assert!(matches!(result, Err(FetchError::BodyTooLarge { limit: 16 })));

        let exact = Fetcher::new(&FetchConfig {
            max_body_bytes: 64,
            ..Default::default()
        })
        .unwrap();
        let body = exact.fetch(&format!("{}/big", server.url())).await.unwrap();
        assert_eq!(body.len(), 64);
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        // Port 9 (discard) on localhost is expected to refuse the connection.
        let result = fetcher().fetch("http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let result = fetcher().fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));

        let result = fetcher().fetch("ftp://example.com/file").await;
        assert!(matches!(result, Err(FetchError::UnsupportedScheme(ref s)) if s == "ftp"));
    }
}
