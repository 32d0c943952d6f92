// src/utils/json.rs
// =============================================================================
// Fetching JSON documents over HTTP.
//
// The client never talks to reqwest directly. It goes through the
// JsonFetcher trait, so tests can hand it canned payloads and the real
// binary can hand it an HttpFetcher.
//
// Strategy:
// - GET the URL with a User-Agent (GitHub's API refuses requests without one)
// - Treat any non-2xx status as an error
// - Read the body as text and parse it with serde_json, so a bad body is
//   reported as a decode error rather than a network error
//
// Rust concepts:
// - async traits: via the async-trait crate
// - Send + Sync: the fetcher may be shared across tasks
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_USER_AGENT: &str = concat!("org-client/", env!("CARGO_PKG_VERSION"));

// Errors raised by a JsonFetcher
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not valid JSON
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// The capability the client needs: turn a URL into a JSON value.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, TransportError>;
}

#[async_trait]
impl<'a, T: JsonFetcher + ?Sized> JsonFetcher for &'a T {
    async fn fetch_json(&self, url: &str) -> Result<Value, TransportError> {
        (**self).fetch_json(url).await
    }
}

// JsonFetcher backed by a reqwest Client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            user_agent: user_agent.into(),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, TransportError> {
        debug!(url, "fetching JSON");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "non-success response");
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        decode_body(url, &body)
    }
}

// Parses a response body, tagging failures with the URL they came from
fn decode_body(url: &str, body: &str) -> Result<Value, TransportError> {
    serde_json::from_str(body).map_err(|source| TransportError::Decode {
        url: url.to_string(),
        source,
    })
}

// GET `url` and decode the body as JSON, using a default HttpFetcher.
pub async fn get_json(url: &str) -> Result<Value, TransportError> {
    HttpFetcher::new().fetch_json(url).await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of calling reqwest directly?
//    - The client code only needs "URL in, JSON out"
//    - Tests implement the trait with a HashMap of fixtures, no network
//
// 2. Why #[async_trait]?
//    - It boxes the returned future so the trait can be used as
//      &dyn JsonFetcher as well as a generic parameter
//
// 3. Why response.text() and then serde_json::from_str?
//    - response.json() would fold bad JSON into a reqwest::Error
//    - Parsing ourselves keeps "server sent HTML" apart from "network failed"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    const TEST_AGENT: &str = "org-client-tests";

    #[test]
    fn test_decode_body() {
        let value = decode_body("https://example.com", r#"{"payload": true}"#).unwrap();
        assert_eq!(value, json!({"payload": true}));
    }

    #[test]
    fn test_decode_body_rejects_garbage() {
        let err = decode_body("https://example.com", "<html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode { .. }));
        assert!(err.to_string().starts_with("invalid JSON from https://example.com"));
    }

    #[test]
    fn test_default_user_agent() {
        let fetcher = HttpFetcher::default();
        assert!(fetcher.user_agent().starts_with("org-client/"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_a_request_error() {
        // Fails while building the request, before any network I/O
        let err = get_json("not a url").await.unwrap_err();
        assert!(matches!(err, TransportError::Request { .. }));
    }

    #[test]
    fn test_status_error_message() {
        let err = TransportError::Status {
            url: "https://api.github.com/orgs/nope".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch https://api.github.com/orgs/nope: HTTP 404"
        );
    }

    #[tokio::test]
    async fn test_fetch_json_ok() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/google")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"login": "google", "repos_url": "https://example.com/repos"}"#)
            .create_async()
            .await;

        let url = format!("{}/orgs/google", server.url());
        let value = get_json(&url).await.unwrap();

        assert_eq!(
            value,
            json!({"login": "google", "repos_url": "https://example.com/repos"})
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_json_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/nope")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let url = format!("{}/orgs/nope", server.url());
        let err = get_json(&url).await.unwrap_err();

        match err {
            TransportError::Status { url: failed, status } => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected a status error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_json_html_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/google")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>rate limited</body></html>")
            .create_async()
            .await;

        let url = format!("{}/orgs/google", server.url());
        let err = get_json(&url).await.unwrap_err();

        assert!(matches!(err, TransportError::Decode { .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_json_sends_headers_once_per_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/google")
            .match_header("user-agent", TEST_AGENT)
            .match_header("accept", "application/vnd.github+json")
            .with_status(200)
            .with_body("{}")
            .expect(2)
            .create_async()
            .await;

        let fetcher = HttpFetcher::with_user_agent(TEST_AGENT);
        let url = format!("{}/orgs/google", server.url());

        assert_eq!(fetcher.fetch_json(&url).await.unwrap(), json!({}));
        assert_eq!(fetcher.fetch_json(&url).await.unwrap(), json!({}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_json_wrong_user_agent_is_not_matched() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/google")
            .match_header("user-agent", TEST_AGENT)
            .with_status(200)
            .with_body("{}")
            .expect(0)
            .create_async()
            .await;

        // Default agent doesn't match, so mockito answers 501 itself
        let url = format!("{}/orgs/google", server.url());
        let err = get_json(&url).await.unwrap_err();

        assert!(matches!(err, TransportError::Status { status: 501, .. }));
        mock.assert_async().await;
    }
}
