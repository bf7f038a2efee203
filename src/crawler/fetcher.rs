//! HTTP fetcher implementation
//!
//! This module handles all outbound HTTP requests, including:
//! - Building the shared HTTP client once per process
//! - Rotating the User-Agent header per request
//! - Classifying the page-ceiling failure of the search API
//!
//! The crawler and the enricher only see the [`Fetcher`] trait, so tests can
//! substitute scripted responses without a network.

use crate::config::HttpConfig;
use crate::HarvestError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;

/// HTTP status the search API answers with when a page index is too high
pub const PAGE_CEILING_STATUS: u16 = 404;

/// Phrase the search API puts in the body of a page-ceiling failure
///
/// The same status is used for unrelated errors, so both must match.
pub const PAGE_CEILING_PHRASE: &str = "Page index cannot be higher than";

/// Status and body of a completed GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// Final URL after redirects
    pub url: String,

    /// HTTP status code
    pub status: u16,

    /// Response body
    pub body: String,
}

impl FetchResponse {
    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract GET contract the crawl and enrichment depend on
///
/// Implementations return `Ok` for every response that carries a status,
/// including 4xx and 5xx; `Err` is reserved for transport failures.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse, HarvestError>;
}

/// Returns true if a response is the search API's page-ceiling failure
pub fn is_page_ceiling(response: &FetchResponse) -> bool {
    response.status == PAGE_CEILING_STATUS && response.body.contains(PAGE_CEILING_PHRASE)
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - HTTP section of the configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/html;q=0.9, */*;q=0.8"),
    );

    Client::builder()
        .default_headers(headers)
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`Fetcher`] with a rotated User-Agent
///
/// Build it once at startup and lend it to the crawler and the enricher; the
/// inner client pools connections across every request of the run.
pub struct HttpFetchClient {
    client: Client,
    user_agents: Vec<String>,
}

impl HttpFetchClient {
    /// Creates the client from the HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            user_agents: config.user_agents.clone(),
        })
    }

    /// Picks a User-Agent for the next request
    fn pick_user_agent(&self) -> Option<&str> {
        if self.user_agents.is_empty() {
            return None;
        }
        let index = fastrand::usize(..self.user_agents.len());
        self.user_agents.get(index).map(String::as_str)
    }
}

#[async_trait]
impl Fetcher for HttpFetchClient {
    async fn get(&self, url: &str) -> Result<FetchResponse, HarvestError> {
        let mut request = self.client.get(url);
        if let Some(user_agent) = self.pick_user_agent() {
            request = request.header(USER_AGENT, user_agent);
        }

        tracing::debug!("GET {}", url);

        let response = request.send().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

        tracing::trace!("{} answered HTTP {} ({} bytes)", final_url, status, body.len());

        Ok(FetchResponse {
            url: final_url,
            status,
            body,
        })
    }
}
