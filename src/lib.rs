//! Price-Ladder: a catalog harvester for page-capped search APIs
//!
//! This crate walks a merchant's whole catalog through a search API that refuses
//! to serve more than a fixed number of pages per filter. It climbs the catalog in
//! ascending price windows, then enriches every product with the JSON object
//! embedded in its HTML page and with the text of its description fragment.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod enrich;
pub mod extract;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Price-Ladder operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request to {url} failed with HTTP {status}")]
    FetchFailure { url: String, status: u16 },

    #[error("Page {page} is beyond the page ceiling of the active filter")]
    PageCeiling { page: u32 },

    #[error("Malformed API response from {url}: {message}")]
    MalformedApiResponse { url: String, message: String },

    #[error("Malformed product payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Description API error: {0}")]
    DescriptionApi(String),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Short machine-readable name of the error kind, used in failure reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Http { .. } => "http",
            Self::FetchFailure { .. } => "fetch_failure",
            Self::PageCeiling { .. } => "page_ceiling",
            Self::MalformedApiResponse { .. } => "malformed_api_response",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::DescriptionApi(_) => "description_api",
            Self::Extract(ExtractError::MissingAnchor(_)) => "missing_anchor",
            Self::Extract(ExtractError::UnbalancedJson) => "unbalanced_json",
            Self::UrlParse(_) => "url_parse",
            Self::Io(_) => "io",
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while isolating the embedded product JSON from a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Missing anchor: {0}")]
    MissingAnchor(String),

    #[error("Embedded JSON object is never closed")]
    UnbalancedJson,
}

/// Result type alias for Price-Ladder operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use catalog::{ProductAttribute, ProductDetails, ProductRecord};
pub use config::Config;
pub use crawler::{CrawlResult, Fetcher, HttpFetchClient, PaginationCrawler, RateLimiter};
pub use enrich::{DetailEnricher, EnrichmentReport, FailedProduct};
pub use state::{CrawlPhase, PriceWindow};
