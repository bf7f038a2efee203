use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Price-Ladder
///
/// Every section and key has a default, so an empty file (or no file at all)
/// yields a configuration that targets the production endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub endpoints: EndpointConfig,
    pub pacing: PacingConfig,
    pub output: OutputConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total timeout for a single request (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Pool of User-Agent strings, one is picked at random per request
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
        }
    }
}

const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.67",
];

/// Upstream endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Paginated catalog search endpoint
    #[serde(rename = "search-url")]
    pub search_url: String,

    /// Base URL that relative product paths are appended to
    #[serde(rename = "site-base-url")]
    pub site_base_url: String,

    /// Base URL that relative image paths are appended to
    #[serde(rename = "image-base-url")]
    pub image_base_url: String,

    /// Description content endpoint, `{id}` is replaced by the product id
    #[serde(rename = "description-url")]
    pub description_url: String,
}

impl EndpointConfig {
    /// Builds the description endpoint URL for a product
    pub fn description_url_for(&self, product_id: u64) -> String {
        self.description_url
            .replace(DESCRIPTION_ID_PLACEHOLDER, &product_id.to_string())
    }
}

pub(crate) const DESCRIPTION_ID_PLACEHOLDER: &str = "{id}";

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            search_url: "https://apigw.trendyol.com/discovery-web-searchgw-service/v2/api/infinite-scroll/sr".to_string(),
            site_base_url: "https://www.trendyol.com".to_string(),
            image_base_url: "https://cdn.dsmcdn.com".to_string(),
            description_url: "https://apigw.trendyol.com/discovery-web-productgw-service/api/product-detail/{id}/html-content".to_string(),
        }
    }
}

/// Request pacing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Minimum delay between two page fetches (milliseconds)
    #[serde(rename = "page-delay-min-ms")]
    pub page_delay_min_ms: u64,

    /// Maximum delay between two page fetches (milliseconds)
    #[serde(rename = "page-delay-max-ms")]
    pub page_delay_max_ms: u64,

    /// Minimum delay between two enriched products (milliseconds)
    #[serde(rename = "detail-delay-min-ms")]
    pub detail_delay_min_ms: u64,

    /// Maximum delay between two enriched products (milliseconds)
    #[serde(rename = "detail-delay-max-ms")]
    pub detail_delay_max_ms: u64,

    /// Fixed seed for the jitter generator (reproducible runs)
    pub seed: Option<u64>,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_delay_min_ms: 200,
            page_delay_max_ms: 700,
            detail_delay_min_ms: 0,
            detail_delay_max_ms: 300,
            seed: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the JSON exports are written to
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "outputs".to_string(),
        }
    }
}
