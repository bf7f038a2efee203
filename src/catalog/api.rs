//! Wire shapes of the catalog search endpoint
//!
//! The search API answers `{"result":{"products":[...]}}` with camelCase
//! product entries carrying relative URLs. This module builds page requests and
//! turns responses into [`ProductRecord`]s.

use crate::catalog::product::{Brand, PriceDetails, ProductRecord};
use crate::config::EndpointConfig;
use crate::state::PriceWindow;
use crate::HarvestError;
use serde::Deserialize;
use url::Url;

/// Query parameters sent with every search request
///
/// `sst=PRICE_BY_ASC` is what makes price windows work: results come back
/// cheapest first, so the tail of a window is its most expensive product.
const FIXED_SEARCH_PARAMS: &[(&str, &str)] = &[
    ("os", "1"),
    ("culture", "tr-TR"),
    ("userGenderId", "1"),
    ("pId", "0"),
    ("isLegalRequirementConfirmed", "false"),
    ("searchStrategyType", "DEFAULT"),
    ("productStampType", "TypeA"),
    ("scoringAlgorithmId", "2"),
    ("fixSlotProductAdsIncluded", "true"),
    ("channelId", "1"),
    ("sst", "PRICE_BY_ASC"),
];

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Option<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResult {
    #[serde(default)]
    products: Option<Vec<RawProduct>>,
}

/// Raw product entry as returned by the search API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: u64,
    #[serde(default)]
    pub brand: Brand,
    #[serde(default)]
    pub category_hierarchy: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub category_id: u64,
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub price: RawPrice,
    #[serde(default)]
    pub tax: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrice {
    pub discounted_price: f64,
    pub original_price: f64,
    #[serde(default)]
    pub currency_code: String,
}

impl RawProduct {
    /// Converts the wire entry into a record with absolute URLs
    pub fn into_record(self, endpoints: &EndpointConfig) -> ProductRecord {
        ProductRecord {
            id: self.id,
            brand: self.brand,
            category_hierarchy: self.category_hierarchy,
            category_name: self.category_name,
            category_id: self.category_id,
            url: absolutize(&endpoints.site_base_url, &self.url),
            name: self.name,
            image_urls: self
                .images
                .iter()
                .map(|image| absolutize(&endpoints.image_base_url, image))
                .collect(),
            price: PriceDetails {
                discounted_price: self.price.discounted_price,
                original_price: self.price.original_price,
                currency_code: self.price.currency_code,
            },
            tax: self.tax,
            details: None,
            description: None,
        }
    }
}

/// Prefixes a relative path with a base URL, leaving absolute URLs untouched
fn absolutize(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base.trim_end_matches('/'), path),
        (false, false) => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}

/// Builds the URL of one search page
///
/// # Arguments
///
/// * `search_url` - Base search endpoint
/// * `merchant_id` - Merchant whose catalog is walked
/// * `window` - Active price window (adds the `prc` filter when bounded)
/// * `page` - 1-based page index
pub fn search_page_url(
    search_url: &str,
    merchant_id: u64,
    window: &PriceWindow,
    page: u32,
) -> Result<Url, HarvestError> {
    let mut url = Url::parse(search_url)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("mid", &merchant_id.to_string());
        for (key, value) in FIXED_SEARCH_PARAMS {
            query.append_pair(key, value);
        }
        if let Some(filter) = window.price_filter() {
            query.append_pair("prc", &filter);
        }
        query.append_pair("pi", &page.to_string());
    }
    Ok(url)
}

/// Parses one search page body into raw product entries
///
/// A body without `result` or `products` is an empty page, which is how the
/// API signals that the window is exhausted.
pub fn parse_search_page(body: &str, url: &str) -> Result<Vec<RawProduct>, HarvestError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| HarvestError::MalformedApiResponse {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    Ok(response
        .result
        .and_then(|result| result.products)
        .unwrap_or_default())
}
