//! Detail enrichment of crawled products
//!
//! Every product is enriched independently: its page is fetched and the
//! embedded product object parsed into attributes and a description, then its
//! description fragment is fetched from the content endpoint. A failure only
//! skips the product it happened on.

use crate::catalog::{ProductDetails, ProductRecord};
use crate::config::EndpointConfig;
use crate::crawler::{Fetcher, RateLimiter};
use crate::enrich::description_api::fetch_description;
use crate::extract::{
    extract_product_json, process_attributes, process_descriptions, EmbeddedProduct,
};
use crate::HarvestError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// A product that could not be enriched
#[derive(Debug, Clone, Serialize)]
pub struct FailedProduct {
    pub product_id: u64,
    pub product_name: String,
    pub url: String,

    /// Display text of the error
    pub error: String,

    /// Machine-readable error kind (e.g. `missing_anchor`)
    pub error_type: String,
    pub failed_at: DateTime<Utc>,
}

impl FailedProduct {
    fn new(product: &ProductRecord, error: &HarvestError) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            url: product.url.clone(),
            error: error.to_string(),
            error_type: error.kind().to_string(),
            failed_at: Utc::now(),
        }
    }
}

/// Outcome of an enrichment pass
#[derive(Debug, Clone, Default)]
pub struct EnrichmentReport {
    /// Products whose enrichment was started
    pub attempted: usize,

    /// Products that received details and a description
    pub enriched: usize,

    /// Products skipped because of an error, in crawl order
    pub failures: Vec<FailedProduct>,

    /// True if the pass stopped early on cancellation
    pub cancelled: bool,
}

impl EnrichmentReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Attaches page details and description text to crawled products
pub struct DetailEnricher<'a> {
    fetcher: &'a dyn Fetcher,
    limiter: &'a RateLimiter,
    endpoints: &'a EndpointConfig,
    cancel: CancellationToken,
}

impl<'a> DetailEnricher<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        limiter: &'a RateLimiter,
        endpoints: &'a EndpointConfig,
    ) -> Self {
        Self {
            fetcher,
            limiter,
            endpoints,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Enriches products in order, recording failures instead of stopping
    ///
    /// A product is only modified when both its details and its description
    /// were obtained. Cancellation leaves the remaining products untouched.
    pub async fn enrich(&self, products: &mut [ProductRecord]) -> EnrichmentReport {
        let total = products.len();
        let mut report = EnrichmentReport::default();

        tracing::info!("Enriching {} products", total);

        for (index, product) in products.iter_mut().enumerate() {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            report.attempted += 1;
            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    report.attempted -= 1;
                    report.cancelled = true;
                    break;
                }
                outcome = self.enrich_one(product) => outcome,
            };

            match outcome {
                Ok((details, description)) => {
                    product.details = Some(details);
                    product.description = Some(description);
                    report.enriched += 1;
                    tracing::debug!("[{}/{}] Enriched product {}", index + 1, total, product.id);
                }
                Err(e) => {
                    tracing::warn!(
                        "[{}/{}] Skipping product {} ({}): {}",
                        index + 1,
                        total,
                        product.id,
                        product.name,
                        e
                    );
                    report.failures.push(FailedProduct::new(product, &e));
                }
            }

            if (index + 1) % 50 == 0 {
                tracing::info!("[{}/{}] products processed", index + 1, total);
            }

            if !self.limiter.wait(&self.cancel).await {
                report.cancelled = true;
                break;
            }
        }

        if report.cancelled {
            tracing::warn!(
                "Enrichment cancelled after {} of {} products",
                report.attempted,
                total
            );
        }

        tracing::info!(
            "Enrichment finished: {} enriched, {} failed",
            report.enriched,
            report.failures.len()
        );

        report
    }

    async fn enrich_one(
        &self,
        product: &ProductRecord,
    ) -> Result<(ProductDetails, String), HarvestError> {
        let details = self.fetch_details(product).await?;
        let description = fetch_description(self.fetcher, self.endpoints, product.id).await?;
        Ok((details, description))
    }

    /// Fetches a product page and processes its embedded product object
    async fn fetch_details(&self, product: &ProductRecord) -> Result<ProductDetails, HarvestError> {
        let response = self.fetcher.get(&product.url).await?;
        if !response.is_success() {
            return Err(HarvestError::FetchFailure {
                url: product.url.clone(),
                status: response.status,
            });
        }

        let json = extract_product_json(&response.body, &product.url)?;
        let embedded = EmbeddedProduct::parse(json)?;

        Ok(ProductDetails {
            attributes: process_attributes(embedded.attributes.as_deref().unwrap_or_default()),
            description: process_descriptions(embedded.descriptions.as_deref().unwrap_or_default()),
        })
    }
}
