//! Per-product enrichment after the crawl

mod description_api;
mod enricher;

pub use description_api::{fetch_description, parse_description_envelope};
pub use enricher::{DetailEnricher, EnrichmentReport, FailedProduct};
