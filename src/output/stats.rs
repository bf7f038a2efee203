//! Statistics of a harvest run
//!
//! This module summarizes the crawl and enrichment results for display at the
//! end of a run.

use crate::catalog::ProductRecord;
use crate::crawler::CrawlResult;
use crate::enrich::EnrichmentReport;

/// Harvest statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarvestStatistics {
    /// Unique products collected by the crawl
    pub total_products: usize,

    /// Price windows opened
    pub windows: u32,

    /// Search pages that returned products
    pub pages: u32,

    /// True if the crawl was stopped by cancellation
    pub crawl_cancelled: bool,

    /// Lowest and highest original price, if any product was collected
    pub price_range: Option<(f64, f64)>,

    /// Name and price of the first product in crawl order
    pub first_product: Option<(String, f64)>,

    /// Name and price of the last product in crawl order
    pub last_product: Option<(String, f64)>,

    /// Enrichment counters, absent when enrichment was skipped
    pub enrichment: Option<EnrichmentStatistics>,
}

/// Enrichment part of the statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentStatistics {
    pub attempted: usize,
    pub enriched: usize,
    pub failed: usize,
    pub cancelled: bool,
}

impl From<&EnrichmentReport> for EnrichmentStatistics {
    fn from(report: &EnrichmentReport) -> Self {
        Self {
            attempted: report.attempted,
            enriched: report.enriched,
            failed: report.failures.len(),
            cancelled: report.cancelled,
        }
    }
}

/// Computes statistics from the results of a run
///
/// # Arguments
///
/// * `crawl` - The crawl result (products in crawl order)
/// * `enrichment` - The enrichment report, if enrichment ran
pub fn compute_statistics(
    crawl: &CrawlResult,
    enrichment: Option<&EnrichmentReport>,
) -> HarvestStatistics {
    let products = &crawl.products;

    let price_range = products
        .iter()
        .map(|product| product.price.original_price)
        .fold(None, |range: Option<(f64, f64)>, price| match range {
            None => Some((price, price)),
            Some((low, high)) => Some((low.min(price), high.max(price))),
        });

    let name_and_price =
        |product: &ProductRecord| (product.name.clone(), product.price.original_price);

    HarvestStatistics {
        total_products: products.len(),
        windows: crawl.windows,
        pages: crawl.pages,
        crawl_cancelled: crawl.is_cancelled(),
        price_range,
        first_product: products.first().map(name_and_price),
        last_product: products.last().map(name_and_price),
        enrichment: enrichment.map(EnrichmentStatistics::from),
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Crawl:");
    println!("  Unique products: {}", stats.total_products);
    println!("  Price windows: {}", stats.windows);
    println!("  Pages fetched: {}", stats.pages);
    if stats.crawl_cancelled {
        println!("  Stopped early: cancelled");
    }
    if let Some((low, high)) = stats.price_range {
        println!("  Price range: {:.2} - {:.2}", low, high);
    }
    if let Some((name, price)) = &stats.first_product {
        println!("  First product: {} ({:.2})", name, price);
    }
    if let Some((name, price)) = &stats.last_product {
        println!("  Last product: {} ({:.2})", name, price);
    }
    println!();

    match &stats.enrichment {
        Some(enrichment) => {
            println!("Enrichment:");
            println!("  Attempted: {}", enrichment.attempted);
            println!("  Enriched: {}", enrichment.enriched);
            println!("  Failed: {}", enrichment.failed);
            if enrichment.cancelled {
                println!("  Stopped early: cancelled");
            }

            let success_rate = if enrichment.attempted > 0 {
                (enrichment.enriched as f64 / enrichment.attempted as f64) * 100.0
            } else {
                0.0
            };
            println!(
                "\nSuccess Rate: {:.1}% ({} / {} products enriched)",
                success_rate, enrichment.enriched, enrichment.attempted
            );
        }
        None => println!("Enrichment: skipped"),
    }
}
