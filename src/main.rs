//! Price-Ladder main entry point
//!
//! This is the command-line interface for the Price-Ladder catalog harvester.

use anyhow::Context;
use clap::Parser;
use price_ladder::config::{load_config_with_hash, override_output_directory, Config};
use price_ladder::output::{compute_statistics, print_statistics, JsonOutputHandler, OutputHandler};
use price_ladder::{DetailEnricher, HttpFetchClient, PaginationCrawler, RateLimiter};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Price-Ladder: harvests a merchant's full catalog from a page-capped search API
///
/// The catalog is walked in ascending price windows so that no window runs
/// into the API's page ceiling. Every product is then enriched from its
/// product page and its description content.
#[derive(Parser, Debug)]
#[command(name = "price-ladder")]
#[command(version = "1.0.0")]
#[command(about = "Catalog harvester for page-capped search APIs", long_about = None)]
struct Cli {
    /// Merchant whose catalog is harvested
    #[arg(value_name = "MERCHANT_ID")]
    merchant_id: u64,

    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the JSON exports (overrides the configuration)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Only crawl the catalog, do not fetch product pages and descriptions
    #[arg(long)]
    skip_details: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(output) = cli.output {
        override_output_directory(&mut config, &output.to_string_lossy())
            .context("Invalid --output directory")?;
    }

    let cancel = CancellationToken::new();
    watch_ctrl_c(cancel.clone());

    harvest(&config, cli.merchant_id, cli.skip_details, cancel).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("price_ladder=info,warn"),
            1 => EnvFilter::new("price_ladder=debug,info"),
            2 => EnvFilter::new("price_ladder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Cancels `cancel` on the first Ctrl-C
fn watch_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Interrupt received, finishing with the products collected so far");
                cancel.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
        }
    });
}

/// Runs the crawl, the enrichment and the exports
async fn harvest(
    config: &Config,
    merchant_id: u64,
    skip_details: bool,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let fetcher = HttpFetchClient::new(&config.http).context("Failed to build HTTP client")?;
    let mut output = JsonOutputHandler::new(&config.output.directory);

    let page_limiter = RateLimiter::for_pages(&config.pacing);
    let crawler = PaginationCrawler::new(&fetcher, &page_limiter, &config.endpoints)
        .with_cancellation(cancel.clone());

    let mut crawl = crawler.crawl(merchant_id).await.map_err(|e| {
        tracing::error!("Crawl failed: {}", e);
        e
    })?;

    let path = output
        .write_products(&crawl.products)
        .context("Failed to write product list")?;
    tracing::info!("Saved {} products to {}", crawl.len(), path.display());

    let report = if skip_details {
        tracing::info!("Skipping product details");
        None
    } else if crawl.is_cancelled() {
        tracing::warn!("Crawl was cancelled, skipping product details");
        None
    } else {
        let detail_limiter = RateLimiter::for_details(&config.pacing);
        let enricher = DetailEnricher::new(&fetcher, &detail_limiter, &config.endpoints)
            .with_cancellation(cancel);
        let report = enricher.enrich(&mut crawl.products).await;

        let path = output
            .write_details(&crawl.products)
            .context("Failed to write product details")?;
        tracing::info!("Saved product details to {}", path.display());

        if let Some(path) = output
            .write_failures(&report.failures)
            .context("Failed to write failed products")?
        {
            tracing::warn!(
                "{} products could not be enriched, see {}",
                report.failures.len(),
                path.display()
            );
        }
        Some(report)
    };

    println!();
    print_statistics(&compute_statistics(&crawl, report.as_ref()));

    Ok(())
}
