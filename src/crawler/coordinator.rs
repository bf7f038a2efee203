//! Pagination crawler - windowed walk of a merchant catalog
//!
//! The search API sorts by ascending price and refuses to serve pages past a
//! fixed index for any one filter. The crawler therefore walks the catalog in
//! price windows:
//! - fetch pages 1, 2, ... of the current window, keeping only unseen ids
//! - an empty page means the catalog is exhausted
//! - a page-ceiling failure closes the window; the next one starts at the
//!   nearest strictly lower price found at the tail of what was collected
//! - any other failure aborts the whole crawl

use crate::catalog::{parse_search_page, search_page_url, ProductRecord, RawProduct};
use crate::config::EndpointConfig;
use crate::crawler::fetcher::{is_page_ceiling, Fetcher};
use crate::crawler::rate_limiter::RateLimiter;
use crate::state::{next_floor, CrawlPhase, PriceWindow, SeenIdSet, WindowEnd};
use crate::HarvestError;
use tokio_util::sync::CancellationToken;

/// Outcome of a complete crawl
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Unique products in fetch order
    pub products: Vec<ProductRecord>,

    /// Number of price windows opened
    pub windows: u32,

    /// Number of pages that returned products
    pub pages: u32,

    /// Windows that had to reopen at the previous floor price because no
    /// strictly lower price was collected
    pub reused_floors: u32,

    /// Terminal phase (`Done` or `Cancelled`)
    pub phase: CrawlPhase,
}

impl CrawlResult {
    pub fn is_cancelled(&self) -> bool {
        self.phase == CrawlPhase::Cancelled
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Summary of one window's page sequence
struct WindowPass {
    end: WindowEnd,
    /// Original price of the last product accepted in this window
    last_accepted_price: Option<f64>,
    accepted: usize,
}

/// Walks a merchant catalog window by window
///
/// The fetcher and limiter are borrowed: one HTTP client serves the whole run.
pub struct PaginationCrawler<'a> {
    fetcher: &'a dyn Fetcher,
    limiter: &'a RateLimiter,
    endpoints: &'a EndpointConfig,
    cancel: CancellationToken,
}

impl<'a> PaginationCrawler<'a> {
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

    /// Uses `cancel` to stop the crawl at the next suspension point
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Crawls every product of a merchant
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - The catalog was walked to the end, or cancellation
    ///   stopped it early (products collected so far are kept)
    /// * `Err(HarvestError)` - A page failed for any reason other than the
    ///   page ceiling
    pub async fn crawl(&self, merchant_id: u64) -> Result<CrawlResult, HarvestError> {
        let mut products: Vec<ProductRecord> = Vec::new();
        let mut seen = SeenIdSet::new();
        let mut window = PriceWindow::open();
        let mut phase = CrawlPhase::FetchingPage;
        let mut windows = 0u32;
        let mut pages = 0u32;
        let mut reused_floors = 0u32;

        tracing::info!("Starting catalog crawl for merchant {}", merchant_id);

        loop {
            windows += 1;
            let pass = match self
                .run_window(merchant_id, &window, &mut seen, &mut products, &mut pages)
                .await
            {
                Ok(pass) => pass,
                Err(e) => {
                    phase = phase.advance(CrawlPhase::Error);
                    tracing::error!("| {} | Crawl aborted ({}): {}", window, phase, e);
                    return Err(e);
                }
            };

            match pass.end {
                WindowEnd::Exhausted => {
                    phase = phase
                        .advance(CrawlPhase::WindowDone)
                        .advance(CrawlPhase::Done);
                    break;
                }
                WindowEnd::Cancelled => {
                    tracing::warn!(
                        "| {} | Crawl cancelled with {} products collected",
                        window,
                        products.len()
                    );
                    phase = phase.advance(CrawlPhase::Cancelled);
                    break;
                }
                WindowEnd::CeilingHit => {
                    let Some(last_price) = pass.last_accepted_price else {
                        // A new window that yields nothing new cannot move the floor
                        tracing::warn!(
                            "| {} | Page ceiling hit without new products, stopping",
                            window
                        );
                        phase = phase
                            .advance(CrawlPhase::WindowDone)
                            .advance(CrawlPhase::Done);
                        break;
                    };

                    phase = phase.advance(CrawlPhase::LimitHit);
                    let floor = next_floor(
                        products.iter().map(|p| p.price.original_price),
                        last_price,
                    );
                    // next_floor falls back to the last price when nothing lower exists
                    if floor == last_price {
                        reused_floors += 1;
                        tracing::warn!(
                            "| {} | No lower price before {:.2}, reusing the same floor",
                            window,
                            last_price
                        );
                    }

                    window = PriceWindow::from_floor(floor);
                    tracing::info!(
                        "Window closed after {} new products, next window {}",
                        pass.accepted,
                        window
                    );
                    phase = phase.advance(CrawlPhase::FetchingPage);
                }
            }
        }

        tracing::info!(
            "Crawl finished ({}): {} unique products over {} windows and {} pages",
            phase,
            products.len(),
            windows,
            pages
        );

        Ok(CrawlResult {
            products,
            windows,
            pages,
            reused_floors,
            phase,
        })
    }

    /// Fetches the pages of one window until it ends
    async fn run_window(
        &self,
        merchant_id: u64,
        window: &PriceWindow,
        seen: &mut SeenIdSet,
        products: &mut Vec<ProductRecord>,
        pages: &mut u32,
    ) -> Result<WindowPass, HarvestError> {
        let mut page: u32 = 1;
        let mut pass = WindowPass {
            end: WindowEnd::Exhausted,
            last_accepted_price: None,
            accepted: 0,
        };

        loop {
            if self.cancel.is_cancelled() {
                pass.end = WindowEnd::Cancelled;
                return Ok(pass);
            }

            let fetched = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    pass.end = WindowEnd::Cancelled;
                    return Ok(pass);
                }
                fetched = self.fetch_page(merchant_id, window, page) => fetched,
            };

            let entries = match fetched {
                Ok(entries) if entries.is_empty() => {
                    tracing::info!("| {} | No more products after page {}", window, page);
                    pass.end = WindowEnd::Exhausted;
                    return Ok(pass);
                }
                Ok(entries) => entries,
                Err(HarvestError::PageCeiling { page }) => {
                    tracing::warn!(
                        "| {} | Page limit reached at page {}, shifting price window",
                        window,
                        page
                    );
                    pass.end = WindowEnd::CeilingHit;
                    return Ok(pass);
                }
                Err(e) => return Err(e),
            };

            let returned = entries.len();
            let mut fresh = 0usize;
            for entry in entries {
                if !seen.insert(entry.id) {
                    continue;
                }
                let record = entry.into_record(self.endpoints);
                pass.last_accepted_price = Some(record.price.original_price);
                products.push(record);
                fresh += 1;
            }
            pass.accepted += fresh;
            *pages += 1;

            tracing::info!(
                "| {} | Fetched page {}: {} new of {} returned, total products: {}",
                window,
                page,
                fresh,
                returned,
                products.len()
            );

            page += 1;

            if !self.limiter.wait(&self.cancel).await {
                pass.end = WindowEnd::Cancelled;
                return Ok(pass);
            }
        }
    }

    /// Requests one page and classifies the response
    ///
    /// The page-ceiling failure comes back as [`HarvestError::PageCeiling`];
    /// every other non-success status is a [`HarvestError::FetchFailure`].
    async fn fetch_page(
        &self,
        merchant_id: u64,
        window: &PriceWindow,
        page: u32,
    ) -> Result<Vec<RawProduct>, HarvestError> {
        let url = search_page_url(&self.endpoints.search_url, merchant_id, window, page)?;
        let response = self.fetcher.get(url.as_str()).await?;

        if response.is_success() {
            return parse_search_page(&response.body, url.as_str());
        }

        if is_page_ceiling(&response) {
            return Err(HarvestError::PageCeiling { page });
        }

        Err(HarvestError::FetchFailure {
            url: url.to_string(),
            status: response.status,
        })
    }
}
