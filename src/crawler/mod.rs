//! Crawler module for catalog pagination
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - Jittered pacing between requests
//! - The windowed pagination walk over the search API

mod coordinator;
mod fetcher;
mod rate_limiter;

pub use coordinator::{CrawlResult, PaginationCrawler};
pub use fetcher::{
    build_http_client, is_page_ceiling, FetchResponse, Fetcher, HttpFetchClient,
    PAGE_CEILING_PHRASE, PAGE_CEILING_STATUS,
};
pub use rate_limiter::RateLimiter;
