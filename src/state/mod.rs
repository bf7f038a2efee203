//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the crawl's state machine (fetching, limit hit, done, ...)
//! - `PriceWindow`: the active lower price bound and its upstream filter value
//! - `SeenIdSet`: ids already accepted, used for de-duplication

mod crawl_phase;
mod seen;
mod window;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use seen::SeenIdSet;
pub use window::{next_floor, PriceWindow, WindowEnd, PRICE_STEP};
