//! Output module for exporting harvest results
//!
//! This module handles:
//! - Writing product lists and enrichment failures as JSON files
//! - Summarizing a run for display

mod json;
pub mod stats;
mod traits;

pub use json::{JsonOutputHandler, DETAILS_FILE, FAILURES_FILE, PRODUCTS_FILE};
pub use stats::{compute_statistics, print_statistics, HarvestStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};
