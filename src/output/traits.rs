//! Output handler traits and types
//!
//! This module defines the trait interface for exporting harvest results and
//! the errors an export can raise.

use crate::catalog::ProductRecord;
use crate::enrich::FailedProduct;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for exporting harvest results
///
/// Each method returns the location it wrote to.
pub trait OutputHandler {
    /// Exports the crawled product list
    fn write_products(&mut self, products: &[ProductRecord]) -> OutputResult<PathBuf>;

    /// Exports the product list after enrichment
    fn write_details(&mut self, products: &[ProductRecord]) -> OutputResult<PathBuf>;

    /// Exports enrichment failures
    ///
    /// Nothing is written, and `None` returned, when there are no failures.
    fn write_failures(&mut self, failures: &[FailedProduct]) -> OutputResult<Option<PathBuf>>;
}
