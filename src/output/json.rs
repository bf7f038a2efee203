//! JSON file export
//!
//! Results are written pretty-printed into one output directory:
//! `products.json` after the crawl, `product_details.json` after enrichment
//! and `failed_products.json` when some products could not be enriched.

use crate::catalog::ProductRecord;
use crate::enrich::FailedProduct;
use crate::output::traits::{OutputHandler, OutputResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const PRODUCTS_FILE: &str = "products.json";
pub const DETAILS_FILE: &str = "product_details.json";
pub const FAILURES_FILE: &str = "failed_products.json";

/// Writes harvest results as JSON files into a directory
#[derive(Debug, Clone)]
pub struct JsonOutputHandler {
    directory: PathBuf,
}

impl JsonOutputHandler {
    /// Creates a handler writing into `directory`
    ///
    /// The directory is created on the first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn write<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> OutputResult<PathBuf> {
        fs::create_dir_all(&self.directory)?;

        let path = self.directory.join(file_name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)?;

        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }
}

impl OutputHandler for JsonOutputHandler {
    fn write_products(&mut self, products: &[ProductRecord]) -> OutputResult<PathBuf> {
        self.write(PRODUCTS_FILE, products)
    }

    fn write_details(&mut self, products: &[ProductRecord]) -> OutputResult<PathBuf> {
        self.write(DETAILS_FILE, products)
    }

    fn write_failures(&mut self, failures: &[FailedProduct]) -> OutputResult<Option<PathBuf>> {
        if failures.is_empty() {
            return Ok(None);
        }
        self.write(FAILURES_FILE, failures).map(Some)
    }
}
