//! Product records as handed to the export layer

use serde::{Deserialize, Serialize};

/// Brand / manufacturer of a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: u64,
    pub name: String,
}

/// Price block of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDetails {
    /// Price after discounts
    pub discounted_price: f64,

    /// List price; windows are ordered and bounded on this value
    pub original_price: f64,

    /// ISO currency code (e.g. "TRY")
    pub currency_code: String,
}

/// One key/value attribute taken from the product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub key: String,
    pub value: String,
}

/// Details extracted from the product page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub attributes: Vec<ProductAttribute>,

    /// Bullet list built from the page's description entries
    pub description: String,
}

/// A catalog product
///
/// Created by the pagination crawler; `details` and `description` are only
/// filled in by the detail enricher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    pub brand: Brand,
    pub category_hierarchy: String,
    pub category_name: String,
    pub category_id: u64,

    /// Absolute product page URL
    pub url: String,
    pub name: String,

    /// Absolute image URLs
    pub image_urls: Vec<String>,
    pub price: PriceDetails,
    pub tax: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ProductDetails>,

    /// Plain text of the description content fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductRecord {
    /// Returns true once the enricher attached page details
    pub fn is_enriched(&self) -> bool {
        self.details.is_some()
    }
}
