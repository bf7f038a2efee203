//! Embedded product JSON extraction
//!
//! Product pages inline their state as a script payload in which the product
//! object appears as `"product":{"id":<id>,...}`. Instead of parsing the HTML,
//! the extractor finds that anchor and walks forward with a small string-aware
//! brace counter until the object closes.

use crate::extract::anchor::{product_anchor, product_id_from_url};
use crate::extract::attributes::AttributePair;
use crate::extract::description::DescriptionEntry;
use crate::{ExtractError, ExtractResult};
use serde::Deserialize;

const PRODUCT_KEY: &str = r#""product":"#;

/// The parts of the embedded product object the enricher consumes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddedProduct {
    #[serde(default)]
    pub attributes: Option<Vec<AttributePair>>,

    #[serde(default)]
    pub descriptions: Option<Vec<DescriptionEntry>>,
}

impl EmbeddedProduct {
    /// Parses the object text returned by [`extract_product_json`]
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Isolates the embedded product object of a product page
///
/// # Arguments
///
/// * `html` - Full HTML of the product page
/// * `url` - The page URL; its last `-p-<digits>` token names the product
///
/// # Returns
///
/// * `Ok(&str)` - The product object, braces included
/// * `Err(ExtractError::MissingAnchor)` - No product id in the URL, or the
///   page does not contain the object for that id
/// * `Err(ExtractError::UnbalancedJson)` - The object never closes
pub fn extract_product_json<'a>(html: &'a str, url: &str) -> ExtractResult<&'a str> {
    let product_id = product_id_from_url(url)
        .ok_or_else(|| ExtractError::MissingAnchor(format!("no product id in {}", url)))?;

    let anchor = product_anchor(product_id);
    let anchor_at = html
        .find(&anchor)
        .ok_or_else(|| ExtractError::MissingAnchor(anchor.clone()))?;

    let start = anchor_at + PRODUCT_KEY.len();
    let end = balanced_object_end(&html.as_bytes()[start..]).ok_or(ExtractError::UnbalancedJson)?;

    Ok(&html[start..start + end])
}

/// Returns the length of the JSON object at the start of `bytes`
///
/// Braces inside string literals are ignored, as are escaped quotes. Returns
/// `None` if the input ends before depth returns to zero.
fn balanced_object_end(bytes: &[u8]) -> Option<usize> {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
