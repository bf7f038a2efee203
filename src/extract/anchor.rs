//! Product id lookup from page URLs

use regex::Regex;
use std::sync::OnceLock;

fn product_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-p-(\d+)").expect("product id pattern is valid"))
}

/// Returns the product id encoded in a product page URL
///
/// Product URLs end in a `-p-<digits>` token, but slugs may contain earlier
/// look-alike tokens, so the last match wins.
///
/// # Example
///
/// ```
/// use price_ladder::extract::product_id_from_url;
///
/// let url = "https://shop.example.com/brand/x-p-1-p-123456?merchantId=9";
/// assert_eq!(product_id_from_url(url), Some(123456));
/// assert_eq!(product_id_from_url("https://shop.example.com/brand/x"), None);
/// ```
pub fn product_id_from_url(url: &str) -> Option<u64> {
    product_id_pattern()
        .captures_iter(url)
        .last()
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Text that opens the embedded product object for `product_id`
pub fn product_anchor(product_id: u64) -> String {
    format!(r#""product":{{"id":{},"#, product_id)
}
