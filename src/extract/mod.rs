//! Extraction of product details from product pages and description fragments
//!
//! # Components
//!
//! - `anchor`: product id lookup from page URLs
//! - `embedded`: isolates the product object inlined in a product page
//! - `description` / `attributes`: normalize the object's loosely typed arrays
//! - `html_text`: renders the description API's HTML fragment as plain text

mod anchor;
mod attributes;
mod description;
mod embedded;
mod html_text;

pub use anchor::{product_anchor, product_id_from_url};
pub use attributes::{process_attributes, AttributePair, NameHolder};
pub use description::{process_descriptions, DescriptionEntry, FREE_RETURN_MARKER};
pub use embedded::{extract_product_json, EmbeddedProduct};
pub use html_text::extract_description_text;
