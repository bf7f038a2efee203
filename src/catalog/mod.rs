//! Catalog data: product records and the search API wire format

pub mod api;
mod product;

pub use api::{parse_search_page, search_page_url, RawProduct};
pub use product::{Brand, PriceDetails, ProductAttribute, ProductDetails, ProductRecord};
