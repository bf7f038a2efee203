//! Integration tests against a mocked search API and product site

mod crawl_tests;
mod enrich_tests;
mod support;
