//! Integration tests for detail enrichment and the JSON exports

use crate::support::{
    description_envelope, product_page, product_path, test_config, CatalogResponder,
    MERCHANT_ID,
};
use price_ladder::output::{JsonOutputHandler, OutputHandler, FAILURES_FILE};
use price_ladder::{
    DetailEnricher, HttpFetchClient, PaginationCrawler, ProductRecord, RateLimiter,
};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_product(server: &MockServer, id: u64) {
    Mock::given(method("GET"))
        .and(path(product_path(id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(id)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/desc/{}/html-content", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(description_envelope(id)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_enrich_and_export() {
    let server = MockServer::start().await;
    let products = vec![(1, 10.0), (2, 20.0), (3, 30.0)];
    Mock::given(method("GET"))
        .and(path("/sr"))
        .respond_with(CatalogResponder::new(products, 2, 10))
        .mount(&server)
        .await;
    mount_product(&server, 1).await;
    mount_product(&server, 3).await;
    // Product 2's page is served without the embedded object
    Mock::given(method("GET"))
        .and(path(product_path(2)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Sold out</body></html>"))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");
    let config = test_config(&server.uri(), &output_dir.to_string_lossy());

    let fetcher = HttpFetchClient::new(&config.http).unwrap();
    let page_limiter = RateLimiter::for_pages(&config.pacing);
    let detail_limiter = RateLimiter::for_details(&config.pacing);
    let mut output = JsonOutputHandler::new(&config.output.directory);

    let crawler = PaginationCrawler::new(&fetcher, &page_limiter, &config.endpoints);
    let mut crawl = crawler.crawl(MERCHANT_ID).await.unwrap();
    assert_eq!(crawl.len(), 3);
    output.write_products(&crawl.products).unwrap();

    let enricher = DetailEnricher::new(&fetcher, &detail_limiter, &config.endpoints);
    let report = enricher.enrich(&mut crawl.products).await;

    assert_eq!(report.attempted, 3);
    assert_eq!(report.enriched, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].product_id, 2);
    assert_eq!(report.failures[0].error_type, "missing_anchor");

    let first = &crawl.products[0];
    let details = first.details.as_ref().unwrap();
    assert_eq!(details.attributes.len(), 1);
    assert_eq!(details.attributes[0].key, "Color");
    assert_eq!(details.attributes[0].value, "Amber");
    assert_eq!(details.description, "- Warm light\n- E27 socket");
    assert_eq!(
        first.description.as_deref(),
        Some("Lamp 1\nHand-made shade.\nDimmable")
    );
    assert!(!crawl.products[1].is_enriched());

    output.write_details(&crawl.products).unwrap();
    output.write_failures(&report.failures).unwrap();

    // Crawl export has no enrichment fields
    let crawled: Vec<ProductRecord> =
        serde_json::from_str(&fs::read_to_string(output_dir.join("products.json")).unwrap())
            .unwrap();
    assert_eq!(crawled.len(), 3);
    assert!(crawled.iter().all(|p| p.details.is_none()));

    let detailed: Vec<ProductRecord> = serde_json::from_str(
        &fs::read_to_string(output_dir.join("product_details.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(detailed, crawl.products);

    let failures: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output_dir.join(FAILURES_FILE)).unwrap())
            .unwrap();
    assert_eq!(failures.as_array().unwrap().len(), 1);
    assert_eq!(failures[0]["product_id"], 2);
}

#[tokio::test]
async fn test_description_endpoint_outage_keeps_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sr"))
        .respond_with(CatalogResponder::new(vec![(5, 12.0)], 10, 10))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(product_path(5)))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(5)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/desc/5/html-content"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), "unused");
    let fetcher = HttpFetchClient::new(&config.http).unwrap();
    let limiter = RateLimiter::disabled();

    let crawler = PaginationCrawler::new(&fetcher, &limiter, &config.endpoints);
    let mut crawl = crawler.crawl(MERCHANT_ID).await.unwrap();

    let enricher = DetailEnricher::new(&fetcher, &limiter, &config.endpoints);
    let report = enricher.enrich(&mut crawl.products).await;

    assert_eq!(report.enriched, 1);
    assert!(!report.has_failures());
    assert!(crawl.products[0].is_enriched());
    assert_eq!(crawl.products[0].description.as_deref(), Some(""));
}

#[tokio::test]
async fn test_failing_envelope_is_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(product_path(9)))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(9)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/desc/9/html-content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isSuccess": false,
            "statusCode": 404,
            "error": "Content not found"
        })))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), "unused");
    let fetcher = HttpFetchClient::new(&config.http).unwrap();
    let limiter = RateLimiter::disabled();

    let mut products: Vec<ProductRecord> = serde_json::from_value(serde_json::json!([{
        "id": 9,
        "brand": { "id": 7, "name": "Lumen" },
        "category_hierarchy": "Home/Lighting",
        "category_name": "Lighting",
        "category_id": 1001,
        "url": format!("{}{}", server.uri(), product_path(9)),
        "name": "Lamp 9",
        "image_urls": [],
        "price": { "discounted_price": 1.0, "original_price": 1.0, "currency_code": "TRY" },
        "tax": 20.0
    }]))
    .unwrap();

    let enricher = DetailEnricher::new(&fetcher, &limiter, &config.endpoints);
    let report = enricher.enrich(&mut products).await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].error_type, "description_api");
    assert!(report.failures[0].error.contains("Content not found"));
    assert!(!products[0].is_enriched());
}
