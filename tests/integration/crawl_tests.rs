//! Integration tests for the pagination crawler
//!
//! These tests use wiremock to simulate the search API and run the real HTTP
//! client through complete crawls.

use crate::support::{test_config, CatalogResponder, MERCHANT_ID};
use price_ladder::config::load_config;
use price_ladder::{CrawlPhase, HarvestError, HttpFetchClient, PaginationCrawler, RateLimiter};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_catalog(server: &MockServer, responder: CatalogResponder) {
    Mock::given(method("GET"))
        .and(path("/sr"))
        .and(query_param("mid", MERCHANT_ID.to_string()))
        .and(query_param("sst", "PRICE_BY_ASC"))
        .respond_with(responder)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_across_page_ceiling() {
    let server = MockServer::start().await;
    // 100 products fit in the first window, 30 more need a second one
    let products = (1..=130).map(|id| (id, id as f64 * 1.5)).collect();
    mount_catalog(&server, CatalogResponder::new(products, 20, 5)).await;

    let config = test_config(&server.uri(), "unused");
    let fetcher = HttpFetchClient::new(&config.http).unwrap();
    let limiter = RateLimiter::for_pages(&config.pacing);
    let crawler = PaginationCrawler::new(&fetcher, &limiter, &config.endpoints);

    let result = crawler.crawl(MERCHANT_ID).await.unwrap();

    assert_eq!(result.len(), 130);
    assert_eq!(result.phase, CrawlPhase::Done);
    assert_eq!(result.windows, 2);

    let ids: HashSet<u64> = result.products.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 130, "crawl result contains duplicate ids");

    // Prices never decrease in crawl order
    assert!(result
        .products
        .windows(2)
        .all(|pair| pair[0].price.original_price <= pair[1].price.original_price));

    let first = &result.products[0];
    assert_eq!(first.url, format!("{}/brand/lamp-p-1", server.uri()));
    assert_eq!(first.image_urls, vec![format!("{}/cdn/img/1.jpg", server.uri())]);
    assert_eq!(first.brand.name, "Lumen");

    // Second window was requested with the recomputed floor
    let requests = server.received_requests().await.unwrap();
    let floors: HashSet<String> = requests
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "prc")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    assert_eq!(floors, HashSet::from(["148.51-*".to_string()]));
}

#[tokio::test]
async fn test_crawl_single_window() {
    let server = MockServer::start().await;
    let products = (1..=15).map(|id| (id, 10.0)).collect();
    mount_catalog(&server, CatalogResponder::new(products, 10, 5)).await;

    let config = test_config(&server.uri(), "unused");
    let fetcher = HttpFetchClient::new(&config.http).unwrap();
    let limiter = RateLimiter::disabled();
    let crawler = PaginationCrawler::new(&fetcher, &limiter, &config.endpoints);

    let result = crawler.crawl(MERCHANT_ID).await.unwrap();

    assert_eq!(result.len(), 15);
    assert_eq!(result.windows, 1);
    assert_eq!(result.pages, 2);
    // Two full pages and the empty one
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_empty_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sr"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":{}}"#))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), "unused");
    let fetcher = HttpFetchClient::new(&config.http).unwrap();
    let limiter = RateLimiter::disabled();
    let crawler = PaginationCrawler::new(&fetcher, &limiter, &config.endpoints);

    let result = crawler.crawl(MERCHANT_ID).await.unwrap();
    assert!(result.is_empty());
    assert_eq!(result.phase, CrawlPhase::Done);
}

#[tokio::test]
async fn test_server_error_aborts_crawl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sr"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), "unused");
    let fetcher = HttpFetchClient::new(&config.http).unwrap();
    let limiter = RateLimiter::disabled();
    let crawler = PaginationCrawler::new(&fetcher, &limiter, &config.endpoints);

    let err = crawler.crawl(MERCHANT_ID).await.unwrap_err();
    assert!(matches!(err, HarvestError::FetchFailure { status: 503, .. }));
}

#[tokio::test]
async fn test_unrelated_not_found_aborts_crawl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sr"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"errors":["merchant not found"]}"#))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), "unused");
    let fetcher = HttpFetchClient::new(&config.http).unwrap();
    let limiter = RateLimiter::disabled();
    let crawler = PaginationCrawler::new(&fetcher, &limiter, &config.endpoints);

    let err = crawler.crawl(MERCHANT_ID).await.unwrap_err();
    assert_eq!(err.kind(), "fetch_failure");
}

#[tokio::test]
async fn test_crawl_with_config_file() {
    let server = MockServer::start().await;
    let products = (1..=5).map(|id| (id, id as f64)).collect();
    mount_catalog(&server, CatalogResponder::new(products, 2, 10)).await;

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[http]
timeout-secs = 5
connect-timeout-secs = 2
user-agents = ["price-ladder-tests/1.0"]

[endpoints]
search-url = "{base}/sr"
site-base-url = "{base}"
image-base-url = "{base}/cdn"
description-url = "{base}/desc/{{id}}/html-content"

[pacing]
page-delay-min-ms = 0
page-delay-max-ms = 1
"#,
            base = server.uri()
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let fetcher = HttpFetchClient::new(&config.http).unwrap();
    let limiter = RateLimiter::for_pages(&config.pacing);
    let crawler = PaginationCrawler::new(&fetcher, &limiter, &config.endpoints);

    let result = crawler.crawl(MERCHANT_ID).await.unwrap();
    let ids: Vec<u64> = result.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}
