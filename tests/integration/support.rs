//! Shared fixtures for the integration tests

use price_ladder::config::{Config, EndpointConfig, HttpConfig, OutputConfig, PacingConfig};
use wiremock::{Request, Respond, ResponseTemplate};

pub const MERCHANT_ID: u64 = 42;

/// Configuration pointing every endpoint at the mock server, without pacing
pub fn test_config(base_url: &str, output_dir: &str) -> Config {
    Config {
        http: HttpConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
            user_agents: vec!["price-ladder-tests/1.0".to_string()],
        },
        endpoints: EndpointConfig {
            search_url: format!("{}/sr", base_url),
            site_base_url: base_url.to_string(),
            image_base_url: format!("{}/cdn", base_url),
            description_url: format!("{}/desc/{{id}}/html-content", base_url),
        },
        pacing: PacingConfig {
            page_delay_min_ms: 0,
            page_delay_max_ms: 0,
            detail_delay_min_ms: 0,
            detail_delay_max_ms: 0,
            seed: Some(1),
        },
        output: OutputConfig {
            directory: output_dir.to_string(),
        },
    }
}

pub fn product_path(id: u64) -> String {
    format!("/brand/lamp-p-{}", id)
}

pub fn product_entry(id: u64, price: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "brand": { "id": 7, "name": "Lumen" },
        "categoryHierarchy": "Home/Lighting",
        "categoryName": "Lighting",
        "categoryId": 1001,
        "url": product_path(id),
        "name": format!("Lamp {}", id),
        "images": [format!("/img/{}.jpg", id)],
        "price": {
            "discountedPrice": price,
            "originalPrice": price,
            "currencyCode": "TRY"
        },
        "tax": 20
    })
}

/// Simulated search API
///
/// Serves `products` sorted by ascending price, honoring the `prc` lower
/// bound, `page_size` per page, and failing past `max_pages` the way the
/// real API does.
pub struct CatalogResponder {
    products: Vec<(u64, f64)>,
    page_size: usize,
    max_pages: u32,
}

impl CatalogResponder {
    pub fn new(mut products: Vec<(u64, f64)>, page_size: usize, max_pages: u32) -> Self {
        products.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
        Self {
            products,
            page_size,
            max_pages,
        }
    }
}

impl Respond for CatalogResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let query = |key: &str| {
            request
                .url
                .query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        };

        let page: u32 = query("pi").and_then(|pi| pi.parse().ok()).unwrap_or(1);
        if page > self.max_pages {
            return ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "errors": [{
                    "message": format!("Page index cannot be higher than {}", self.max_pages)
                }]
            }));
        }

        let lower: f64 = query("prc")
            .and_then(|prc| prc.trim_end_matches("-*").parse().ok())
            .unwrap_or(f64::MIN);

        let products: Vec<serde_json::Value> = self
            .products
            .iter()
            .filter(|(_, price)| *price >= lower)
            .skip((page as usize - 1) * self.page_size)
            .take(self.page_size)
            .map(|(id, price)| product_entry(*id, *price))
            .collect();

        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": { "products": products }
        }))
    }
}

/// Product page HTML with the embedded product object
pub fn product_page(id: u64) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Lamp {id}</title></head><body>
<div id="app"></div>
<script>window.__PRODUCT_DETAIL_APP_INITIAL_STATE__={{"user":{{}},"product":{{"id":{id},"name":"Lamp {{brace}} \"quoted\"","attributes":[{{"key":{{"name":"Color"}},"value":{{"name":" Amber "}}}},{{"key":{{"name":"Wattage"}},"value":{{"name":""}}}}],"descriptions":[{{"text":"Shipped by Lumen"}},{{"text":"15 gün içinde ücretsiz iade. Detaylı bilgi için tıklayın."}},{{"text":"Warm light"}},{{"text":" "}},{{"text":"E27 socket"}}]}},"reviews":{{}}}};</script>
</body></html>"#
    )
}

/// Description endpoint envelope around a rich-content fragment
pub fn description_envelope(id: u64) -> serde_json::Value {
    serde_json::json!({
        "isSuccess": true,
        "statusCode": 200,
        "error": null,
        "result": {
            "content": format!(
                "<div id=\"rich-content-wrapper\"><h2>Lamp {}</h2><div>Hand-made shade.</div><div><img src=\"x.jpg\"></div><ol><li>Dimmable</li></ol></div>",
                id
            )
        }
    })
}
