//! Description content endpoint
//!
//! The endpoint wraps an HTML fragment in a status envelope:
//! `{"isSuccess":true,"statusCode":200,"error":null,"result":{"content":"<div>..."}}`.

use crate::config::EndpointConfig;
use crate::crawler::Fetcher;
use crate::extract::extract_description_text;
use crate::HarvestError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptionEnvelope {
    #[serde(default)]
    is_success: bool,
    #[serde(default)]
    status_code: u16,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    result: Option<DescriptionContent>,
}

#[derive(Debug, Deserialize)]
struct DescriptionContent {
    #[serde(default)]
    content: Option<String>,
}

/// Parses an envelope body into the plain description text
///
/// # Returns
///
/// * `Ok(String)` - The extracted text, empty if the envelope has no content
/// * `Err(HarvestError::DescriptionApi)` - The envelope reports a failure
/// * `Err(HarvestError::MalformedApiResponse)` - The body is not an envelope
pub fn parse_description_envelope(body: &str, url: &str) -> Result<String, HarvestError> {
    let envelope: DescriptionEnvelope =
        serde_json::from_str(body).map_err(|e| HarvestError::MalformedApiResponse {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !envelope.is_success || envelope.status_code != 200 {
        let reason = match envelope.error {
            Some(serde_json::Value::String(message)) => message,
            Some(serde_json::Value::Null) | None => {
                format!("status code {}", envelope.status_code)
            }
            Some(other) => other.to_string(),
        };
        return Err(HarvestError::DescriptionApi(reason));
    }

    let content = envelope
        .result
        .and_then(|result| result.content)
        .unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(String::new());
    }

    Ok(extract_description_text(&content))
}

/// Fetches the description text of one product
///
/// Transport failures and non-success HTTP statuses yield an empty
/// description; only a failing envelope or an unreadable body is an error.
pub async fn fetch_description(
    fetcher: &dyn Fetcher,
    endpoints: &EndpointConfig,
    product_id: u64,
) -> Result<String, HarvestError> {
    let url = endpoints.description_url_for(product_id);

    let response = match fetcher.get(&url).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Description request for {} failed: {}", product_id, e);
            return Ok(String::new());
        }
    };

    if !response.is_success() {
        tracing::debug!(
            "Description endpoint answered HTTP {} for {}",
            response.status,
            product_id
        );
        return Ok(String::new());
    }

    parse_description_envelope(&response.body, &url)
}
