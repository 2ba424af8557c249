use super::endpoint::redacted_endpoint;
use crate::error::error_chain_message;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to fetch manifest from {endpoint}: {reason}")]
    Fetch { endpoint: String, reason: String },

    #[error("Failed to parse manifest from {endpoint}: {reason}")]
    Parse { endpoint: String, reason: String },
}

/// Fetches the manifest at `endpoint` and returns its photo URLs in order.
pub async fn fetch_manifest_urls(
    client: &Client,
    endpoint: &Url,
) -> Result<Vec<String>, ManifestError> {
    let display_endpoint = redacted_endpoint(endpoint);
    tracing::info!(endpoint = %display_endpoint, "Fetching manifest");

    let fetch_error = |err: reqwest::Error| ManifestError::Fetch {
        endpoint: display_endpoint.clone(),
        reason: error_chain_message(err.without_url()),
    };

    let response = client
        .get(endpoint.clone())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(fetch_error)?;
    let body = response.bytes().await.map_err(fetch_error)?;

    extract_photo_urls(&body).map_err(|e| ManifestError::Parse {
        endpoint: display_endpoint.clone(),
        reason: e.to_string(),
    })
}

/// Collects `photoset.photo[].url_o` from a manifest document.
///
/// Only a body that is not JSON at all is an error. A document of any other
/// shape, including the `"stat": "fail"` envelope, yields no URLs, and photos
/// without a string `url_o` are skipped.
pub fn extract_photo_urls(body: &[u8]) -> Result<Vec<String>, serde_json::Error> {
    let document: Value = serde_json::from_slice(body)?;

    if document.get("stat").and_then(Value::as_str) == Some("fail") {
        let code = document
            .get("code")
            .and_then(Value::as_i64)
            .unwrap_or_default();
        let message = document
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        tracing::warn!(code, "Manifest request was rejected: {}", message);
        return Ok(Vec::new());
    }

    let Some(photos) = document
        .get("photoset")
        .and_then(|photoset| photoset.get("photo"))
        .and_then(Value::as_array)
    else {
        tracing::warn!("Manifest has no photoset.photo list, treating it as empty");
        return Ok(Vec::new());
    };

    let mut urls = Vec::with_capacity(photos.len());
    for (index, photo) in photos.iter().enumerate() {
        match photo.get("url_o").and_then(Value::as_str) {
            Some(url) => urls.push(url.to_string()),
            None => {
                let id = photo.get("id").and_then(Value::as_str).unwrap_or("");
                tracing::warn!(index, id, "Skipping photo without an original-size URL");
            }
        }
    }

    tracing::debug!("Manifest lists {} of {} photos", urls.len(), photos.len());
    Ok(urls)
}
