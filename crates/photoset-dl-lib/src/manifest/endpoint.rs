use crate::config::{DEFAULT_FLICKR_API_BASE, ManifestSource};
use crate::error::PhotosetDlError;
use url::Url;

pub fn manifest_endpoint(source: &ManifestSource) -> Result<Url, PhotosetDlError> {
    match source {
        ManifestSource::Endpoint { endpoint } => {
            Url::parse(endpoint).map_err(|e| PhotosetDlError::ManifestSource {
                details: format!("Invalid manifest endpoint {}: {}", endpoint, e),
            })
        }
        ManifestSource::FlickrPhotoset {
            api_key,
            photoset_id,
            user_id,
            api_base,
        } => {
            let api_base = api_base.as_deref().unwrap_or(DEFAULT_FLICKR_API_BASE);
            let mut url = Url::parse(api_base).map_err(|e| PhotosetDlError::ManifestSource {
                details: format!("Invalid API base URL {}: {}", api_base, e),
            })?;

            {
                let mut query = url.query_pairs_mut();
                query
                    .append_pair("method", "flickr.photosets.getPhotos")
                    .append_pair("api_key", api_key)
                    .append_pair("photoset_id", photoset_id);
                if let Some(user_id) = user_id {
                    query.append_pair("user_id", user_id);
                }
                query
                    .append_pair("extras", "url_o")
                    .append_pair("format", "json")
                    .append_pair("nojsoncallback", "1");
            }

            Ok(url)
        }
    }
}

/// The endpoint without its query, which may carry an API key.
pub fn redacted_endpoint(endpoint: &Url) -> String {
    let mut redacted = endpoint.clone();
    redacted.set_query(None);
    redacted.set_fragment(None);
    redacted.to_string()
}
