mod endpoint;
mod fetcher;

pub use endpoint::{manifest_endpoint, redacted_endpoint};
pub use fetcher::{ManifestError, extract_photo_urls, fetch_manifest_urls};
