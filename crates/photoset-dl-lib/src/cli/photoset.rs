use crate::cli::PhotosetParams;
use crate::cli::commands::download_urls;
use crate::download::{BatchResult, http_client_builder};
use crate::error::PhotosetDlError;
use crate::manifest::fetch_manifest_urls;

pub async fn run_photoset(params: PhotosetParams) -> Result<BatchResult, PhotosetDlError> {
    let PhotosetParams { endpoint, options } = params;

    let client = http_client_builder(&options).build()?;

    // A manifest that cannot be fetched or parsed leaves nothing to download.
    let urls = match fetch_manifest_urls(&client, &endpoint).await {
        Ok(urls) => {
            tracing::info!("Manifest lists {} photos", urls.len());
            urls
        }
        Err(err) => {
            tracing::error!("{}", err);
            Vec::new()
        }
    };

    download_urls(urls, options).await
}
