use crate::cli::GetParams;
use crate::cli::commands::download_urls;
use crate::download::BatchResult;
use crate::error::PhotosetDlError;

pub async fn run_get(params: GetParams) -> Result<BatchResult, PhotosetDlError> {
    let GetParams { urls, options } = params;

    if urls.is_empty() {
        tracing::warn!("No URLs given, nothing to download");
        return Ok(BatchResult::default());
    }

    download_urls(urls, options).await
}
