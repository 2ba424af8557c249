use crate::download::{BatchDownloadManager, BatchResult, DownloadOptions};
use crate::error::PhotosetDlError;

/// Runs one batch over `urls` and logs a summary once it completes.
pub async fn download_urls(
    urls: Vec<String>,
    options: DownloadOptions,
) -> Result<BatchResult, PhotosetDlError> {
    if !urls.is_empty() {
        std::fs::create_dir_all(&options.output_dir).map_err(|e| {
            PhotosetDlError::OutputDirectoryCreation {
                path: options.output_dir.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    let manager = BatchDownloadManager::new(options)?;
    tracing::info!(
        "Downloading {} files to {}",
        urls.len(),
        manager.options().output_dir.display()
    );

    let result = manager.run_batch(urls).await?;

    let summary = result.summary();
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        redirected = summary.redirected,
        "All downloads finished"
    );
    Ok(result)
}
