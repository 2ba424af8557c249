use super::classify::{ResponseDisposition, response_disposition};
use super::in_flight::{DownloadError, InFlightSet};
use super::naming::choose_local_name_excluding;
use super::types::{
    BatchResult, DownloadOptions, DownloadOutcome, DownloadRecord, DownloadRequest, FailureReason,
};
use crate::error::error_chain_message;
use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Client settings shared by the manifest request and the item transfers.
pub fn http_client_builder(options: &DownloadOptions) -> ClientBuilder {
    let builder = Client::builder().user_agent(options.user_agent.clone());
    match options.request_timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

struct ReceivedResponse {
    status: u16,
    body: Vec<u8>,
}

fn transport_message(err: reqwest::Error) -> String {
    error_chain_message(err.without_url())
}

async fn fetch(client: Client, url: String) -> Result<ReceivedResponse, String> {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(transport_message)?;
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(transport_message)?;
    Ok(ReceivedResponse {
        status,
        body: body.to_vec(),
    })
}

/// Writes `payload` to a file that must not exist yet. A partial file is
/// removed if the write fails.
async fn save_to_disk(path: &Path, payload: Vec<u8>) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;

    let written = async {
        file.write_all(&payload).await?;
        file.flush().await
    }
    .await;
    if let Err(err) = written {
        drop(file);
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            debug!(output = %path.display(), "Could not remove partial file: {}", remove_err);
        }
        return Err(err);
    }
    Ok(())
}

async fn complete_transfer(
    request: &DownloadRequest,
    received: Result<ReceivedResponse, String>,
) -> DownloadOutcome {
    let response = match received {
        Ok(response) => response,
        Err(message) => return DownloadOutcome::Failed(FailureReason::Transport(message)),
    };

    match response_disposition(response.status) {
        ResponseDisposition::Redirect => DownloadOutcome::Redirected,
        ResponseDisposition::HttpError => {
            DownloadOutcome::Failed(FailureReason::HttpStatus(response.status))
        }
        ResponseDisposition::Save => {
            let path = request.output_path.clone();
            match save_to_disk(&path, response.body).await {
                Ok(()) => DownloadOutcome::Succeeded(path),
                Err(err) => DownloadOutcome::Failed(FailureReason::Filesystem {
                    path,
                    message: err.to_string(),
                }),
            }
        }
    }
}

fn report_outcome(request: &DownloadRequest, outcome: &DownloadOutcome) {
    match outcome {
        DownloadOutcome::Succeeded(path) => {
            info!(url = %request.url, output = %path.display(), "Download succeeded");
        }
        DownloadOutcome::Failed(reason) => {
            warn!(url = %request.url, "Download failed: {}", reason);
        }
        DownloadOutcome::Redirected => {
            warn!(url = %request.url, "Request was redirected, not following");
        }
    }
}

/// Downloads a batch of URLs concurrently into one directory.
///
/// Every URL becomes its own transfer task as soon as it is dispatched; there is
/// no concurrency cap. Completions are consumed one at a time by
/// [`BatchDownloadManager::run_batch`], which owns the in-flight set and the
/// accumulating result, so neither needs a lock.
pub struct BatchDownloadManager {
    client: Client,
    options: DownloadOptions,
}

impl BatchDownloadManager {
    pub fn new(options: DownloadOptions) -> Result<Self, reqwest::Error> {
        let client = http_client_builder(&options)
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    /// Downloads every URL and returns once all of them have completed.
    ///
    /// Per-item failures are recorded in the result. The only error is a
    /// completion for a transfer that is not in flight.
    pub async fn run_batch<I>(&self, urls: I) -> Result<BatchResult, DownloadError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let (result, in_flight) = self.run_batch_tracked(urls).await?;
        debug_assert!(in_flight.is_empty());
        Ok(result)
    }

    /// Runs the batch and also hands back the in-flight set it drained.
    async fn run_batch_tracked<I>(
        &self,
        urls: I,
    ) -> Result<(BatchResult, InFlightSet), DownloadError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let output_dir = &self.options.output_dir;
        let mut in_flight = InFlightSet::default();
        let mut reserved_names = HashSet::new();
        let mut transfers = FuturesUnordered::new();

        for (index, url) in urls.into_iter().enumerate() {
            let url: String = url.into();
            // Names handed out earlier in this batch do not exist on disk yet.
            let file_name = choose_local_name_excluding(&url, output_dir, &reserved_names);
            reserved_names.insert(file_name.clone());

            let request = DownloadRequest {
                index,
                output_path: output_dir.join(&file_name),
                file_name,
                url,
            };
            debug!(url = %request.url, output = %request.output_path.display(), "Dispatching");

            let transfer = tokio::spawn(fetch(self.client.clone(), request.url.clone()));
            let id = in_flight.insert(request);
            transfers.push(async move { (id, transfer.await) });
        }

        let mut result = BatchResult::new(in_flight.len());
        if in_flight.is_empty() {
            info!("Nothing to download");
            return Ok((result, in_flight));
        }

        info!("Waiting for {} downloads to finish...", in_flight.len());

        while let Some((id, joined)) = transfers.next().await {
            let request = in_flight.complete(id)?;
            let received =
                joined.unwrap_or_else(|err| Err(format!("transfer task failed: {err}")));

            let outcome = complete_transfer(&request, received).await;
            report_outcome(&request, &outcome);
            result.push(DownloadRecord { request, outcome });
        }

        Ok((result, in_flight))
    }
}
