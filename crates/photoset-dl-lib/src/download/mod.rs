mod classify;
#[allow(clippy::module_inception)]
mod download;
mod in_flight;
mod naming;
mod types;

pub use classify::{REDIRECT_STATUS_CODES, ResponseDisposition, is_redirect, response_disposition};
pub use download::{BatchDownloadManager, http_client_builder};
pub use in_flight::{DownloadError, InFlightSet};
pub use naming::{FALLBACK_FILE_NAME, choose_local_name, choose_local_name_excluding, url_basename};
pub use types::{
    BatchResult, BatchSummary, DEFAULT_USER_AGENT, DownloadOptions, DownloadOutcome,
    DownloadRecord, DownloadRequest, FailureReason, TransferId,
};
