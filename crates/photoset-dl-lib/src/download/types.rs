use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("photoset-dl/", env!("CARGO_PKG_VERSION"));

/// Opaque handle of a dispatched transfer, unique within one batch.
#[derive(Clone, Copy, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct TransferId(pub(crate) u64);

impl Display for TransferId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Position of the URL in the batch input
    pub index: usize,
    pub url: String,
    /// Resolved local file name, unique within the batch
    pub file_name: String,
    /// Destination the payload is written to
    pub output_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// The request never produced a complete response.
    Transport(String),
    /// The server answered with a 4xx or 5xx status.
    HttpStatus(u16),
    /// The payload arrived but could not be written.
    Filesystem { path: PathBuf, message: String },
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Transport(message) => write!(f, "transfer failed: {message}"),
            FailureReason::HttpStatus(status) => write!(f, "server replied with HTTP {status}"),
            FailureReason::Filesystem { path, message } => {
                write!(f, "could not write {}: {message}", path.display())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    Succeeded(PathBuf),
    Failed(FailureReason),
    Redirected,
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Succeeded(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRecord {
    pub request: DownloadRequest,
    pub outcome: DownloadOutcome,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub redirected: usize,
}

/// Outcomes of one batch, in completion order.
#[derive(Clone, Debug, Default)]
pub struct BatchResult {
    dispatched: usize,
    records: Vec<DownloadRecord>,
}

impl BatchResult {
    pub(crate) fn new(dispatched: usize) -> Self {
        Self {
            dispatched,
            records: Vec::with_capacity(dispatched),
        }
    }

    pub(crate) fn push(&mut self, record: DownloadRecord) {
        self.records.push(record);
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn records(&self) -> &[DownloadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True once every dispatched request has produced its outcome.
    pub fn is_complete(&self) -> bool {
        self.records.len() == self.dispatched
    }

    pub fn summary(&self) -> BatchSummary {
        self.records
            .iter()
            .fold(BatchSummary::default(), |mut summary, record| {
                match record.outcome {
                    DownloadOutcome::Succeeded(_) => summary.succeeded += 1,
                    DownloadOutcome::Failed(_) => summary.failed += 1,
                    DownloadOutcome::Redirected => summary.redirected += 1,
                }
                summary
            })
    }

    /// Records re-sorted by their position in the batch input.
    pub fn into_input_order(self) -> Vec<DownloadRecord> {
        self.records
            .into_iter()
            .sorted_by_key(|record| record.request.index)
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct DownloadOptions {
    pub output_dir: PathBuf,
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            request_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
