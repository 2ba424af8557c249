use super::types::{DownloadRequest, TransferId};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DownloadError {
    #[error("Transfer {id} completed but is not in flight")]
    ProtocolViolation { id: TransferId },
}

/// Transfers that have been dispatched and not yet completed.
#[derive(Debug, Default)]
pub struct InFlightSet {
    next_id: u64,
    entries: HashMap<TransferId, DownloadRequest>,
}

impl InFlightSet {
    pub fn insert(&mut self, request: DownloadRequest) -> TransferId {
        let id = TransferId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, request);
        id
    }

    /// Removes a completed transfer. Each id may be completed exactly once.
    pub fn complete(&mut self, id: TransferId) -> Result<DownloadRequest, DownloadError> {
        self.entries
            .remove(&id)
            .ok_or(DownloadError::ProtocolViolation { id })
    }

    pub fn contains(&self, id: TransferId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
