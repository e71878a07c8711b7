use cid::Cid;
use time::OffsetDateTime;

use super::PinStatus;

/// A pin request as last observed on the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRecord {
    /// Assigned by the service; the only key for status lookups and deletes
    pub request_id: String,
    /// Optional, non-unique label
    pub name: Option<String>,
    pub cid: Cid,
    pub status: PinStatus,
    /// Multiaddrs the service suggests for content delivery, in service order
    pub delegates: Vec<String>,
    /// When the service accepted the request, if it said
    pub created: Option<OffsetDateTime>,
}

impl PinRecord {
    pub fn new(request_id: impl Into<String>, cid: Cid, status: PinStatus) -> Self {
        Self {
            request_id: request_id.into(),
            name: None,
            cid,
            status,
            delegates: Vec::new(),
            created: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_delegates(mut self, delegates: Vec<String>) -> Self {
        self.delegates = delegates;
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
