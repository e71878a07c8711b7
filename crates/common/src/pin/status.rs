use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a pin request as reported by the remote service.
///
/// `Pinned` and `Failed` are terminal. Anything the service reports that we
/// do not recognise maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinStatus {
    Queued,
    Pinning,
    Pinned,
    Failed,
    #[serde(other)]
    Unknown,
}

impl PinStatus {
    /// Statuses a caller may filter on.
    pub const FILTERABLE: [PinStatus; 4] = [
        PinStatus::Queued,
        PinStatus::Pinning,
        PinStatus::Pinned,
        PinStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PinStatus::Queued => "queued",
            PinStatus::Pinning => "pinning",
            PinStatus::Pinned => "pinned",
            PinStatus::Failed => "failed",
            PinStatus::Unknown => "unknown",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PinStatus::Pinned | PinStatus::Failed)
    }

    /// Lenient mapping for values received from the wire.
    pub fn from_wire(value: &str) -> Self {
        value.parse().unwrap_or(PinStatus::Unknown)
    }
}

impl fmt::Display for PinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status {0} is not valid")]
pub struct InvalidStatus(pub String);

impl FromStr for PinStatus {
    type Err = InvalidStatus;

    /// Only the four states a service can actually report parse; `unknown`
    /// is a placeholder, not a status anyone can ask for.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PinStatus::FILTERABLE
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}
