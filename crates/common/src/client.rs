use async_trait::async_trait;
use cid::Cid;

use crate::pin::{FilterSet, PinRecord, PinStream};
use crate::registry::ServiceEndpoint;

/// Options recognised when submitting a pin request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Optional label stored alongside the pin on the service
    pub name: Option<String>,
}

/// Typed client for a remote pinning service.
///
/// Implementations own the transport. Errors are reported as-is; callers
/// never retry.
#[async_trait]
pub trait PinningClient: Send + Sync {
    /// Ask the service to pin `cid`.
    async fn submit(&self, cid: Cid, options: &AddOptions) -> anyhow::Result<PinRecord>;

    /// Current state of a previously submitted request.
    async fn get_status(&self, request_id: &str) -> anyhow::Result<PinRecord>;

    /// Drop a pin request.
    async fn delete(&self, request_id: &str) -> anyhow::Result<()>;

    /// Start a listing. Records arrive in service order; the terminal
    /// result must be drained with [`PinStream::finish`].
    fn list(&self, filter: &FilterSet) -> PinStream;
}

/// Builds a [`PinningClient`] for a registered service.
pub trait Connector {
    type Client: PinningClient;

    fn connect(&self, endpoint: &ServiceEndpoint) -> anyhow::Result<Self::Client>;
}
