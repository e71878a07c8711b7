/**
 * Error taxonomy shared by every remote pin operation.
 */
pub mod error;
/**
 * Pin request data model: statuses, records returned
 *  by the remote service, listing filters and the
 *  paired item/terminal-result stream used by listings.
 */
pub mod pin;
/**
 * Collaborator seams: the typed pinning service client
 *  and the local node (path resolution, swarm dialing).
 */
pub mod client;
pub mod node;
/**
 * Named registry of remote pinning service credentials,
 *  persisted through an external config repository.
 */
pub mod registry;
/**
 * Orchestration of add / ls / rm against a
 *  configured pinning service.
 */
pub mod pinner;
/**
 * In-memory collaborators for tests. Behind the
 *  `testkit` feature outside this crate's own tests.
 */
#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
/**
 * Helper for surfacing build version information
 *  captured at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::client::{AddOptions, Connector, PinningClient};
    pub use crate::error::RemotePinError;
    pub use crate::node::{ContentResolver, Swarm};
    pub use crate::pin::{pin_stream, FilterSet, PinRecord, PinStatus, PinStream, PinStreamSender};
    pub use crate::pinner::{AddRequest, Pinner, RemoveRequest, DEFAULT_POLL_INTERVAL};
    pub use crate::registry::{
        ConfigHandle, ConfigRepo, RemotePinConfig, RemotePinServices, ServiceCredential,
        ServiceEndpoint, ServiceRegistry, ServiceSummary,
    };
    pub use crate::version::BuildInfo;
    pub use cid::Cid;
    pub use tokio_util::sync::CancellationToken;
}
