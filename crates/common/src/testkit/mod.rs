/// In-memory collaborators for exercising the orchestrators without a
/// network, a node, or a config file.
///
/// # Example
///
/// ```rust,ignore
/// use common::prelude::*;
/// use common::testkit::{MockPinningService, RecordingSwarm, StaticResolver};
///
/// #[tokio::test]
/// async fn test_add() {
///     let service = MockPinningService::new();
///     let pinner = Pinner::new("mock", service.clone());
///     let record = pinner
///         .add(
///             &AddRequest::new("/ipfs/bafy..."),
///             &StaticResolver::new(),
///             &RecordingSwarm::new(),
///             &CancellationToken::new(),
///         )
///         .await
///         .unwrap();
///     assert_eq!(service.calls().submitted, 1);
/// }
/// ```
mod node;
mod repo;
mod service;

pub use node::{RecordingSwarm, StaticResolver};
pub use repo::{MemoryConfig, MemoryRepo};
pub use service::{MockCalls, MockPinningService};

use cid::multihash::Multihash;
use cid::Cid;

const RAW_CODEC: u64 = 0x55;
const SHA2_256: u64 = 0x12;

/// A well-formed CIDv1 derived from `seed`; distinct seeds give distinct CIDs.
pub fn test_cid(seed: u8) -> Cid {
    let digest = [seed; 32];
    let hash = Multihash::wrap(SHA2_256, &digest).expect("32 byte digest fits");
    Cid::new_v1(RAW_CODEC, hash)
}
