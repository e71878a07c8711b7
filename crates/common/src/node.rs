//! The local node this tool runs next to: it turns content paths into CIDs
//! and can dial the delegates a pinning service hands back.

use async_trait::async_trait;
use cid::Cid;

#[async_trait]
pub trait ContentResolver: Send + Sync {
    /// Resolve a content path (`/ipfs/<cid>/sub/path`, `/ipns/...`, or a
    /// bare CID) to the CID of the object it names.
    async fn resolve(&self, path: &str) -> anyhow::Result<Cid>;
}

#[async_trait]
pub trait Swarm: Send + Sync {
    /// Open a connection to the peer behind a `/p2p/` multiaddr.
    async fn connect(&self, addr: &str) -> anyhow::Result<()>;
}
