//! Kubo RPC client for the local IPFS node: path resolution and swarm dials.

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;

use common::prelude::{Cid, ContentResolver, Swarm};

use crate::api::{self, endpoint, ApiError, ApiRequest};

/// `POST /api/v0/resolve?arg=<path>&recursive=true`
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolveResponse {
    #[serde(rename = "Path")]
    pub path: String,
}

impl ApiRequest for ResolveRequest {
    type Response = ResolveResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client
            .post(endpoint(base_url, &["api", "v0", "resolve"]))
            .query(&[("arg", self.path.as_str()), ("recursive", "true")])
    }
}

/// `POST /api/v0/swarm/connect?arg=<multiaddr>`
#[derive(Debug, Clone)]
pub struct SwarmConnectRequest {
    pub addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwarmConnectResponse {
    #[serde(rename = "Strings", default)]
    pub strings: Vec<String>,
}

impl ApiRequest for SwarmConnectRequest {
    type Response = SwarmConnectResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        client
            .post(endpoint(base_url, &["api", "v0", "swarm", "connect"]))
            .query(&[("arg", self.addr.as_str())])
    }
}

#[derive(Debug, Clone)]
pub struct NodeClient {
    pub api: Url,
    client: Client,
}

impl NodeClient {
    pub fn new(api: &Url) -> Result<Self, ApiError> {
        Ok(Self {
            api: api.clone(),
            client: Client::builder().build()?,
        })
    }
}

/// A bare CID or `/ipfs/<cid>` names its object directly; anything else needs
/// the node to walk it.
fn direct_cid(path: &str) -> Option<Cid> {
    let trimmed = path.trim_end_matches('/');
    let candidate = trimmed.strip_prefix("/ipfs/").unwrap_or(trimmed);
    if candidate.contains('/') {
        return None;
    }
    candidate.parse().ok()
}

/// The CID named by a resolved `/ipfs/<cid>` path.
fn cid_of_resolved(path: &str) -> anyhow::Result<Cid> {
    let rest = path
        .strip_prefix("/ipfs/")
        .ok_or_else(|| anyhow!("node resolved to unexpected path {}", path))?;
    let raw = rest.split('/').next().unwrap_or(rest);
    raw.parse()
        .map_err(|e| anyhow!("node resolved to invalid CID {}: {}", raw, e))
}

/// Delegates must name the peer to dial.
fn check_peer_addr(addr: &str) -> anyhow::Result<()> {
    let parts: Vec<_> = addr.split('/').collect();
    let has_peer = parts
        .windows(2)
        .any(|pair| matches!(pair[0], "p2p" | "ipfs") && !pair[1].is_empty());
    if addr.starts_with('/') && has_peer {
        Ok(())
    } else {
        Err(anyhow!("{} is not a peer multiaddr", addr))
    }
}

#[async_trait]
impl ContentResolver for NodeClient {
    async fn resolve(&self, path: &str) -> anyhow::Result<Cid> {
        if let Some(cid) = direct_cid(path) {
            return Ok(cid);
        }

        let request = ResolveRequest {
            path: path.to_string(),
        };
        let response = api::call(&self.api, &self.client, request).await?;
        tracing::debug!(%path, resolved = %response.path, "resolved content path");
        cid_of_resolved(&response.path)
    }
}

#[async_trait]
impl Swarm for NodeClient {
    async fn connect(&self, addr: &str) -> anyhow::Result<()> {
        check_peer_addr(addr)?;
        let request = SwarmConnectRequest {
            addr: addr.to_string(),
        };
        let response = api::call(&self.api, &self.client, request).await?;
        for line in &response.strings {
            tracing::trace!(%addr, "{}", line);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CID: &str = "bafkreigh2akiscaildcqabsyg3dfr6chu3fgpregiymsck7e7aqa4s52zy";

    #[test]
    fn test_direct_cid() {
        let cid: Cid = CID.parse().unwrap();
        assert_eq!(direct_cid(CID), Some(cid));
        assert_eq!(direct_cid(&format!("/ipfs/{}", CID)), Some(cid));
        assert_eq!(direct_cid(&format!("/ipfs/{}/", CID)), Some(cid));
        assert_eq!(direct_cid(&format!("/ipfs/{}/docs/a.txt", CID)), None);
        assert_eq!(direct_cid("/ipns/example.com"), None);
    }

    #[test]
    fn test_cid_of_resolved() {
        let cid: Cid = CID.parse().unwrap();
        assert_eq!(cid_of_resolved(&format!("/ipfs/{}", CID)).unwrap(), cid);
        assert_eq!(
            cid_of_resolved(&format!("/ipfs/{}/docs", CID)).unwrap(),
            cid
        );
        assert!(cid_of_resolved("/ipns/k51").is_err());
        assert!(cid_of_resolved("/ipfs/garbage").is_err());
    }

    #[test]
    fn test_peer_addr() {
        assert!(check_peer_addr(
            "/ip4/1.2.3.4/tcp/4001/p2p/12D3KooWGzxzKZYveHXtpG6AsrUJBcWxHBFS2HsEoGTxrMLvKXtf"
        )
        .is_ok());
        assert!(check_peer_addr("/dnsaddr/pins.example.com/ipfs/QmPeer").is_ok());
        assert!(check_peer_addr("/dnsaddr/pins.example.com").is_err());
        assert!(check_peer_addr("not a multiaddr").is_err());
        assert!(check_peer_addr("/ip4/1.2.3.4/tcp/4001/p2p/").is_err());
    }
}
