use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use cid::Cid;
use parking_lot::Mutex;

use crate::node::{ContentResolver, Swarm};

/// Resolves registered paths, and otherwise anything that is a CID or
/// `/ipfs/<cid>`.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    paths: HashMap<String, Cid>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>, cid: Cid) -> Self {
        self.paths.insert(path.into(), cid);
        self
    }
}

#[async_trait]
impl ContentResolver for StaticResolver {
    async fn resolve(&self, path: &str) -> anyhow::Result<Cid> {
        if let Some(cid) = self.paths.get(path) {
            return Ok(*cid);
        }
        let raw = path.strip_prefix("/ipfs/").unwrap_or(path);
        raw.parse::<Cid>()
            .map_err(|e| anyhow!("no link named {:?} ({})", path, e))
    }
}

/// Records every dial; addresses marked unreachable fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingSwarm {
    unreachable: Arc<Mutex<HashSet<String>>>,
    dialed: Arc<Mutex<Vec<String>>>,
}

impl RecordingSwarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable(self, addr: impl Into<String>) -> Self {
        self.unreachable.lock().insert(addr.into());
        self
    }

    pub fn dialed(&self) -> Vec<String> {
        self.dialed.lock().clone()
    }
}

#[async_trait]
impl Swarm for RecordingSwarm {
    async fn connect(&self, addr: &str) -> anyhow::Result<()> {
        self.dialed.lock().push(addr.to_string());
        if self.unreachable.lock().contains(addr) {
            return Err(anyhow!("failed to dial {}: no route", addr));
        }
        Ok(())
    }
}
