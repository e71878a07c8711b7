use std::sync::Arc;

use parking_lot::Mutex;

use crate::registry::{ConfigHandle, ConfigRepo, RemotePinConfig, RemotePinServices};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryConfig {
    pub remote_pin_services: RemotePinServices,
}

impl RemotePinConfig for MemoryConfig {
    fn remote_pin_services(&self) -> &RemotePinServices {
        &self.remote_pin_services
    }

    fn remote_pin_services_mut(&mut self) -> &mut RemotePinServices {
        &mut self.remote_pin_services
    }
}

#[derive(Debug, Default)]
struct Inner {
    config: MemoryConfig,
    opens: usize,
    writes: usize,
}

/// Shared in-memory config repository. Clones see the same config.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepo {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// The config as currently persisted.
    pub fn config(&self) -> MemoryConfig {
        self.inner.lock().config.clone()
    }

    /// Overwrite the persisted config, as an out-of-process edit would.
    pub fn set_config(&self, config: MemoryConfig) {
        self.inner.lock().config = config;
    }

    pub fn opens(&self) -> usize {
        self.inner.lock().opens
    }

    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }
}

impl ConfigRepo for MemoryRepo {
    type Handle = MemoryHandle;

    fn open(&self) -> anyhow::Result<MemoryHandle> {
        self.inner.lock().opens += 1;
        Ok(MemoryHandle {
            inner: self.inner.clone(),
        })
    }
}

#[derive(Debug)]
pub struct MemoryHandle {
    inner: Arc<Mutex<Inner>>,
}

impl ConfigHandle for MemoryHandle {
    type Config = MemoryConfig;

    fn read_config(&self) -> anyhow::Result<MemoryConfig> {
        Ok(self.inner.lock().config.clone())
    }

    fn write_config(&mut self, config: &MemoryConfig) -> anyhow::Result<()> {
        let mut inner = self.inner.lock();
        inner.config = config.clone();
        inner.writes += 1;
        Ok(())
    }
}
