use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Credentials for one remote pinning service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCredential {
    pub name: String,
    pub url: Url,
    pub key: String,
}

impl std::fmt::Debug for ServiceCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCredential")
            .field("name", &self.name)
            .field("url", &self.url.as_str())
            .field("key", &"<redacted>")
            .finish()
    }
}

/// The slice of the persisted config this crate owns: service name to
/// credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePinServices {
    #[serde(default)]
    pub services: BTreeMap<String, ServiceCredential>,
}

/// Implemented by whatever config type the repository persists, so the
/// registry can reach its own section without knowing the rest.
pub trait RemotePinConfig {
    fn remote_pin_services(&self) -> &RemotePinServices;
    fn remote_pin_services_mut(&mut self) -> &mut RemotePinServices;
}

/// A config repository that can be opened for one read-modify-write cycle.
pub trait ConfigRepo {
    type Handle: ConfigHandle;

    fn open(&self) -> anyhow::Result<Self::Handle>;
}

/// An open repository. Dropping the handle closes it.
pub trait ConfigHandle {
    type Config: RemotePinConfig;

    /// Read the latest persisted config. Never served from a cache.
    fn read_config(&self) -> anyhow::Result<Self::Config>;

    fn write_config(&mut self, config: &Self::Config) -> anyhow::Result<()>;
}
