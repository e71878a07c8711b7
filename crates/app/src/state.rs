use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use common::prelude::{ConfigHandle, ConfigRepo, RemotePinConfig, RemotePinServices};
use common::prelude::DEFAULT_POLL_INTERVAL;

pub const APP_NAME: &str = "rpin";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_NODE_API: &str = "http://127.0.0.1:5001";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// RPC endpoint of the local IPFS node, used to resolve content paths
    ///  and to dial the delegates a pinning service suggests
    #[serde(default = "default_node_api")]
    pub node_api: Url,
    /// How often a blocking `add` asks the service for the pin's status
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Registered remote pinning services
    #[serde(default)]
    pub remote_pin_services: RemotePinServices,
}

fn default_node_api() -> Url {
    Url::parse(DEFAULT_NODE_API).expect("default node api url is valid")
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_api: default_node_api(),
            poll_interval_ms: default_poll_interval_ms(),
            remote_pin_services: RemotePinServices::default(),
        }
    }
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl RemotePinConfig for AppConfig {
    fn remote_pin_services(&self) -> &RemotePinServices {
        &self.remote_pin_services
    }

    fn remote_pin_services_mut(&mut self) -> &mut RemotePinServices {
        &mut self.remote_pin_services
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the rpin directory (~/.rpin)
    pub rpin_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Configuration as loaded
    pub config: AppConfig,
}

impl AppState {
    /// Get the rpin directory path (custom or default ~/.rpin)
    pub fn rpin_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new rpin state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let rpin_dir = Self::rpin_dir(custom_path)?;
        let config_path = rpin_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&rpin_dir)?;

        let config = config.unwrap_or_default();
        write_config_file(&config_path, &config)?;

        Ok(Self {
            rpin_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the rpin directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let rpin_dir = Self::rpin_dir(custom_path)?;
        let config_path = rpin_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }

        let config = read_config_file(&config_path)?;

        Ok(Self {
            rpin_dir,
            config_path,
            config,
        })
    }

    /// Config repository backed by this directory
    pub fn repo(&self) -> FsRepo {
        FsRepo::new(self.rpin_dir.clone())
    }
}

fn read_config_file(path: &Path) -> Result<AppConfig, StateError> {
    let config_toml = fs::read_to_string(path)?;
    Ok(toml::from_str(&config_toml)?)
}

/// Replace the config file atomically, so a concurrent reader never sees a
/// half-written file.
fn write_config_file(path: &Path, config: &AppConfig) -> Result<(), StateError> {
    let config_toml = toml::to_string_pretty(config)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(config_toml.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| StateError::Io(e.error))?;
    Ok(())
}

/// The on-disk config repository: `config.toml` inside the rpin directory.
#[derive(Debug, Clone)]
pub struct FsRepo {
    rpin_dir: PathBuf,
}

impl FsRepo {
    pub fn new(rpin_dir: PathBuf) -> Self {
        Self { rpin_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.rpin_dir.join(CONFIG_FILE_NAME)
    }
}

impl ConfigRepo for FsRepo {
    type Handle = FsRepoHandle;

    fn open(&self) -> anyhow::Result<FsRepoHandle> {
        let config_path = self.config_path();
        if !config_path.exists() {
            return Err(StateError::NotInitialized.into());
        }
        tracing::trace!(path = %config_path.display(), "opened config repo");
        Ok(FsRepoHandle { config_path })
    }
}

#[derive(Debug)]
pub struct FsRepoHandle {
    config_path: PathBuf,
}

impl ConfigHandle for FsRepoHandle {
    type Config = AppConfig;

    fn read_config(&self) -> anyhow::Result<AppConfig> {
        Ok(read_config_file(&self.config_path)?)
    }

    fn write_config(&mut self, config: &AppConfig) -> anyhow::Result<()> {
        Ok(write_config_file(&self.config_path, config)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("rpin directory not initialized. Run 'rpin init' first")]
    NotInitialized,

    #[error("rpin directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
