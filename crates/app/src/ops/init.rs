use clap::Args;
use url::Url;

use remote_pin::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// RPC address of the local IPFS node
    #[arg(long, default_value = "http://127.0.0.1:5001")]
    pub node_api: Url,

    /// Status poll interval for blocking adds, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub poll_interval_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            node_api: self.node_api.clone(),
            poll_interval_ms: self.poll_interval_ms,
            ..AppConfig::default()
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        Ok(format!(
            "Initialized rpin directory at: {}\n\
             - Config: {}\n\
             - Node API: {}",
            state.rpin_dir.display(),
            state.config_path.display(),
            state.config.node_api,
        ))
    }
}
