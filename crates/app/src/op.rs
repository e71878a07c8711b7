use std::error::Error;
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use common::prelude::{Pinner, ServiceRegistry};
use remote_pin::{AppState, FsRepo, HttpConnector, NodeClient, PinningServiceClient};

#[derive(Clone)]
pub struct OpContext {
    /// Optional custom config path (defaults to ~/.rpin)
    pub config_path: Option<PathBuf>,
    /// Fired on ctrl-c; long running ops stop at their next wait
    pub cancel: CancellationToken,
}

impl OpContext {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> Result<AppState, remote_pin::StateError> {
        AppState::load(self.config_path.clone())
    }

    /// Registry over the config file, re-read on every operation.
    pub fn registry(&self) -> Result<ServiceRegistry<FsRepo>, remote_pin::StateError> {
        Ok(ServiceRegistry::new(self.state()?.repo()))
    }

    /// Everything a pin command needs: a pinner bound to `service` and a
    /// client for the local node.
    pub fn pinner(&self, service: &str) -> Result<(Pinner<PinningServiceClient>, NodeClient), PinCommandError> {
        let state = self.state()?;
        let registry = ServiceRegistry::new(state.repo());
        let pinner = Pinner::connect(&registry, &HttpConnector::new(), service)?
            .with_poll_interval(state.config.poll_interval());
        let node = NodeClient::new(&state.config.node_api)?;
        Ok((pinner, node))
    }
}

/// Failures shared by the commands that talk to a pinning service.
#[derive(Debug, thiserror::Error)]
pub enum PinCommandError {
    #[error(transparent)]
    State(#[from] remote_pin::StateError),
    #[error(transparent)]
    Pin(#[from] common::prelude::RemotePinError),
    #[error("local node client: {0}")]
    Node(#[from] remote_pin::api::ApiError),
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
