use std::time::Duration;

use clap::{ArgAction, Args};

use common::prelude::{AddRequest, RemotePinError};

use crate::op::{OpContext, PinCommandError};
use crate::output::{PinAdded, PinOutput};

#[derive(Args, Debug, Clone)]
pub struct Add {
    /// Path to the object to pin: a CID, /ipfs/<cid>[/sub/path] or /ipns/<name>
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Optional name for the pin
    #[arg(long)]
    pub name: Option<String>,

    /// Name of the remote pinning service to use
    #[arg(long)]
    pub service: Option<String>,

    /// Return as soon as the service accepts the request; pass
    /// --background=false to wait until the object is pinned
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub background: bool,

    /// Give up waiting after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error(transparent)]
    Setup(#[from] PinCommandError),
    #[error(transparent)]
    Pin(#[from] RemotePinError),
}

#[async_trait::async_trait]
impl crate::op::Op for Add {
    type Error = AddError;
    type Output = PinAdded;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let request = AddRequest {
            paths: self.paths.clone(),
            name: self.name.clone(),
            background: self.background,
        };
        // reject bad arity before touching the config
        request.target()?;

        let (pinner, node) = ctx.pinner(self.service.as_deref().unwrap_or_default())?;

        let cancel = ctx.cancel.child_token();
        let timer = self.timeout.map(|secs| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                tracing::debug!(secs, "add timed out");
                cancel.cancel();
            })
        });

        let result = pinner.add(&request, &node, &node, &cancel).await;
        if let Some(timer) = timer {
            timer.abort();
        }

        Ok(PinAdded {
            pin: PinOutput::from(result?),
            json: self.json,
        })
    }
}
