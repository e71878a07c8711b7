use clap::Args;

use common::prelude::{FilterSet, RemotePinError, RemoveRequest};

use crate::op::{OpContext, PinCommandError};

#[derive(Args, Debug, Clone)]
pub struct Rm {
    /// Request ids of the pins to remove
    pub ids: Vec<String>,

    /// Name of the remote pinning service to use
    #[arg(long)]
    pub service: Option<String>,

    /// Remove pins with exactly this name (case-sensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// Remove pins for these CIDs (comma separated)
    #[arg(long = "cid", value_delimiter = ',')]
    pub cids: Vec<String>,

    /// Remove pins in these states (comma separated)
    #[arg(long = "status", value_delimiter = ',')]
    pub statuses: Vec<String>,

    /// Allow removing more than one pin matched by the filters
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RmError {
    #[error(transparent)]
    Setup(#[from] PinCommandError),
    #[error(transparent)]
    Pin(#[from] RemotePinError),
}

#[async_trait::async_trait]
impl crate::op::Op for Rm {
    type Error = RmError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let request = RemoveRequest {
            request_ids: self.ids.clone(),
            filter: FilterSet::parse(self.name.as_deref(), &self.cids, &self.statuses)?,
            force: self.force,
        };
        let (pinner, _) = ctx.pinner(self.service.as_deref().unwrap_or_default())?;

        let removed = pinner.remove(&request, &ctx.cancel).await?;
        tracing::debug!(count = removed.len(), "remove complete");
        Ok(String::new())
    }
}
