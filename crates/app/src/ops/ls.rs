use clap::Args;

use common::prelude::{FilterSet, RemotePinError};

use crate::op::{OpContext, PinCommandError};
use crate::output::{PinOutput, PinWriter};

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Name of the remote pinning service to use
    #[arg(long)]
    pub service: Option<String>,

    /// Only pins with exactly this name (case-sensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// Only pins for these CIDs (comma separated)
    #[arg(long = "cid", value_delimiter = ',')]
    pub cids: Vec<String>,

    /// Only pins in these states: queued, pinning, pinned, failed (comma
    /// separated; the service defaults to pinned)
    #[arg(long = "status", value_delimiter = ',')]
    pub statuses: Vec<String>,

    /// Print one JSON object per pin
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error(transparent)]
    Setup(#[from] PinCommandError),
    #[error(transparent)]
    Pin(#[from] RemotePinError),
}

#[async_trait::async_trait]
impl crate::op::Op for Ls {
    type Error = LsError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let filter = FilterSet::parse(self.name.as_deref(), &self.cids, &self.statuses)?;
        let (pinner, _) = ctx.pinner(self.service.as_deref().unwrap_or_default())?;

        let mut writer = PinWriter::new(std::io::stdout(), self.json);
        pinner
            .list(&filter, &ctx.cancel, |record| {
                writer.write(&PinOutput::from(record))?;
                Ok(())
            })
            .await?;

        tracing::debug!(written = writer.written(), "listing printed");
        Ok(String::new())
    }
}
