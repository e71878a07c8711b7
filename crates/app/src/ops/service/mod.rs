use clap::{Args, Subcommand};

pub mod add;
pub mod ls;
pub mod rm;

use crate::op::Op;

crate::command_enum! {
    (Add, add::Add),
    (Rm, rm::Rm),
    (Ls, ls::Ls),
}

pub type ServiceCommand = Command;

/// Manage the remote pinning services rpin knows about
#[derive(Args, Debug, Clone)]
pub struct Service {
    #[command(subcommand)]
    pub command: ServiceCommand,
}

#[async_trait::async_trait]
impl Op for Service {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

/// Failures of the service registry commands.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    State(#[from] remote_pin::StateError),
    #[error(transparent)]
    Registry(#[from] common::prelude::RemotePinError),
}
