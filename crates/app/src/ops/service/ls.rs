use clap::Args;

use super::ServiceError;
use crate::output::{ServiceList, ServiceOutput};

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[async_trait::async_trait]
impl crate::op::Op for Ls {
    type Error = ServiceError;
    type Output = ServiceList;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let services = ctx
            .registry()?
            .list_services()?
            .into_iter()
            .map(ServiceOutput::from)
            .collect();

        Ok(ServiceList {
            services,
            json: self.json,
        })
    }
}
