use clap::Args;

use super::ServiceError;

#[derive(Args, Debug, Clone)]
pub struct Rm {
    /// Name of the service to remove
    pub name: String,
}

#[async_trait::async_trait]
impl crate::op::Op for Rm {
    type Error = ServiceError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        ctx.registry()?.remove_service(&self.name)?;
        Ok(format!("Removed remote pinning service {}", self.name))
    }
}
