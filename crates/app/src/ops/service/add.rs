use clap::Args;

use super::ServiceError;

#[derive(Args, Debug, Clone)]
pub struct Add {
    /// Name for the service
    pub name: String,

    /// Service API endpoint
    pub url: String,

    /// Service API key
    pub key: String,
}

#[async_trait::async_trait]
impl crate::op::Op for Add {
    type Error = ServiceError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        ctx.registry()?
            .add_service(&self.name, &self.url, &self.key)?;
        Ok(format!("Added remote pinning service {}", self.name))
    }
}
