use crate::domain::model::{ConnectRequest, Operation};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ProjectResolver: Send + Sync {
    /// Resolves a project id (or number) to its numeric project number.
    async fn project_number(&self, project: &str) -> Result<u64>;
}

#[async_trait]
pub trait PeeringService: Send + Sync {
    async fn connect(&self, request: &ConnectRequest) -> Result<Operation>;
    async fn get_operation(&self, name: &str) -> Result<Operation>;
}

/// A single CLI verb. Flags are described by `Args` through clap derive.
#[async_trait]
pub trait Command: Send + Sync {
    type Args: Send + 'static;
    type Output: Send;

    async fn execute(&self, args: Self::Args) -> Result<Self::Output>;
}
