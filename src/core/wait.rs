use crate::config::cli::WaitArgs;
use crate::core::poller::{OperationPoller, PollPolicy};
use crate::domain::model::Operation;
use crate::domain::ports::{Command, PeeringService};
use crate::utils::error::Result;
use async_trait::async_trait;

const OPERATIONS_PREFIX: &str = "operations/";

/// Accepts either `operations/ID` or a bare `ID`.
pub fn operation_resource_name(operation: &str) -> String {
    if operation.starts_with(OPERATIONS_PREFIX) {
        operation.to_string()
    } else {
        format!("{}{}", OPERATIONS_PREFIX, operation)
    }
}

pub struct WaitCommand<P: PeeringService> {
    peering: P,
    policy: PollPolicy,
}

impl<P: PeeringService> WaitCommand<P> {
    pub fn new(peering: P, policy: PollPolicy) -> Self {
        Self { peering, policy }
    }
}

#[async_trait]
impl<P: PeeringService> Command for WaitCommand<P> {
    type Args = WaitArgs;
    type Output = Operation;

    async fn execute(&self, args: WaitArgs) -> Result<Operation> {
        let name = operation_resource_name(&args.operation);
        tracing::info!("Waiting for operation {}", name);
        OperationPoller::new(&self.peering, self.policy)
            .wait(&name)
            .await
    }
}
