use crate::config::cli::ConnectArgs;
use crate::config::Settings;
use crate::core::poller::{OperationPoller, PollPolicy};
use crate::core::printer::print_operation;
use crate::domain::model::{split_reserved_ranges, ConnectRequest, Operation};
use crate::domain::ports::{Command, PeeringService, ProjectResolver};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::Write;

pub const OP_WAIT_CMD: &str = "services vpc-peerings operations wait";

pub fn wait_command(operation_name: &str) -> String {
    format!("{} {}", OP_WAIT_CMD, operation_name)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    /// `--async`: the request was accepted and nobody is waiting on it.
    Pending(Operation),
    Completed(Operation),
}

impl ConnectOutcome {
    pub fn render<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        match self {
            ConnectOutcome::Pending(op) => {
                writeln!(
                    out,
                    "Asynchronous operation is in progress... Use the following command to wait for its completion:\n {}",
                    wait_command(&op.name)
                )?;
                Ok(())
            }
            ConnectOutcome::Completed(op) => print_operation(out, op),
        }
    }
}

pub struct ConnectCommand<R: ProjectResolver, P: PeeringService> {
    settings: Settings,
    resolver: R,
    peering: P,
    policy: PollPolicy,
}

impl<R: ProjectResolver, P: PeeringService> ConnectCommand<R, P> {
    pub fn new(settings: Settings, resolver: R, peering: P) -> Self {
        let policy = settings.poll_policy();
        Self {
            settings,
            resolver,
            peering,
            policy,
        }
    }
}

#[async_trait]
impl<R: ProjectResolver, P: PeeringService> Command for ConnectCommand<R, P> {
    type Args = ConnectArgs;
    type Output = ConnectOutcome;

    async fn execute(&self, args: ConnectArgs) -> Result<ConnectOutcome> {
        let project = self.settings.require_project()?;
        let project_number = self.resolver.project_number(project).await?;
        tracing::debug!("Resolved project {} to number {}", project, project_number);

        let request = ConnectRequest {
            project_number,
            service: args.service,
            network: args.network,
            reserved_ranges: split_reserved_ranges(&args.reserved_ranges),
        };

        tracing::info!(
            "Connecting network {} to service {} with {} reserved range(s)",
            request.network,
            request.service,
            request.reserved_ranges.len()
        );
        let operation = self.peering.connect(&request).await?;

        if args.run_async {
            return Ok(ConnectOutcome::Pending(operation));
        }

        let poller = OperationPoller::new(&self.peering, self.policy);
        let operation = poller.wait(&operation.name).await?;
        Ok(ConnectOutcome::Completed(operation))
    }
}
