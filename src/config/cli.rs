use clap::{Args, Subcommand};

const CONNECT_EXAMPLES: &str = "\
EXAMPLES:
  To connect a network called `my-network` on the current project to a
  service called `your-service` with reserved IP CIDR ranges
  `10.197.0.0/20,10.198.0.0/20` for the service to use, run:

    $ services vpc-peerings connect --network my-network --service your-service \\
        --reserved-ranges 10.197.0.0/20,10.198.0.0/20

  To run the same command asynchronously (non-blocking), run:

    $ services vpc-peerings connect --network my-network --service your-service \\
        --reserved-ranges 10.197.0.0/20,10.198.0.0/20 --async";

#[derive(Debug, Subcommand)]
pub enum VpcPeeringsCmd {
    #[command(
        about = "Connect to a service via VPC peering for a project network.",
        after_help = CONNECT_EXAMPLES
    )]
    Connect(ConnectArgs),

    #[command(subcommand, about = "Manage VPC peering operations.")]
    Operations(OperationsCmd),
}

#[derive(Debug, Subcommand)]
pub enum OperationsCmd {
    #[command(about = "Wait for a VPC peering operation to complete.")]
    Wait(WaitArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ConnectArgs {
    #[arg(
        long,
        value_name = "NETWORK",
        help = "The network in the current project to be peered with the service"
    )]
    pub network: String,

    #[arg(long, value_name = "SERVICE", help = "The service to connect to")]
    pub service: String,

    // kept as the raw string; splitting happens in the domain layer
    #[arg(
        long = "reserved-ranges",
        value_name = "RESERVED_RANGES",
        help = "The reserved IP CIDR ranges for service to use"
    )]
    pub reserved_ranges: String,

    #[arg(
        long = "async",
        help = "Return immediately, without waiting for the operation in progress to complete"
    )]
    pub run_async: bool,
}

#[derive(Debug, Clone, Args)]
pub struct WaitArgs {
    #[arg(value_name = "OPERATION", help = "The name of the operation to wait for")]
    pub operation: String,
}

#[cfg(test)]
mod tests {
    use super::super::{CliConfig, Commands};
    use super::*;
    use clap::{CommandFactory, Parser};

    const RANGES: &str = "10.197.0.0/20,10.198.0.0/20";

    fn parse(args: &[&str]) -> Result<CliConfig, clap::Error> {
        CliConfig::try_parse_from(args)
    }

    fn connect_args(cli: CliConfig) -> ConnectArgs {
        match cli.command {
            Commands::VpcPeerings(VpcPeeringsCmd::Connect(args)) => args,
            other => panic!("expected Connect, got {:?}", other),
        }
    }

    // verify_cmd_structure catches duplicate flags and bad references
    // that would otherwise only show up at runtime.
    #[test]
    fn verify_cmd_structure() {
        CliConfig::command().debug_assert();
    }

    #[test]
    fn parse_connect() {
        let cli = parse(&[
            "services",
            "vpc-peerings",
            "connect",
            "--network",
            "my-network",
            "--service",
            "your-service",
            "--reserved-ranges",
            RANGES,
        ])
        .expect("should parse connect");

        let args = connect_args(cli);
        assert_eq!(args.network, "my-network");
        assert_eq!(args.service, "your-service");
        assert_eq!(args.reserved_ranges, RANGES);
        assert!(!args.run_async);
    }

    #[test]
    fn parse_connect_async_with_global_project() {
        let cli = parse(&[
            "services",
            "vpc-peerings",
            "connect",
            "--network",
            "n",
            "--service",
            "s",
            "--reserved-ranges",
            "10.0.0.0/24",
            "--async",
            "--project",
            "other-project",
        ])
        .expect("should parse connect --async");

        assert_eq!(cli.project.as_deref(), Some("other-project"));
        assert!(connect_args(cli).run_async);
    }

    #[test]
    fn parse_connect_requires_each_flag() {
        let full = [
            ("--network", "n"),
            ("--service", "s"),
            ("--reserved-ranges", RANGES),
        ];

        for skipped in 0..full.len() {
            let mut argv = vec!["services", "vpc-peerings", "connect"];
            for (i, (flag, value)) in full.iter().enumerate() {
                if i != skipped {
                    argv.push(*flag);
                    argv.push(*value);
                }
            }

            let err = parse(&argv).expect_err("missing flag should fail");
            assert_eq!(
                err.kind(),
                clap::error::ErrorKind::MissingRequiredArgument,
                "omitting {} should be a missing-argument error",
                full[skipped].0
            );
        }
    }

    #[test]
    fn parse_operations_wait() {
        let cli = parse(&[
            "services",
            "vpc-peerings",
            "operations",
            "wait",
            "operations/pssn.p24-1",
        ])
        .expect("should parse operations wait");

        match cli.command {
            Commands::VpcPeerings(VpcPeeringsCmd::Operations(OperationsCmd::Wait(args))) => {
                assert_eq!(args.operation, "operations/pssn.p24-1");
            }
            other => panic!("expected Wait, got {:?}", other),
        }
    }

    #[test]
    fn parse_operations_wait_requires_name() {
        assert!(parse(&["services", "vpc-peerings", "operations", "wait"]).is_err());
    }

    #[test]
    fn parse_verbose_is_the_only_logging_flag() {
        let cli = parse(&[
            "services",
            "vpc-peerings",
            "operations",
            "wait",
            "op-1",
            "--verbose",
        ])
        .expect("--verbose is global");
        assert!(cli.verbose);

        let err = parse(&[
            "services",
            "vpc-peerings",
            "operations",
            "wait",
            "op-1",
            "--log-format",
            "json",
        ])
        .expect_err("log format is not configurable");
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
