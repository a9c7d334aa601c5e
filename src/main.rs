use clap::Parser;
use services_peering::config::cli::{OperationsCmd, VpcPeeringsCmd};
use services_peering::config::Commands;
use services_peering::core::printer::print_operation;
use services_peering::core::Command;
use services_peering::utils::logger;
use services_peering::utils::validation::Validate;
use services_peering::{
    CliConfig, ConnectCommand, ResourceManagerClient, Result, ServiceNetworkingClient, Settings,
    WaitCommand,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("ERROR: {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.severity().exit_code());
    }
}

async fn run(config: CliConfig) -> Result<()> {
    let settings = Settings::load(config.config.as_deref(), config.project)?;
    settings.validate()?;

    // status output shares stderr with logging; stdout stays empty
    let mut status = std::io::stderr();

    match config.command {
        Commands::VpcPeerings(VpcPeeringsCmd::Connect(args)) => {
            let resolver = ResourceManagerClient::new(&settings)?;
            let peering = ServiceNetworkingClient::new(&settings)?;
            let command = ConnectCommand::new(settings, resolver, peering);

            let outcome = command.execute(args).await?;
            outcome.render(&mut status)
        }
        Commands::VpcPeerings(VpcPeeringsCmd::Operations(OperationsCmd::Wait(args))) => {
            let peering = ServiceNetworkingClient::new(&settings)?;
            let command = WaitCommand::new(peering, settings.poll_policy());

            let operation = command.execute(args).await?;
            print_operation(&mut status, &operation)
        }
    }
}
