pub mod cli;
pub mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "services")]
#[command(about = "Manage service producer connectivity for a project")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "PROJECT",
        help = "Project to use for this invocation; overrides CLOUDSDK_CORE_PROJECT and the settings file"
    )]
    pub project: Option<String>,

    #[arg(long, global = true, value_name = "PATH", help = "TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "vpc-peerings", subcommand, about = "Manage VPC peerings to services")]
    VpcPeerings(cli::VpcPeeringsCmd),
}
