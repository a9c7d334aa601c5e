pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{ResourceManagerClient, ServiceNetworkingClient};
pub use config::{CliConfig, Settings};
pub use core::connect::{ConnectCommand, ConnectOutcome};
pub use core::wait::WaitCommand;
pub use utils::error::{PeeringError, Result};
