pub mod connect;
pub mod poller;
pub mod printer;
pub mod wait;

pub use crate::domain::model::{ConnectRequest, Operation};
pub use crate::domain::ports::{Command, PeeringService, ProjectResolver};
pub use crate::utils::error::Result;
