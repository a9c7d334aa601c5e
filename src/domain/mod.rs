// Domain layer: wire models and the ports the commands depend on.

pub mod model;
pub mod ports;
