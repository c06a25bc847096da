//! Port traits between the screening core and the outside world.

pub mod config_port;
pub mod data_port;
pub mod result_port;
pub mod screening_port;
pub mod strategy_port;
