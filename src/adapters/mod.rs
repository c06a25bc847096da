//! File-backed implementations of the ports.

pub mod csv_adapter;
pub mod csv_result_writer;
pub mod file_config_adapter;
pub mod ini_strategy_loader;
