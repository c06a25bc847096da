//! quantscreen: quarterly fundamentals stock screener.
//!
//! Hexagonal architecture: the screening engine lives in [`domain`], port
//! traits in [`ports`], file-backed implementations in [`adapters`], and the
//! command line in [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
