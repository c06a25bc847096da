//! Screening engine: data model, growth policy, dispatch and ranking.

pub mod config_validation;
pub mod criterion;
pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod financial_data;
pub mod growth;
pub mod result;
pub mod screening;
