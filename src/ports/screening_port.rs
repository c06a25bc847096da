//! Inbound use-case port driven by the CLI.

use crate::domain::result::ResultRowSet;
use std::collections::BTreeMap;

pub trait ScreeningUseCase {
    /// Evaluate every active strategy against the loaded data.
    fn run_all_active_strategies(&self) -> BTreeMap<String, ResultRowSet>;
}
