//! Result persistence port.

use crate::domain::error::ScreenerError;
use crate::domain::result::ResultRowSet;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub trait ResultSinkPort {
    /// Persist one result set per strategy, returning the paths written.
    fn save_results(
        &self,
        results: &BTreeMap<String, ResultRowSet>,
    ) -> Result<Vec<PathBuf>, ScreenerError>;
}
