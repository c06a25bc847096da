//! Strategy loading port.

use crate::domain::criterion::Criteria;
use crate::domain::error::ScreenerError;

pub trait StrategyLoaderPort {
    /// Load every active criterion keyed by strategy name.
    ///
    /// Entries that fail to parse are skipped by the implementation; an error
    /// means the strategy source as a whole is unavailable.
    fn load_active_criteria(&self) -> Result<Criteria, ScreenerError>;
}
