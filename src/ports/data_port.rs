//! Financial data access port.

use crate::domain::error::ScreenerError;
use crate::domain::financial_data::FinancialData;

pub trait FinancialDataPort {
    /// Load the sales, operating profit and net income tables.
    fn load_financial_data(&self) -> Result<FinancialData, ScreenerError>;
}
