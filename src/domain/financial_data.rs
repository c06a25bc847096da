//! Quarterly financial statement tables.
//!
//! A [`MetricTable`] holds one financial figure per (stock, reporting period).
//! Rows are stocks, columns are period labels such as `2023/1Q`. Columns are
//! always looked up by label; two tables in the same bundle may cover
//! different stocks.

use crate::domain::error::ScreenerError;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The three statement lines a [`FinancialData`] bundle carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Sales,
    OperatingProfit,
    NetIncome,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Sales, Metric::OperatingProfit, Metric::NetIncome];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Sales => "sales",
            Metric::OperatingProfit => "operating_profit",
            Metric::NetIncome => "net_income",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ScreenerError::UnknownMetric {
                metric: trimmed.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    name: String,
    periods: Vec<String>,
    stocks: Vec<String>,
    rows: Vec<Vec<Option<f64>>>,
}

impl MetricTable {
    /// Build a table from period labels and `(stock, values)` rows.
    ///
    /// Every row must have one cell per period. NaN cells are stored as
    /// missing. Duplicate stocks or period labels are rejected.
    pub fn new(
        name: impl Into<String>,
        periods: Vec<String>,
        rows: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self, ScreenerError> {
        let name = name.into();

        let mut seen_periods = HashSet::new();
        for period in &periods {
            if !seen_periods.insert(period.as_str()) {
                return Err(ScreenerError::DataSource {
                    reason: format!("{name}: duplicate period column '{period}'"),
                });
            }
        }

        let mut seen_stocks = HashSet::new();
        let mut stocks = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());
        for (stock, cells) in rows {
            if cells.len() != periods.len() {
                return Err(ScreenerError::DataSource {
                    reason: format!(
                        "{name}: row '{stock}' has {} values, expected {}",
                        cells.len(),
                        periods.len()
                    ),
                });
            }
            if !seen_stocks.insert(stock.clone()) {
                return Err(ScreenerError::DataSource {
                    reason: format!("{name}: duplicate stock '{stock}'"),
                });
            }
            stocks.push(stock);
            values.push(cells.into_iter().map(|c| c.filter(|v| !v.is_nan())).collect());
        }

        Ok(Self {
            name,
            periods,
            stocks,
            rows: values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn stocks(&self) -> &[String] {
        &self.stocks
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn has_period(&self, period: &str) -> bool {
        self.period_index(period).is_some()
    }

    /// Values of one period, aligned with [`MetricTable::stocks`].
    pub fn column(&self, period: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.period_index(period)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    pub fn value(&self, stock: &str, period: &str) -> Option<f64> {
        let col = self.period_index(period)?;
        let row = self.stocks.iter().position(|s| s == stock)?;
        self.rows[row][col]
    }

    fn period_index(&self, period: &str) -> Option<usize> {
        self.periods.iter().position(|p| p == period)
    }
}

/// Immutable bundle of the three statement tables.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialData {
    pub sales: MetricTable,
    pub operating_profit: MetricTable,
    pub net_income: MetricTable,
}

impl FinancialData {
    pub fn new(sales: MetricTable, operating_profit: MetricTable, net_income: MetricTable) -> Self {
        Self {
            sales,
            operating_profit,
            net_income,
        }
    }

    pub fn table(&self, metric: Metric) -> &MetricTable {
        match metric {
            Metric::Sales => &self.sales,
            Metric::OperatingProfit => &self.operating_profit,
            Metric::NetIncome => &self.net_income,
        }
    }

    /// Resolve a configured metric name to its table.
    pub fn resolve(&self, metric: &str) -> Result<(Metric, &MetricTable), ScreenerError> {
        let metric: Metric = metric.parse()?;
        Ok((metric, self.table(metric)))
    }
}
