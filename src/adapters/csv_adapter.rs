//! CSV financial data adapter.
//!
//! One file per metric. The header row is `stock,<period>,<period>,...`; each
//! following row holds one stock's figures. Blank, `-`, `NaN` and `N/A` cells
//! are missing values.

use crate::domain::error::ScreenerError;
use crate::domain::financial_data::{FinancialData, Metric, MetricTable};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::FinancialDataPort;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvAdapter {
    sales: PathBuf,
    operating_profit: PathBuf,
    net_income: PathBuf,
}

impl CsvAdapter {
    /// Read `sales.csv`, `operating_profit.csv` and `net_income.csv` from `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            sales: dir.join(file_name(Metric::Sales)),
            operating_profit: dir.join(file_name(Metric::OperatingProfit)),
            net_income: dir.join(file_name(Metric::NetIncome)),
        }
    }

    /// Paths from the `[data]` section: `dir` plus optional per-metric files.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, ScreenerError> {
        let dir = config.get_path("data", "dir");
        let resolve = |metric: Metric| -> Result<PathBuf, ScreenerError> {
            config
                .get_path("data", metric.key())
                .or_else(|| dir.as_ref().map(|d| d.join(file_name(metric))))
                .ok_or_else(|| ScreenerError::ConfigMissing {
                    section: "data".into(),
                    key: metric.key().into(),
                })
        };
        Ok(Self {
            sales: resolve(Metric::Sales)?,
            operating_profit: resolve(Metric::OperatingProfit)?,
            net_income: resolve(Metric::NetIncome)?,
        })
    }

    pub fn path(&self, metric: Metric) -> &Path {
        match metric {
            Metric::Sales => &self.sales,
            Metric::OperatingProfit => &self.operating_profit,
            Metric::NetIncome => &self.net_income,
        }
    }

    fn load_table(&self, metric: Metric) -> Result<MetricTable, ScreenerError> {
        let path = self.path(metric);
        let file = File::open(path).map_err(|e| ScreenerError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let table = read_metric_table(metric.key(), file).map_err(|e| match e {
            ScreenerError::DataSource { reason } => ScreenerError::DataSource {
                reason: format!("{}: {}", path.display(), reason),
            },
            other => other,
        })?;
        info!(
            metric = metric.key(),
            stocks = table.len(),
            periods = table.periods().len(),
            "loaded {}",
            path.display()
        );
        Ok(table)
    }
}

impl FinancialDataPort for CsvAdapter {
    fn load_financial_data(&self) -> Result<FinancialData, ScreenerError> {
        Ok(FinancialData::new(
            self.load_table(Metric::Sales)?,
            self.load_table(Metric::OperatingProfit)?,
            self.load_table(Metric::NetIncome)?,
        ))
    }
}

fn file_name(metric: Metric) -> String {
    format!("{}.csv", metric.key())
}

/// Parse one metric table from CSV text.
pub fn read_metric_table<R: std::io::Read>(
    name: &str,
    reader: R,
) -> Result<MetricTable, ScreenerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| ScreenerError::DataSource {
        reason: format!("CSV header error: {}", e),
    })?;
    if headers.is_empty() {
        return Err(ScreenerError::DataSource {
            reason: "missing header row".into(),
        });
    }
    let periods: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut rows = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| ScreenerError::DataSource {
            reason: format!("CSV parse error: {}", e),
        })?;

        let stock = record.get(0).unwrap_or_default();
        if stock.is_empty() {
            return Err(ScreenerError::DataSource {
                reason: format!("row {}: missing stock identifier", line + 2),
            });
        }

        let values = record
            .iter()
            .skip(1)
            .zip(&periods)
            .map(|(cell, period)| {
                parse_cell(cell).map_err(|_| ScreenerError::DataSource {
                    reason: format!("invalid value '{}' for {} in {}", cell, stock, period),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push((stock.to_string(), values));
    }

    MetricTable::new(name, periods, rows)
}

fn parse_cell(cell: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let cell = cell.trim();
    if cell.is_empty()
        || cell == "-"
        || cell.eq_ignore_ascii_case("nan")
        || cell.eq_ignore_ascii_case("n/a")
    {
        return Ok(None);
    }
    let value: f64 = cell.replace(',', "").parse()?;
    Ok(Some(value).filter(|v| !v.is_nan()))
}
