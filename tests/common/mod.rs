#![allow(dead_code)]

use quantscreen::domain::criterion::{Criteria, Criterion, QoQGrowth};
use quantscreen::domain::error::ScreenerError;
use quantscreen::domain::financial_data::{FinancialData, MetricTable};
use quantscreen::ports::data_port::FinancialDataPort;
use quantscreen::ports::strategy_port::StrategyLoaderPort;
use std::cell::Cell;

pub const BASE: &str = "2023/1Q";
pub const TARGET: &str = "2023/2Q";

pub struct MockDataPort {
    pub data: Option<FinancialData>,
    pub calls: Cell<usize>,
}

impl MockDataPort {
    pub fn new(data: FinancialData) -> Self {
        Self {
            data: Some(data),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            data: None,
            calls: Cell::new(0),
        }
    }
}

impl FinancialDataPort for MockDataPort {
    fn load_financial_data(&self) -> Result<FinancialData, ScreenerError> {
        self.calls.set(self.calls.get() + 1);
        self.data.clone().ok_or_else(|| ScreenerError::DataSource {
            reason: "data directory not found".into(),
        })
    }
}

pub struct MockStrategyLoader {
    pub criteria: Option<Criteria>,
    pub calls: Cell<usize>,
}

impl MockStrategyLoader {
    pub fn new() -> Self {
        Self {
            criteria: Some(Criteria::new()),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            criteria: None,
            calls: Cell::new(0),
        }
    }

    pub fn with(mut self, name: &str, criterion: Criterion) -> Self {
        self.criteria
            .get_or_insert_with(Criteria::new)
            .insert(name.to_string(), criterion);
        self
    }
}

impl StrategyLoaderPort for MockStrategyLoader {
    fn load_active_criteria(&self) -> Result<Criteria, ScreenerError> {
        self.calls.set(self.calls.get() + 1);
        self.criteria.clone().ok_or_else(|| ScreenerError::StrategySource {
            reason: "strategy directory missing".into(),
        })
    }
}

/// Two-period table from `(stock, base, target)` rows.
pub fn make_table(name: &str, rows: &[(&str, Option<f64>, Option<f64>)]) -> MetricTable {
    MetricTable::new(
        name,
        vec![BASE.to_string(), TARGET.to_string()],
        rows.iter()
            .map(|(stock, b, t)| (stock.to_string(), vec![*b, *t]))
            .collect(),
    )
    .unwrap()
}

/// The five reference scenarios laid out across the three metrics.
pub fn sample_data() -> FinancialData {
    FinancialData::new(
        make_table(
            "sales",
            &[
                ("GROWER", Some(100.0), Some(150.0)),
                ("DECLINER", Some(100.0), Some(90.0)),
                ("FLAT", Some(200.0), Some(200.0)),
                ("GAP", None, Some(50.0)),
            ],
        ),
        make_table(
            "operating_profit",
            &[
                ("TURNAROUND", Some(-50.0), Some(20.0)),
                ("ZERO", Some(0.0), Some(0.0)),
                ("DOUBLER", Some(10.0), Some(25.0)),
                ("STILL_LOSS", Some(-30.0), Some(-5.0)),
            ],
        ),
        make_table(
            "net_income",
            &[
                ("GROWER", Some(10.0), Some(13.0)),
                ("DECLINER", Some(10.0), Some(9.0)),
            ],
        ),
    )
}

pub fn qoq(metric: &str, base: &str, target: &str, min_growth: f64) -> Criterion {
    QoQGrowth {
        metric: metric.to_string(),
        base_period: base.to_string(),
        target_period: target.to_string(),
        min_growth_fraction: min_growth,
    }
    .into()
}
