//! Screening orchestrator.
//!
//! A [`ScreeningService`] only exists once both the financial data and the
//! active criteria have been loaded. Construction fails outward if either
//! port fails; afterwards the snapshot is read-only and every run evaluates
//! the same inputs.

use crate::domain::criterion::Criteria;
use crate::domain::dispatch::Dispatcher;
use crate::domain::error::ScreenerError;
use crate::domain::financial_data::FinancialData;
use crate::domain::result::ResultRowSet;
use crate::ports::data_port::FinancialDataPort;
use crate::ports::screening_port::ScreeningUseCase;
use crate::ports::strategy_port::StrategyLoaderPort;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug)]
pub struct ScreeningService {
    data: FinancialData,
    criteria: Criteria,
    dispatcher: Dispatcher,
}

impl ScreeningService {
    pub fn new(
        data_port: &dyn FinancialDataPort,
        strategy_port: &dyn StrategyLoaderPort,
    ) -> Result<Self, ScreenerError> {
        Self::with_dispatcher(data_port, strategy_port, Dispatcher::standard())
    }

    pub fn with_dispatcher(
        data_port: &dyn FinancialDataPort,
        strategy_port: &dyn StrategyLoaderPort,
        dispatcher: Dispatcher,
    ) -> Result<Self, ScreenerError> {
        let data = data_port.load_financial_data()?;
        let criteria = strategy_port.load_active_criteria()?;
        info!(strategies = criteria.len(), "screening service ready");
        Ok(Self {
            data,
            criteria,
            dispatcher,
        })
    }

    pub fn financial_data(&self) -> &FinancialData {
        &self.data
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Evaluate a single loaded strategy by name.
    pub fn run_strategy(&self, name: &str) -> Option<ResultRowSet> {
        let criterion = self.criteria.get(name)?;
        Some(self.dispatcher.dispatch(name, criterion, &self.data))
    }
}

impl ScreeningUseCase for ScreeningService {
    fn run_all_active_strategies(&self) -> BTreeMap<String, ResultRowSet> {
        self.criteria
            .iter()
            .map(|(name, criterion)| {
                let set = self.dispatcher.dispatch(name, criterion, &self.data);
                (name.clone(), set)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::criterion::{Criterion, QoQGrowth};
    use crate::domain::financial_data::MetricTable;
    use std::cell::Cell;

    struct StaticData {
        calls: Cell<usize>,
        fail: bool,
    }

    impl FinancialDataPort for StaticData {
        fn load_financial_data(&self) -> Result<FinancialData, ScreenerError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(ScreenerError::DataSource {
                    reason: "file missing".into(),
                });
            }
            let table = |name: &str| {
                MetricTable::new(
                    name,
                    vec!["2023/1Q".into(), "2023/2Q".into()],
                    vec![
                        ("AAA".into(), vec![Some(100.0), Some(150.0)]),
                        ("BBB".into(), vec![Some(-50.0), Some(20.0)]),
                    ],
                )
            };
            Ok(FinancialData::new(
                table("sales")?,
                table("operating_profit")?,
                table("net_income")?,
            ))
        }
    }

    struct StaticStrategies {
        criteria: Criteria,
        calls: Cell<usize>,
    }

    impl StrategyLoaderPort for StaticStrategies {
        fn load_active_criteria(&self) -> Result<Criteria, ScreenerError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.criteria.clone())
        }
    }

    fn criterion(metric: &str, target: &str) -> Criterion {
        QoQGrowth {
            metric: metric.into(),
            base_period: "2023/1Q".into(),
            target_period: target.into(),
            min_growth_fraction: 0.3,
        }
        .into()
    }

    fn data_port() -> StaticData {
        StaticData {
            calls: Cell::new(0),
            fail: false,
        }
    }

    fn strategies() -> StaticStrategies {
        let mut criteria = Criteria::new();
        criteria.insert("good".into(), criterion("sales", "2023/2Q"));
        criteria.insert("missing_period".into(), criterion("sales", "2099/1Q"));
        StaticStrategies {
            criteria,
            calls: Cell::new(0),
        }
    }

    #[test]
    fn loads_each_port_once() {
        let data = data_port();
        let strats = strategies();
        let service = ScreeningService::new(&data, &strats).unwrap();
        service.run_all_active_strategies();
        service.run_all_active_strategies();
        assert_eq!(data.calls.get(), 1);
        assert_eq!(strats.calls.get(), 1);
        assert_eq!(service.criteria().len(), 2);
    }

    #[test]
    fn data_failure_is_fatal() {
        let data = StaticData {
            calls: Cell::new(0),
            fail: true,
        };
        let err = ScreeningService::new(&data, &strategies()).unwrap_err();
        assert!(matches!(err, ScreenerError::DataSource { .. }));
    }

    #[test]
    fn one_bad_strategy_does_not_abort_the_run() {
        let service = ScreeningService::new(&data_port(), &strategies()).unwrap();
        let results = service.run_all_active_strategies();
        assert_eq!(results.len(), 2);
        assert_eq!(results["good"].stock_names(), vec!["BBB", "AAA"]);
        assert!(results["missing_period"].is_empty());
        assert!(results["missing_period"].is_failed());
    }

    #[test]
    fn run_strategy_by_name() {
        let service = ScreeningService::new(&data_port(), &strategies()).unwrap();
        assert_eq!(service.run_strategy("good").unwrap().len(), 2);
        assert!(service.run_strategy("nope").is_none());
    }
}
