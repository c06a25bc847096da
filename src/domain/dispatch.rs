//! Criterion dispatch and per-criterion failure isolation.
//!
//! The [`Dispatcher`] owns a fixed table from [`CriterionKind`] to
//! [`Evaluator`]. It is built once and never mutated. [`Dispatcher::dispatch`]
//! never fails: an unregistered kind or an evaluator error is logged under the
//! criterion's name and replaced with an empty, failed [`ResultRowSet`], so one
//! broken strategy cannot stop the rest of a run.

use crate::domain::criterion::{Criterion, CriterionKind};
use crate::domain::error::ScreenerError;
use crate::domain::evaluator::{Evaluator, evaluate_qoq_growth};
use crate::domain::financial_data::FinancialData;
use crate::domain::result::ResultRowSet;
use std::collections::HashMap;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    evaluators: HashMap<CriterionKind, Evaluator>,
}

impl Dispatcher {
    /// A table with no evaluators.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A table with every built-in evaluator registered.
    pub fn standard() -> Self {
        Self::empty().register(CriterionKind::QoQGrowth, evaluate_qoq_growth)
    }

    pub fn register(mut self, kind: CriterionKind, evaluator: Evaluator) -> Self {
        self.evaluators.insert(kind, evaluator);
        self
    }

    pub fn supports(&self, kind: CriterionKind) -> bool {
        self.evaluators.contains_key(&kind)
    }

    /// Run the evaluator for `criterion`, propagating any failure.
    pub fn try_dispatch(
        &self,
        criterion: &Criterion,
        data: &FinancialData,
    ) -> Result<ResultRowSet, ScreenerError> {
        let kind = criterion.kind();
        let evaluator = self
            .evaluators
            .get(&kind)
            .ok_or_else(|| ScreenerError::UnsupportedKind {
                kind: kind.to_string(),
            })?;
        evaluator(criterion, data)
    }

    /// Run the evaluator for `criterion`, degrading any failure to an empty
    /// result that records the reason.
    pub fn dispatch(&self, name: &str, criterion: &Criterion, data: &FinancialData) -> ResultRowSet {
        match self.try_dispatch(criterion, data) {
            Ok(set) => {
                debug!(strategy = name, passed = set.len(), "criterion evaluated");
                set
            }
            Err(e @ ScreenerError::UnsupportedKind { .. }) => {
                warn!(strategy = name, kind = %criterion.kind(), "unsupported criteria type, skipping");
                ResultRowSet::failed(criterion.metric(), e.to_string())
            }
            Err(e) => {
                error!(strategy = name, error = %e, "criterion evaluation failed");
                ResultRowSet::failed(criterion.metric(), e.to_string())
            }
        }
    }
}
