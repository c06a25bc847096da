//! Criterion evaluators.
//!
//! Each evaluator reads the shared [`FinancialData`] and produces one
//! [`ResultRowSet`]. Structural problems (unknown metric or period) are
//! returned as errors; per-stock edge cases are handled by the growth policy.

use crate::domain::criterion::{Criterion, CriterionKind};
use crate::domain::error::ScreenerError;
use crate::domain::financial_data::{FinancialData, MetricTable};
use crate::domain::growth::compute_growth_series;
use crate::domain::result::{ResultRowSet, build_results};

/// Signature shared by every evaluator in the dispatch table.
pub type Evaluator = fn(&Criterion, &FinancialData) -> Result<ResultRowSet, ScreenerError>;

pub fn evaluate_qoq_growth(
    criterion: &Criterion,
    data: &FinancialData,
) -> Result<ResultRowSet, ScreenerError> {
    let qoq = criterion
        .as_qoq_growth()
        .ok_or_else(|| ScreenerError::CriterionMismatch {
            expected: CriterionKind::QoQGrowth.to_string(),
            found: criterion.kind().to_string(),
        })?;

    let (metric, table) = data.resolve(&qoq.metric)?;
    let base = period_column(table, metric.key(), &qoq.base_period)?;
    let target = period_column(table, metric.key(), &qoq.target_period)?;

    let growth = compute_growth_series(&base, &target);

    Ok(build_results(
        table.stocks(),
        &base,
        &target,
        &growth,
        qoq.min_growth_fraction,
        metric.key(),
    ))
}

fn period_column(
    table: &MetricTable,
    metric: &str,
    period: &str,
) -> Result<Vec<Option<f64>>, ScreenerError> {
    table
        .column(period)
        .ok_or_else(|| ScreenerError::UnknownPeriod {
            metric: metric.to_string(),
            period: period.to_string(),
        })
}
