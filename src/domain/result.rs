//! Threshold filtering and ranking of per-criterion results.

use crate::domain::growth::Growth;

pub const GROWTH_COLUMN: &str = "Growth_Rate(%)";

/// One passing stock with the figures that justify it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub stock: String,
    pub base: f64,
    pub target: f64,
    /// Growth in percent, rounded to two decimals.
    pub growth_pct: Growth,
}

/// Passing stocks for one criterion, best growth first.
///
/// A criterion that could not be evaluated yields an empty set whose
/// `failure` explains why.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultRowSet {
    pub metric: String,
    pub rows: Vec<ResultRow>,
    pub failure: Option<String>,
}

impl ResultRowSet {
    pub fn failed(metric: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            rows: Vec::new(),
            failure: Some(reason.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Passing stock identifiers in rank order.
    pub fn stock_names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.stock.as_str()).collect()
    }

    pub fn headers(&self) -> [String; 4] {
        [
            "stock".to_string(),
            format!("{}(Base)", self.metric),
            format!("{}(Target)", self.metric),
            GROWTH_COLUMN.to_string(),
        ]
    }
}

/// Keep stocks whose growth meets `threshold` and rank them.
///
/// All slices are aligned by index with `stocks`. Rows are sorted by growth
/// percentage, highest first; ties keep their original stock order.
pub fn build_results(
    stocks: &[String],
    base: &[Option<f64>],
    target: &[Option<f64>],
    growth: &[Growth],
    threshold: f64,
    metric_label: &str,
) -> ResultRowSet {
    let mut rows: Vec<ResultRow> = stocks
        .iter()
        .enumerate()
        .filter_map(|(i, stock)| {
            let g = *growth.get(i)?;
            if !g.meets(threshold) {
                return None;
            }
            Some(ResultRow {
                stock: stock.clone(),
                base: base.get(i).copied().flatten()?,
                target: target.get(i).copied().flatten()?,
                growth_pct: g.as_percent(),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.growth_pct.rank_cmp(&a.growth_pct));

    ResultRowSet {
        metric: metric_label.to_string(),
        rows,
        failure: None,
    }
}
