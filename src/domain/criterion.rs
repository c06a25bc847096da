//! Screening criteria.

use crate::domain::error::ScreenerError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Active criteria keyed by strategy name, iterated in name order.
pub type Criteria = BTreeMap<String, Criterion>;

/// Discriminant used to pick an evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionKind {
    QoQGrowth,
}

impl CriterionKind {
    pub fn tag(&self) -> &'static str {
        match self {
            CriterionKind::QoQGrowth => "QoQ_Growth",
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CriterionKind {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("QoQ_Growth") => Ok(CriterionKind::QoQGrowth),
            other => Err(ScreenerError::UnknownCriterionKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Compare one metric between two reporting periods.
#[derive(Debug, Clone, PartialEq)]
pub struct QoQGrowth {
    /// Metric name as configured; resolved against the bundle at evaluation.
    pub metric: String,
    pub base_period: String,
    pub target_period: String,
    /// Minimum growth as a fraction, 1.0 = +100%.
    pub min_growth_fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    QoQGrowth(QoQGrowth),
}

impl Criterion {
    pub fn kind(&self) -> CriterionKind {
        match self {
            Criterion::QoQGrowth(_) => CriterionKind::QoQGrowth,
        }
    }

    pub fn as_qoq_growth(&self) -> Option<&QoQGrowth> {
        match self {
            Criterion::QoQGrowth(c) => Some(c),
        }
    }

    pub fn metric(&self) -> &str {
        match self {
            Criterion::QoQGrowth(c) => &c.metric,
        }
    }
}

impl From<QoQGrowth> for Criterion {
    fn from(c: QoQGrowth) -> Self {
        Criterion::QoQGrowth(c)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::QoQGrowth(c) => write!(
                f,
                "{}({}: {} -> {}, min {:+.2}%)",
                self.kind(),
                c.metric,
                c.base_period,
                c.target_period,
                c.min_growth_fraction * 100.0
            ),
        }
    }
}
