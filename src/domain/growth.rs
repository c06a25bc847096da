//! Sign-aware period-over-period growth.
//!
//! A ratio over a non-positive base has no arithmetic meaning, but a swing
//! from loss to profit is the strongest growth signal there is. It is kept as
//! [`Growth::Infinite`], which sits above every finite value. Anything else
//! that cannot be computed is [`Growth::Undefined`] and never passes a
//! threshold.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Growth {
    Finite(f64),
    Infinite,
    Undefined,
}

impl Growth {
    pub fn is_defined(&self) -> bool {
        !matches!(self, Growth::Undefined)
    }

    /// Whether this growth satisfies a minimum growth fraction.
    pub fn meets(&self, threshold: f64) -> bool {
        match *self {
            Growth::Finite(g) => g >= threshold,
            Growth::Infinite => !threshold.is_nan(),
            Growth::Undefined => false,
        }
    }

    /// Growth as a percentage rounded to two decimals (half to even).
    ///
    /// A percentage beyond the `f64` range saturates as in [`compute_growth`].
    pub fn as_percent(&self) -> Growth {
        match *self {
            Growth::Finite(g) => match ratio_growth(g * 100.0) {
                Growth::Finite(pct) => Growth::Finite(round2(pct)),
                other => other,
            },
            other => other,
        }
    }

    /// Total order used for ranking: undefined < finite < infinite.
    pub fn rank_cmp(&self, other: &Growth) -> Ordering {
        fn bucket(g: &Growth) -> u8 {
            match g {
                Growth::Undefined => 0,
                Growth::Finite(_) => 1,
                Growth::Infinite => 2,
            }
        }
        match (self, other) {
            (Growth::Finite(a), Growth::Finite(b)) => a.total_cmp(b),
            _ => bucket(self).cmp(&bucket(other)),
        }
    }
}

impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Growth::Finite(g) => write!(f, "{:.2}", g),
            Growth::Infinite => f.write_str("inf"),
            Growth::Undefined => f.write_str("n/a"),
        }
    }
}

/// Values of 1e15 and above carry no fractional digits in an `f64`; scaling
/// them by 100 could overflow, so they are returned unchanged.
fn round2(value: f64) -> f64 {
    if value.abs() >= 1e15 {
        return value;
    }
    (value * 100.0).round_ties_even() / 100.0
}

/// Growth from `base` to `target`.
///
/// - `base > 0`: `target / base - 1`
/// - `base <= 0` and `target > 0`: infinite
/// - otherwise, including any missing or NaN input: undefined
///
/// A ratio too large for an `f64` is treated as infinite when positive and
/// undefined otherwise, so [`Growth::Finite`] always holds a finite value.
pub fn compute_growth(base: Option<f64>, target: Option<f64>) -> Growth {
    let base = base.filter(|v| !v.is_nan());
    let target = target.filter(|v| !v.is_nan());
    match (base, target) {
        (Some(b), Some(t)) if b > 0.0 => ratio_growth(t / b - 1.0),
        (Some(b), Some(t)) if b <= 0.0 && t > 0.0 => Growth::Infinite,
        _ => Growth::Undefined,
    }
}

fn ratio_growth(g: f64) -> Growth {
    if g.is_finite() {
        Growth::Finite(g)
    } else if g == f64::INFINITY {
        Growth::Infinite
    } else {
        Growth::Undefined
    }
}

/// Element-wise [`compute_growth`] over two series aligned by stock.
///
/// A shorter series is padded with missing values.
pub fn compute_growth_series(base: &[Option<f64>], target: &[Option<f64>]) -> Vec<Growth> {
    let len = base.len().max(target.len());
    (0..len)
        .map(|i| {
            compute_growth(
                base.get(i).copied().flatten(),
                target.get(i).copied().flatten(),
            )
        })
        .collect()
}
