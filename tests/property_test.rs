//! Property tests for the growth policy and result ranking.
//!
//! Uses proptest to verify:
//! 1. Growth policy: ratio for positive base, infinite for turnaround,
//!    undefined otherwise
//! 2. Monotonicity: raising the threshold never grows the passing set
//! 3. Ordering: rows are sorted descending, all meet the threshold, none are
//!    undefined

mod common;

use common::*;
use proptest::prelude::*;
use quantscreen::domain::evaluator::evaluate_qoq_growth;
use quantscreen::domain::financial_data::FinancialData;
use quantscreen::domain::growth::{Growth, compute_growth};
use std::collections::HashSet;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_figure() -> impl Strategy<Value = f64> {
    (-1_000_000.0..1_000_000.0_f64).prop_map(|v| (v * 100.0).round() / 100.0)
}

fn arb_cell() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(0.0)),
        6 => arb_figure().prop_map(Some),
    ]
}

fn arb_rows() -> impl Strategy<Value = Vec<(Option<f64>, Option<f64>)>> {
    prop::collection::vec((arb_cell(), arb_cell()), 0..40)
}

fn bundle(rows: &[(Option<f64>, Option<f64>)]) -> FinancialData {
    let names: Vec<String> = (0..rows.len()).map(|i| format!("S{i:03}")).collect();
    let table_rows: Vec<(&str, Option<f64>, Option<f64>)> = names
        .iter()
        .zip(rows)
        .map(|(n, (b, t))| (n.as_str(), *b, *t))
        .collect();
    FinancialData::new(
        make_table("sales", &table_rows),
        make_table("operating_profit", &[]),
        make_table("net_income", &[]),
    )
}

// ── 1. Growth policy ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn positive_base_is_plain_ratio(base in 0.01..1e6_f64, target in arb_figure()) {
        prop_assert_eq!(compute_growth(Some(base), Some(target)), Growth::Finite(target / base - 1.0));
    }

    #[test]
    fn turnaround_is_infinite(base in -1e6..=0.0_f64, target in 0.01..1e6_f64) {
        prop_assert_eq!(compute_growth(Some(base), Some(target)), Growth::Infinite);
    }

    #[test]
    fn non_positive_pair_is_undefined(base in -1e6..=0.0_f64, target in -1e6..=0.0_f64) {
        prop_assert_eq!(compute_growth(Some(base), Some(target)), Growth::Undefined);
    }

    #[test]
    fn missing_input_is_undefined(value in proptest::option::of(arb_figure()), missing_base in any::<bool>()) {
        let growth = if missing_base {
            compute_growth(None, value)
        } else {
            compute_growth(value, None)
        };
        prop_assert_eq!(growth, Growth::Undefined);
    }

    #[test]
    fn undefined_never_passes(threshold in -1e9..1e9_f64) {
        prop_assert!(!Growth::Undefined.meets(threshold));
        prop_assert!(Growth::Infinite.meets(threshold));
    }
}

// ── 2. Monotonicity ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn raising_threshold_never_adds_stocks(
        rows in arb_rows(),
        low in -2.0..2.0_f64,
        bump in 0.0..3.0_f64,
    ) {
        let data = bundle(&rows);
        let loose = evaluate_qoq_growth(&qoq("sales", BASE, TARGET, low), &data).unwrap();
        let strict = evaluate_qoq_growth(&qoq("sales", BASE, TARGET, low + bump), &data).unwrap();

        let loose_set: HashSet<_> = loose.stock_names().into_iter().collect();
        for stock in strict.stock_names() {
            prop_assert!(loose_set.contains(stock));
        }
        prop_assert!(strict.len() <= loose.len());
    }
}

// ── 3. Ordering ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rows_sorted_descending_and_above_threshold(
        rows in arb_rows(),
        threshold in -2.0..2.0_f64,
    ) {
        let data = bundle(&rows);
        let set = evaluate_qoq_growth(&qoq("sales", BASE, TARGET, threshold), &data).unwrap();

        for pair in set.rows.windows(2) {
            prop_assert!(pair[0].growth_pct.rank_cmp(&pair[1].growth_pct).is_ge());
        }
        for row in &set.rows {
            prop_assert!(row.growth_pct.is_defined());
            let raw = compute_growth(Some(row.base), Some(row.target));
            prop_assert!(raw.meets(threshold));
        }
    }

    #[test]
    fn every_passing_stock_is_reported(
        rows in arb_rows(),
        threshold in -2.0..2.0_f64,
    ) {
        let data = bundle(&rows);
        let set = evaluate_qoq_growth(&qoq("sales", BASE, TARGET, threshold), &data).unwrap();
        let expected = rows
            .iter()
            .filter(|(b, t)| compute_growth(*b, *t).meets(threshold))
            .count();
        prop_assert_eq!(set.len(), expected);
    }
}
