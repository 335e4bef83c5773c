// src/strategy/abc.rs

//! ABC tiering of SKUs.
//!
//! Both methods break ties by original input position, so the same input
//! always yields the same partition.

use crate::model::sku::AbcCategory;
use std::cmp::Ordering;

/// Equal-count terciles of annual demand.
///
/// SKUs are ranked ascending by demand (ties: earlier input first), giving
/// ranks 1..=n. The tercile edges sit at `1 + (n - 1) * k / 3` for k = 1, 2;
/// a rank at or below the first edge is C, at or below the second is B, the
/// rest are A. Every group therefore has `floor(n/3)` or `ceil(n/3)` members
/// and every A demand is at least every C demand.
pub fn classify_by_demand_tercile(annual_demands: &[f64]) -> Vec<AbcCategory> {
    let n = annual_demands.len();
    let order = stable_rank(annual_demands, |a, b| a.total_cmp(b));

    let mut categories = vec![AbcCategory::C; n];
    for (position, &index) in order.iter().enumerate() {
        // rank r = position + 1; r <= 1 + (n-1)k/3  <=>  3 * position <= (n-1) * k
        let scaled = 3 * position;
        categories[index] = if scaled <= n.saturating_sub(1) {
            AbcCategory::C
        } else if scaled <= 2 * n.saturating_sub(1) {
            AbcCategory::B
        } else {
            AbcCategory::A
        };
    }
    categories
}

/// Pareto split on cumulative share of annual sales value.
///
/// SKUs are ranked descending by value (ties: earlier input first). A SKU is
/// A while the cumulative share including it is at most `a_threshold_pct`,
/// B while at most `b_threshold_pct`, otherwise C. With zero total value
/// every SKU is C.
pub fn classify_by_value_share(
    annual_values: &[f64],
    a_threshold_pct: f64,
    b_threshold_pct: f64,
) -> Vec<AbcCategory> {
    let n = annual_values.len();
    let values: Vec<f64> = annual_values
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect();
    let total: f64 = values.iter().sum();

    let mut categories = vec![AbcCategory::C; n];
    if total <= 0.0 {
        return categories;
    }

    let order = stable_rank(&values, |a, b| b.total_cmp(a));
    let mut cumulative = 0.0;
    for index in order {
        cumulative += values[index];
        let share = cumulative * 100.0 / total;
        categories[index] = if share <= a_threshold_pct {
            AbcCategory::A
        } else if share <= b_threshold_pct {
            AbcCategory::B
        } else {
            AbcCategory::C
        };
    }
    categories
}

/// Indices of `values` sorted by `cmp`, keeping input order among equals.
fn stable_rank<F>(values: &[f64], cmp: F) -> Vec<usize>
where
    F: Fn(&f64, &f64) -> Ordering,
{
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| cmp(&values[a], &values[b]));
    order
}
