// src/aggregate/demand.rs

//! Demand Aggregator: transaction-level sales to per-SKU weekly statistics.

use crate::io::records::{parse_date, SalesRecord};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Weekly demand statistics for one SKU.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DemandStats {
    /// Mean quantity per observed ISO week.
    pub mean: f64,
    /// Sample standard deviation across observed weeks (0 with fewer than two weeks).
    pub std_dev: f64,
    pub weeks_observed: usize,
    pub total_quantity: f64,
}

impl DemandStats {
    /// Computes mean and sample standard deviation over weekly totals.
    pub fn from_weekly_totals(weekly: &[f64]) -> Self {
        let n = weekly.len();
        if n == 0 {
            return Self::default();
        }

        let total: f64 = weekly.iter().sum();
        let mean = total / n as f64;
        let std_dev = if n > 1 {
            let ss: f64 = weekly.iter().map(|q| (q - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Self {
            mean,
            std_dev,
            weeks_observed: n,
            total_quantity: total,
        }
    }

    /// Coefficient of variation (std / mean); `None` when the mean is zero.
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        if self.mean > 0.0 {
            Some(self.std_dev / self.mean)
        } else {
            None
        }
    }
}

/// One row of the demand-variability report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandVariability {
    pub sku: String,
    pub weeks_observed: usize,
    pub total_quantity: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: Option<f64>,
}

/// Flattens per-SKU statistics into report rows, in SKU order.
pub fn demand_variability(stats: &BTreeMap<String, DemandStats>) -> Vec<DemandVariability> {
    stats
        .iter()
        .map(|(sku, s)| DemandVariability {
            sku: sku.clone(),
            weeks_observed: s.weeks_observed,
            total_quantity: s.total_quantity,
            mean: s.mean,
            std_dev: s.std_dev,
            coefficient_of_variation: s.coefficient_of_variation(),
        })
        .collect()
}

/// Buckets sales by (SKU, ISO week), sums each bucket and reduces the buckets
/// of each SKU to [`DemandStats`].
///
/// Input order does not matter. Rows with an unparsable date are dropped with
/// a warning; a SKU whose rows were all dropped still gets a zeroed entry so
/// that every SKU seen in the input is present in the output.
pub fn aggregate_weekly_demand(sales: &[SalesRecord]) -> BTreeMap<String, DemandStats> {
    // sku -> (iso_year, iso_week) -> quantity
    let mut buckets: BTreeMap<&str, BTreeMap<(i32, u32), f64>> = BTreeMap::new();
    let mut dropped = 0usize;

    for record in sales {
        let weeks = buckets.entry(record.sku.as_str()).or_default();
        match parse_date(&record.date) {
            Some(date) => {
                let week = date.iso_week();
                *weeks.entry((week.year(), week.week())).or_insert(0.0) += finite_or_zero(record.quantity);
            }
            None => {
                dropped += 1;
                log::warn!(
                    "dropping sale for SKU {}: unparsable date {:?}",
                    record.sku,
                    record.date
                );
            }
        }
    }

    if dropped > 0 {
        log::warn!("demand aggregation dropped {dropped} of {} sales rows", sales.len());
    }

    buckets
        .into_iter()
        .map(|(sku, weeks)| {
            let totals: Vec<f64> = weeks.into_values().collect();
            (sku.to_string(), DemandStats::from_weekly_totals(&totals))
        })
        .collect()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_by_iso_week_regardless_of_order() {
        // 2024-01-01 is a Monday (ISO week 1); 2024-01-08 starts week 2.
        let sales = vec![
            SalesRecord::new("A", "2024-01-09", 4.0),
            SalesRecord::new("A", "2024-01-01", 3.0),
            SalesRecord::new("A", "2024-01-07", 7.0),
            SalesRecord::new("A", "2024-01-14", 2.0),
        ];

        let stats = aggregate_weekly_demand(&sales);
        let a = stats["A"];

        // week 1 = 10, week 2 = 6
        assert_eq!(a.weeks_observed, 2);
        assert!((a.mean - 8.0).abs() < 1e-12);
        assert!((a.std_dev - 8.0_f64.sqrt()).abs() < 1e-12);
        assert!((a.total_quantity - 16.0).abs() < 1e-12);
    }

    #[test]
    fn single_week_has_zero_std() {
        let sales = vec![
            SalesRecord::new("B", "2024-05-06", 5.0),
            SalesRecord::new("B", "2024-05-07", 5.0),
        ];

        let b = aggregate_weekly_demand(&sales)["B"];
        assert_eq!(b.weeks_observed, 1);
        assert_eq!(b.mean, 10.0);
        assert_eq!(b.std_dev, 0.0);
    }

    #[test]
    fn bad_dates_are_dropped_but_sku_is_kept() {
        let sales = vec![
            SalesRecord::new("C", "garbage", 9.0),
            SalesRecord::new("D", "2024-02-01", 3.0),
            SalesRecord::new("D", "31st of never", 100.0),
        ];

        let stats = aggregate_weekly_demand(&sales);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["C"], DemandStats::default());
        assert_eq!(stats["D"].mean, 3.0);
    }

    #[test]
    fn weeks_in_different_years_stay_separate() {
        // 2023-01-02 and 2024-01-01 are both ISO week 1.
        let sales = vec![
            SalesRecord::new("E", "2023-01-02", 1.0),
            SalesRecord::new("E", "2024-01-01", 3.0),
        ];
        assert_eq!(aggregate_weekly_demand(&sales)["E"].weeks_observed, 2);
    }

    #[test]
    fn coefficient_of_variation_guards_zero_mean() {
        assert_eq!(DemandStats::default().coefficient_of_variation(), None);
        let s = DemandStats::from_weekly_totals(&[10.0, 20.0]);
        let cv = s.coefficient_of_variation().unwrap();
        assert!((cv - s.std_dev / 15.0).abs() < 1e-12);
    }

    #[test]
    fn variability_rows_carry_cv() {
        let sales = vec![
            SalesRecord::new("A", "2024-01-01", 10.0),
            SalesRecord::new("A", "2024-01-08", 6.0),
            SalesRecord::new("Z", "2024-01-01", 0.0),
        ];
        let rows = demand_variability(&aggregate_weekly_demand(&sales));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sku, "A");
        let cv = rows[0].coefficient_of_variation.unwrap();
        assert!((cv - 8.0_f64.sqrt() / 8.0).abs() < 1e-12);
        assert_eq!(rows[1].coefficient_of_variation, None);
    }
}
