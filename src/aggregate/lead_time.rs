// src/aggregate/lead_time.rs

//! Lead-Time Estimator: purchase orders and supplier master to per-supplier lead time.
//!
//! Resolution order for every supplier:
//! 1. mean of (delivery - order) days over valid delivered purchase orders,
//! 2. the supplier master's promised average,
//! 3. the global default.
//!
//! A candidate that is not strictly positive falls through to the next step.

use crate::io::records::{parse_date, PurchaseOrderRecord, SupplierRecord};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_LEAD_TIME_DAYS: f64 = 14.0;

/// Where an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LeadTimeSource {
    PurchaseOrders,
    SupplierMaster,
    GlobalDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadTimeEstimate {
    pub supplier_id: String,
    pub avg_lead_time_days: f64,
    pub source: LeadTimeSource,
    /// Number of purchase orders that contributed to the mean.
    pub orders_used: usize,
}

/// Actual versus promised lead time for one supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierPerformance {
    pub supplier_id: String,
    pub orders_observed: usize,
    pub avg_actual_days: Option<f64>,
    pub std_actual_days: Option<f64>,
    pub promised_days: Option<f64>,
    /// `avg_actual_days - promised_days` when both are known.
    pub difference_days: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct LeadTimeEstimator {
    default_days: f64,
}

impl Default for LeadTimeEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_LEAD_TIME_DAYS)
    }
}

impl LeadTimeEstimator {
    /// `default_days` must be positive; anything else falls back to 14 days.
    pub fn new(default_days: f64) -> Self {
        let default_days = if default_days.is_finite() && default_days > 0.0 {
            default_days
        } else {
            DEFAULT_LEAD_TIME_DAYS
        };
        Self { default_days }
    }

    pub fn default_days(&self) -> f64 {
        self.default_days
    }

    /// Estimates lead time for every supplier that appears in either source.
    pub fn estimate(
        &self,
        orders: &[PurchaseOrderRecord],
        suppliers: &[SupplierRecord],
    ) -> BTreeMap<String, LeadTimeEstimate> {
        let observed = observed_lead_times(orders);
        let promised = promised_lead_times(suppliers);

        supplier_ids(&observed, &promised)
            .into_iter()
            .map(|id| {
                let samples = observed.get(id).map(Vec::as_slice).unwrap_or(&[]);
                let master = promised.get(id).copied().flatten();
                (id.to_string(), self.resolve(id, samples, master))
            })
            .collect()
    }

    /// Lead time for a supplier the estimate map does not cover.
    pub fn fallback(&self, supplier_id: &str) -> LeadTimeEstimate {
        LeadTimeEstimate {
            supplier_id: supplier_id.to_string(),
            avg_lead_time_days: self.default_days,
            source: LeadTimeSource::GlobalDefault,
            orders_used: 0,
        }
    }

    fn resolve(&self, supplier_id: &str, samples: &[f64], master: Option<f64>) -> LeadTimeEstimate {
        if !samples.is_empty() {
            let mean = samples.iter().sum::<f64>() / samples.len() as f64;
            if mean > 0.0 {
                return LeadTimeEstimate {
                    supplier_id: supplier_id.to_string(),
                    avg_lead_time_days: mean,
                    source: LeadTimeSource::PurchaseOrders,
                    orders_used: samples.len(),
                };
            }
            log::debug!("supplier {supplier_id}: observed mean lead time {mean} is not positive");
        }

        if let Some(days) = master.filter(|d| d.is_finite() && *d > 0.0) {
            return LeadTimeEstimate {
                supplier_id: supplier_id.to_string(),
                avg_lead_time_days: days,
                source: LeadTimeSource::SupplierMaster,
                orders_used: 0,
            };
        }

        log::debug!(
            "supplier {supplier_id}: no usable lead time, using default {} days",
            self.default_days
        );
        self.fallback(supplier_id)
    }
}

/// Per-supplier comparison of actual and promised lead times.
pub fn supplier_performance(
    orders: &[PurchaseOrderRecord],
    suppliers: &[SupplierRecord],
) -> Vec<SupplierPerformance> {
    let observed = observed_lead_times(orders);
    let promised = promised_lead_times(suppliers);

    supplier_ids(&observed, &promised)
        .into_iter()
        .map(|id| {
            let samples = observed.get(id).map(Vec::as_slice).unwrap_or(&[]);
            let n = samples.len();
            let avg = (n > 0).then(|| samples.iter().sum::<f64>() / n as f64);
            let std = avg.filter(|_| n > 1).map(|mean| {
                let ss: f64 = samples.iter().map(|d| (d - mean).powi(2)).sum();
                (ss / (n - 1) as f64).sqrt()
            });
            let promised_days = promised.get(id).copied().flatten();

            SupplierPerformance {
                supplier_id: id.to_string(),
                orders_observed: n,
                avg_actual_days: avg,
                std_actual_days: std,
                promised_days,
                difference_days: avg.zip(promised_days).map(|(a, p)| a - p),
            }
        })
        .collect()
}

/// Collects valid day differences per supplier.
///
/// Orders missing either date are skipped silently (still open). Orders with an
/// unparsable date or a delivery before the order are data errors: logged and
/// excluded, never clamped.
fn observed_lead_times(orders: &[PurchaseOrderRecord]) -> BTreeMap<&str, Vec<f64>> {
    let mut observed: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    for order in orders {
        let entry = observed.entry(order.supplier_id.as_str()).or_default();

        let (Some(ordered_raw), Some(delivered_raw)) = (
            non_blank(order.order_date.as_deref()),
            non_blank(order.delivery_date.as_deref()),
        ) else {
            continue;
        };

        let (Some(ordered), Some(delivered)) = (parse_date(ordered_raw), parse_date(delivered_raw))
        else {
            log::warn!(
                "supplier {}: skipping purchase order with unparsable dates ({ordered_raw:?}, {delivered_raw:?})",
                order.supplier_id
            );
            continue;
        };

        let days = (delivered - ordered).num_days();
        if days < 0 {
            log::warn!(
                "supplier {}: skipping purchase order delivered {} days before it was placed",
                order.supplier_id,
                -days
            );
            continue;
        }
        entry.push(days as f64);
    }

    observed
}

/// First master entry per supplier wins.
fn promised_lead_times(suppliers: &[SupplierRecord]) -> BTreeMap<&str, Option<f64>> {
    let mut promised = BTreeMap::new();
    for supplier in suppliers {
        promised
            .entry(supplier.supplier_id.as_str())
            .or_insert(supplier.lead_time_days_avg);
    }
    promised
}

/// Sorted union of supplier ids across both sources.
fn supplier_ids<'a>(
    observed: &BTreeMap<&'a str, Vec<f64>>,
    promised: &BTreeMap<&'a str, Option<f64>>,
) -> Vec<&'a str> {
    let mut ids: Vec<&str> = observed.keys().copied().collect();
    ids.extend(promised.keys().copied());
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(id: &str, days: Option<f64>) -> SupplierRecord {
        SupplierRecord {
            supplier_id: id.to_string(),
            lead_time_days_avg: days,
        }
    }

    #[test]
    fn prefers_observed_purchase_orders() {
        let orders = vec![
            PurchaseOrderRecord::new("S1", Some("2024-01-01"), Some("2024-01-11")),
            PurchaseOrderRecord::new("S1", Some("2024-02-01"), Some("2024-02-21")),
        ];
        let estimates = LeadTimeEstimator::default().estimate(&orders, &[supplier("S1", Some(5.0))]);

        let s1 = &estimates["S1"];
        assert_eq!(s1.source, LeadTimeSource::PurchaseOrders);
        assert_eq!(s1.orders_used, 2);
        assert!((s1.avg_lead_time_days - 15.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_dates_are_excluded_then_falls_back() {
        let orders = vec![
            PurchaseOrderRecord::new("S1", Some("2024-01-10"), Some("2024-01-01")),
            PurchaseOrderRecord::new("S2", Some("2024-01-10"), Some("2024-01-01")),
            PurchaseOrderRecord::new("S2", Some("2024-01-01"), Some("2024-01-05")),
        ];
        let estimates =
            LeadTimeEstimator::default().estimate(&orders, &[supplier("S1", Some(9.0))]);

        assert_eq!(estimates["S1"].source, LeadTimeSource::SupplierMaster);
        assert_eq!(estimates["S1"].avg_lead_time_days, 9.0);
        // the inverted order is excluded, not clamped to zero
        assert_eq!(estimates["S2"].avg_lead_time_days, 4.0);
        assert_eq!(estimates["S2"].orders_used, 1);
    }

    #[test]
    fn open_orders_and_missing_master_use_global_default() {
        let orders = vec![PurchaseOrderRecord::new("S3", Some("2024-01-01"), None)];
        let estimates = LeadTimeEstimator::default().estimate(&orders, &[supplier("S4", None)]);

        assert_eq!(estimates.len(), 2);
        for id in ["S3", "S4"] {
            assert_eq!(estimates[id].source, LeadTimeSource::GlobalDefault);
            assert_eq!(estimates[id].avg_lead_time_days, DEFAULT_LEAD_TIME_DAYS);
        }
    }

    #[test]
    fn same_day_deliveries_fall_through_to_keep_lead_time_positive() {
        let orders = vec![PurchaseOrderRecord::new("S5", Some("2024-03-01"), Some("2024-03-01"))];
        let estimates = LeadTimeEstimator::new(7.0).estimate(&orders, &[]);

        assert_eq!(estimates["S5"].source, LeadTimeSource::GlobalDefault);
        assert_eq!(estimates["S5"].avg_lead_time_days, 7.0);
    }

    #[test]
    fn non_positive_master_default_is_ignored() {
        let estimates = LeadTimeEstimator::default().estimate(&[], &[supplier("S6", Some(0.0))]);
        assert_eq!(estimates["S6"].source, LeadTimeSource::GlobalDefault);
    }

    #[test]
    fn performance_reports_actual_minus_promised() {
        let orders = vec![
            PurchaseOrderRecord::new("S1", Some("2024-01-01"), Some("2024-01-11")),
            PurchaseOrderRecord::new("S1", Some("2024-01-01"), Some("2024-01-21")),
        ];
        let perf = supplier_performance(&orders, &[supplier("S1", Some(12.0)), supplier("S2", None)]);

        assert_eq!(perf.len(), 2);
        let s1 = &perf[0];
        assert_eq!(s1.orders_observed, 2);
        assert_eq!(s1.avg_actual_days, Some(15.0));
        assert!((s1.std_actual_days.unwrap() - 50.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(s1.difference_days, Some(3.0));

        let s2 = &perf[1];
        assert_eq!(s2.orders_observed, 0);
        assert_eq!(s2.avg_actual_days, None);
        assert_eq!(s2.difference_days, None);
    }
}
