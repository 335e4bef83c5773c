// src/model/kpis.rs

use crate::model::sku::{AbcCategory, SkuRecord};
use serde::Serialize;

/// Headline figures for a policy table, as shown on the summary dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyKpis {
    pub total_skus: usize,
    pub avg_weekly_demand: f64,
    pub avg_current_stock: f64,
    pub avg_lead_time_days: f64,
    pub avg_eoq: f64,
    pub total_recommended_order_qty: f64,
    pub skus_at_or_below_rop: usize,
    pub category_a: usize,
    pub category_b: usize,
    pub category_c: usize,
}

impl PolicyKpis {
    pub fn from_records(records: &[SkuRecord]) -> Self {
        let n = records.len();
        let avg = |f: fn(&SkuRecord) -> f64| {
            if n == 0 {
                0.0
            } else {
                records.iter().map(f).sum::<f64>() / n as f64
            }
        };
        let count = |cat: AbcCategory| records.iter().filter(|r| r.abc_category == cat).count();

        Self {
            total_skus: n,
            avg_weekly_demand: avg(|r| r.avg_weekly_demand),
            avg_current_stock: avg(|r| r.current_stock),
            avg_lead_time_days: avg(|r| r.avg_lead_time_days),
            avg_eoq: avg(|r| r.eoq),
            total_recommended_order_qty: records.iter().map(|r| r.recommended_order_qty).sum(),
            skus_at_or_below_rop: records.iter().filter(|r| r.needs_reorder()).count(),
            category_a: count(AbcCategory::A),
            category_b: count(AbcCategory::B),
            category_c: count(AbcCategory::C),
        }
    }
}
