// src/model/sku.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// ABC tier of a SKU. A is the most important third, C the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbcCategory {
    A,
    B,
    C,
}

impl fmt::Display for AbcCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AbcCategory::A => "A",
            AbcCategory::B => "B",
            AbcCategory::C => "C",
        };
        f.write_str(label)
    }
}

/// The aggregated, already-joined inputs for one SKU.
///
/// Every field is numeric: missing upstream values have been replaced by
/// zeros or configured defaults before this struct is built.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuInputs {
    pub sku: String,
    pub supplier_id: String,
    pub unit_cost: f64,
    pub ordering_cost: f64,
    pub holding_cost_per_unit_per_year: f64,
    pub avg_weekly_demand: f64,
    pub std_weekly_demand: f64,
    pub avg_lead_time_days: f64,
    pub current_stock: f64,
}

/// One row of the policy table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuRecord {
    // Identity
    pub sku: String,
    pub supplier_id: String,

    // Inputs
    pub unit_cost: f64,
    pub ordering_cost: f64,
    pub holding_cost_per_unit_per_year: f64,
    pub avg_weekly_demand: f64,
    pub std_weekly_demand: f64,
    pub avg_lead_time_days: f64,
    pub current_stock: f64,

    // Derived
    pub lead_time_weeks: f64,
    pub annual_demand: f64,
    pub eoq: f64,
    pub demand_during_lead: f64,
    pub safety_stock: f64,
    pub adjusted_safety_stock: f64,
    pub rop: f64,
    pub recommended_order_qty: f64,
    pub abc_category: AbcCategory,
}

impl SkuRecord {
    /// True when on-hand stock has reached the reorder point.
    pub fn needs_reorder(&self) -> bool {
        self.current_stock <= self.rop
    }
}
