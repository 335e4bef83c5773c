// src/io/records.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// One row of the product master.
///
/// Cost columns are optional; a missing or unparsable value becomes `None`
/// and is replaced by the configured `CostDefaults` when the policy is built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Supplier_ID")]
    pub supplier_id: String,
    #[serde(rename = "Unit_Cost", default, deserialize_with = "csv::invalid_option")]
    pub unit_cost: Option<f64>,
    #[serde(rename = "Ordering_Cost", default, deserialize_with = "csv::invalid_option")]
    pub ordering_cost: Option<f64>,
    #[serde(
        rename = "Holding_Cost_Per_Unit_Per_Year",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub holding_cost_per_unit_per_year: Option<f64>,
}

/// One row of the supplier master.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SupplierRecord {
    #[serde(rename = "Supplier_ID")]
    pub supplier_id: String,
    /// Promised average lead time in days.
    #[serde(rename = "Lead_Time_Days_Avg", default, deserialize_with = "csv::invalid_option")]
    pub lead_time_days_avg: Option<f64>,
}

/// One sales transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Sale_Date")]
    pub date: String,
    #[serde(rename = "Quantity_Sold")]
    pub quantity: f64,
}

impl SalesRecord {
    pub fn new(sku: &str, date: &str, quantity: f64) -> Self {
        Self {
            sku: sku.to_string(),
            date: date.to_string(),
            quantity,
        }
    }
}

/// One inventory movement. Quantities are signed: receipts positive, issues negative.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InventoryTransaction {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Transaction_Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Transaction_Type", default)]
    pub transaction_type: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
}

/// One purchase order. The delivery date is empty while the order is open.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PurchaseOrderRecord {
    #[serde(rename = "SKU", default)]
    pub sku: Option<String>,
    #[serde(rename = "Supplier_ID")]
    pub supplier_id: String,
    #[serde(rename = "Order_Date", default)]
    pub order_date: Option<String>,
    #[serde(rename = "Delivery_Date", default)]
    pub delivery_date: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

impl PurchaseOrderRecord {
    pub fn new(supplier_id: &str, order_date: Option<&str>, delivery_date: Option<&str>) -> Self {
        Self {
            sku: None,
            supplier_id: supplier_id.to_string(),
            order_date: order_date.map(str::to_string),
            delivery_date: delivery_date.map(str::to_string),
            status: None,
        }
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parses a calendar date from the formats the upstream exports produce.
/// Any time-of-day component is discarded.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
