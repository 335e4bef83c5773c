// src/aggregate/stock.rs

use crate::io::records::InventoryTransaction;
use serde::Serialize;
use std::collections::BTreeMap;

/// Distribution of the recorded movement quantities for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnHandStats {
    pub sku: String,
    pub movements: usize,
    pub mean: f64,
    /// Sample standard deviation (0 with fewer than two movements).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Reduces the inventory log to a current on-hand total per SKU.
///
/// Quantities are summed as signed movements; the transaction type is not
/// interpreted. Non-finite quantities contribute nothing.
pub fn current_stock(transactions: &[InventoryTransaction]) -> BTreeMap<String, f64> {
    let mut stock: BTreeMap<String, f64> = BTreeMap::new();
    for tx in transactions {
        let qty = if tx.quantity.is_finite() { tx.quantity } else { 0.0 };
        *stock.entry(tx.sku.clone()).or_insert(0.0) += qty;
    }
    stock
}

/// Per-SKU mean, spread and range of inventory movement quantities.
///
/// Non-finite quantities are skipped; a SKU with none left still gets a
/// zeroed row.
pub fn on_hand_summary(transactions: &[InventoryTransaction]) -> Vec<OnHandStats> {
    let mut quantities: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for tx in transactions {
        let entry = quantities.entry(tx.sku.as_str()).or_default();
        if tx.quantity.is_finite() {
            entry.push(tx.quantity);
        }
    }

    quantities
        .into_iter()
        .map(|(sku, values)| {
            let n = values.len();
            let mean = if n == 0 { 0.0 } else { values.iter().sum::<f64>() / n as f64 };
            let std_dev = if n > 1 {
                let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
                (ss / (n - 1) as f64).sqrt()
            } else {
                0.0
            };
            OnHandStats {
                sku: sku.to_string(),
                movements: n,
                mean,
                std_dev,
                min: values.iter().copied().reduce(f64::min).unwrap_or(0.0),
                max: values.iter().copied().reduce(f64::max).unwrap_or(0.0),
            }
        })
        .collect()
}
