// src/simulation/config.rs

use crate::error::{InventoryError, InventoryResult};

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub trial_count: usize,
    pub random_seed: u64,
    /// Strength of the demand-surge perturbation.
    pub surge_factor: f64,
    /// Strength of the lead-time-delay perturbation.
    pub delay_factor: f64,
    /// Half-width of the relative unit-cost band, e.g. 0.1 for +/-10 %.
    pub cost_factor: f64,
    pub histogram_bins: usize,
    /// Adds annual purchase cost (annual demand x simulated unit cost) to the
    /// cost-variation scenario's per-SKU total.
    pub include_purchase_cost: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trial_count: 300,
            random_seed: 42,
            surge_factor: 0.3,
            delay_factor: 0.3,
            cost_factor: 0.1,
            histogram_bins: 30,
            include_purchase_cost: false,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> InventoryResult<()> {
        if self.trial_count == 0 {
            return Err(InventoryError::invalid_config("trial_count", "must be at least 1"));
        }
        if self.histogram_bins == 0 {
            return Err(InventoryError::invalid_config("histogram_bins", "must be at least 1"));
        }
        for (field, value) in [
            ("surge_factor", self.surge_factor),
            ("delay_factor", self.delay_factor),
            ("cost_factor", self.cost_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InventoryError::invalid_config(
                    field,
                    format!("must be a non-negative number, got {value}"),
                ));
            }
        }
        if self.cost_factor > 1.0 {
            return Err(InventoryError::invalid_config(
                "cost_factor",
                format!("must not exceed 1.0 (costs would turn negative), got {}", self.cost_factor),
            ));
        }
        Ok(())
    }
}
