// src/simulation/traits.rs

use crate::error::InventoryResult;
use crate::model::sku::SkuRecord;
use crate::simulation::rng::{RngBank, ScenarioSlot, SimRng};
use std::fmt::Debug;

/// Per-trial information handed to a scenario.
#[derive(Debug, Clone, Copy)]
pub struct TrialContext<'a> {
    /// Zero-based index of the trial within its scenario run.
    pub trial_index: usize,
    pub bank: &'a RngBank,
}

impl TrialContext<'_> {
    /// The random stream for one SKU in this trial.
    pub fn rng_for(&self, slot: ScenarioSlot, sku_index: usize) -> SimRng {
        self.bank.stream(slot, self.trial_index, sku_index)
    }
}

/// One perturbation experiment over the policy table.
///
/// We require `Debug` so a run can be logged with its parameters.
/// We require `Send` + `Sync` so trials can be spread across threads.
pub trait Scenario: Debug + Send + Sync {
    /// Identifier used in logs and output files.
    fn name(&self) -> &'static str {
        self.slot().name()
    }

    /// Seed slot this scenario draws from.
    fn slot(&self) -> ScenarioSlot;

    /// Runs a single trial and returns its summary scalar.
    ///
    /// `Ok(None)` means no SKU produced a defined value in this trial.
    /// Implementations must not keep state between trials.
    fn run_trial(&self, skus: &[SkuRecord], ctx: &TrialContext<'_>) -> InventoryResult<Option<f64>>;
}
