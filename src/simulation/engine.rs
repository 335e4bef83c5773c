// src/simulation/engine.rs

use crate::error::InventoryResult;
use crate::model::sku::SkuRecord;
use crate::simulation::config::SimulationConfig;
use crate::simulation::rng::RngBank;
use crate::simulation::traits::{Scenario, TrialContext};
use serde::Serialize;

/// Per-trial summaries of one scenario, in trial-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcomeSeries {
    pub scenario: String,
    pub values: Vec<f64>,
    /// Trials that produced no defined summary and were not appended.
    pub undefined_trials: usize,
    pub trial_count: usize,
}

impl TrialOutcomeSeries {
    pub fn new(scenario: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            values: Vec::new(),
            undefined_trials: 0,
            trial_count: 0,
        }
    }

    pub fn push(&mut self, outcome: Option<f64>) {
        match outcome {
            Some(value) => self.values.push(value),
            None => self.undefined_trials += 1,
        }
        self.trial_count += 1;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flattens the series into CSV rows.
    pub fn records(&self) -> Vec<TrialRecord> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| TrialRecord {
                scenario: self.scenario.clone(),
                trial: i + 1,
                value: *value,
            })
            .collect()
    }
}

// We make this Serialize so we can write it to CSV later.
// `trial` numbers the defined outcomes from 1.
#[derive(Debug, Clone, Serialize)]
pub struct TrialRecord {
    pub scenario: String,
    pub trial: usize,
    pub value: f64,
}

pub struct MonteCarloEngine {
    trial_count: usize,
    bank: RngBank,
}

impl MonteCarloEngine {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            trial_count: config.trial_count,
            bank: RngBank::new(config.random_seed),
        }
    }

    /// Runs every trial of one scenario against a read-only SKU table.
    pub fn run(&self, scenario: &dyn Scenario, skus: &[SkuRecord]) -> InventoryResult<TrialOutcomeSeries> {
        let mut series = TrialOutcomeSeries::new(scenario.name());
        log::info!(
            "Running {} trials of {} over {} SKUs",
            self.trial_count,
            scenario.name(),
            skus.len()
        );

        for trial_index in 0..self.trial_count {
            let ctx = TrialContext {
                trial_index,
                bank: &self.bank,
            };
            series.push(scenario.run_trial(skus, &ctx)?);

            if (trial_index + 1) % 100 == 0 {
                log::debug!(
                    "{}: trial {}/{}",
                    scenario.name(),
                    trial_index + 1,
                    self.trial_count
                );
            }
        }

        if series.undefined_trials > 0 {
            log::warn!(
                "{}: {} of {} trials had no defined outcome",
                scenario.name(),
                series.undefined_trials,
                series.trial_count
            );
        }
        log::info!("{} complete: {} outcomes", scenario.name(), series.len());
        Ok(series)
    }

    pub fn run_all(
        &self,
        scenarios: &[Box<dyn Scenario>],
        skus: &[SkuRecord],
    ) -> InventoryResult<Vec<TrialOutcomeSeries>> {
        scenarios.iter().map(|s| self.run(s.as_ref(), skus)).collect()
    }
}
