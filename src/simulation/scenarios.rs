// src/simulation/scenarios.rs

use crate::aggregate::lead_time::DEFAULT_LEAD_TIME_DAYS;
use crate::error::InventoryResult;
use crate::model::sku::SkuRecord;
use crate::simulation::config::SimulationConfig;
use crate::simulation::rng::{ScenarioSlot, SimRng};
use crate::simulation::traits::{Scenario, TrialContext};
use crate::strategy::optimization::{lead_time_weeks, safety_stock, total_annual_cost};

/// Spread of a simulated quantity relative to its base value.
const RELATIVE_SPREAD: f64 = 0.3;
/// Lower bound on that spread, so small bases still vary.
const MIN_SPREAD: f64 = 1.0;
const MIN_SIMULATED_LEAD_DAYS: f64 = 1.0;

/// The three reference scenarios configured from one `SimulationConfig`.
pub fn standard_scenarios(config: &SimulationConfig, z_score: f64) -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(DemandSurge::new(config.surge_factor)),
        Box::new(LeadTimeDelay::new(config.delay_factor, z_score)),
        Box::new(CostVariation::new(
            config.cost_factor,
            config.include_purchase_cost,
        )),
    ]
}

fn spread(base: f64) -> f64 {
    (base * RELATIVE_SPREAD).max(MIN_SPREAD)
}

fn mean_of_defined(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

// =========================================================================
// 1. Demand Surge
// =========================================================================

/// Shocks weekly demand upwards (occasionally slightly down) and measures how
/// many SKUs would run through their stock plus one order cycle.
#[derive(Debug, Clone)]
pub struct DemandSurge {
    surge_factor: f64,
}

impl DemandSurge {
    pub fn new(surge_factor: f64) -> Self {
        Self { surge_factor }
    }
}

/// One simulated week of demand for a SKU averaging `base` units.
///
/// A SKU with no demand stays at exactly zero and consumes no draws.
pub fn simulate_weekly_demand(base: f64, surge_factor: f64, rng: &mut SimRng) -> InventoryResult<f64> {
    if base == 0.0 {
        return Ok(0.0);
    }
    let mean = base * (1.0 + surge_factor * rng.uniform(-0.2, 1.0));
    Ok(rng.normal(mean, spread(base))?.max(0.0))
}

/// Fraction of SKUs whose simulated demand exceeds `current_stock + eoq`.
pub fn stockout_fraction(skus: &[SkuRecord], simulated_demand: &[f64]) -> Option<f64> {
    if skus.is_empty() {
        return None;
    }
    let short = skus
        .iter()
        .zip(simulated_demand)
        .filter(|(sku, demand)| **demand > sku.current_stock + sku.eoq)
        .count();
    Some(short as f64 / skus.len() as f64)
}

impl Scenario for DemandSurge {
    fn slot(&self) -> ScenarioSlot {
        ScenarioSlot::DemandSurge
    }

    fn run_trial(&self, skus: &[SkuRecord], ctx: &TrialContext<'_>) -> InventoryResult<Option<f64>> {
        let demand = skus
            .iter()
            .enumerate()
            .map(|(i, sku)| {
                let mut rng = ctx.rng_for(self.slot(), i);
                simulate_weekly_demand(sku.avg_weekly_demand, self.surge_factor, &mut rng)
            })
            .collect::<InventoryResult<Vec<f64>>>()?;
        Ok(stockout_fraction(skus, &demand))
    }
}

// =========================================================================
// 2. Lead-Time Delay
// =========================================================================

/// Stretches supplier lead times and reports the average safety stock the
/// longer lead times would require.
#[derive(Debug, Clone)]
pub struct LeadTimeDelay {
    delay_factor: f64,
    z_score: f64,
}

impl LeadTimeDelay {
    pub fn new(delay_factor: f64, z_score: f64) -> Self {
        Self {
            delay_factor,
            z_score,
        }
    }
}

/// One simulated lead time in days, never below one day.
pub fn simulate_lead_time_days(base_days: f64, delay_factor: f64, rng: &mut SimRng) -> InventoryResult<f64> {
    let base = if base_days.is_finite() && base_days > 0.0 {
        base_days
    } else {
        DEFAULT_LEAD_TIME_DAYS
    };
    let mean = base * (1.0 + delay_factor * rng.uniform(0.0, 1.0));
    Ok(rng.normal(mean, spread(base))?.max(MIN_SIMULATED_LEAD_DAYS))
}

/// Mean safety stock across SKUs for the given simulated lead times.
pub fn mean_safety_stock(skus: &[SkuRecord], lead_time_days: &[f64], z_score: f64) -> Option<f64> {
    mean_of_defined(
        skus.iter()
            .zip(lead_time_days)
            .map(|(sku, days)| Some(safety_stock(z_score, sku.std_weekly_demand, lead_time_weeks(*days)))),
    )
}

impl Scenario for LeadTimeDelay {
    fn slot(&self) -> ScenarioSlot {
        ScenarioSlot::LeadTimeDelay
    }

    fn run_trial(&self, skus: &[SkuRecord], ctx: &TrialContext<'_>) -> InventoryResult<Option<f64>> {
        let lead_times = skus
            .iter()
            .enumerate()
            .map(|(i, sku)| {
                let mut rng = ctx.rng_for(self.slot(), i);
                simulate_lead_time_days(sku.avg_lead_time_days, self.delay_factor, &mut rng)
            })
            .collect::<InventoryResult<Vec<f64>>>()?;
        Ok(mean_safety_stock(skus, &lead_times, self.z_score))
    }
}

// =========================================================================
// 3. Cost Variation
// =========================================================================

/// Jitters unit cost within a symmetric band and reports the mean annual
/// ordering-plus-holding cost at each SKU's EOQ.
#[derive(Debug, Clone)]
pub struct CostVariation {
    cost_factor: f64,
    include_purchase_cost: bool,
}

impl CostVariation {
    pub fn new(cost_factor: f64, include_purchase_cost: bool) -> Self {
        Self {
            cost_factor,
            include_purchase_cost,
        }
    }
}

/// One simulated unit cost in `[c * (1 - f), c * (1 + f))`.
pub fn simulate_unit_cost(unit_cost: f64, cost_factor: f64, rng: &mut SimRng) -> f64 {
    unit_cost * rng.uniform(1.0 - cost_factor, 1.0 + cost_factor)
}

/// Mean annual cost across SKUs with a defined cost.
///
/// SKUs with no EOQ or no demand are left out of the mean. When
/// `simulated_unit_costs` is given, annual purchase cost is added.
pub fn mean_total_cost(skus: &[SkuRecord], simulated_unit_costs: Option<&[f64]>) -> Option<f64> {
    mean_of_defined(skus.iter().enumerate().map(|(i, sku)| {
        let cost = total_annual_cost(
            sku.eoq,
            sku.annual_demand,
            sku.ordering_cost,
            sku.holding_cost_per_unit_per_year,
        )?;
        let purchase = simulated_unit_costs
            .and_then(|costs| costs.get(i))
            .map_or(0.0, |unit| sku.annual_demand * unit);
        Some(cost + purchase)
    }))
}

impl Scenario for CostVariation {
    fn slot(&self) -> ScenarioSlot {
        ScenarioSlot::CostVariation
    }

    fn run_trial(&self, skus: &[SkuRecord], ctx: &TrialContext<'_>) -> InventoryResult<Option<f64>> {
        let unit_costs: Vec<f64> = skus
            .iter()
            .enumerate()
            .map(|(i, sku)| {
                let mut rng = ctx.rng_for(self.slot(), i);
                simulate_unit_cost(sku.unit_cost, self.cost_factor, &mut rng)
            })
            .collect();
        let purchase = self.include_purchase_cost.then_some(unit_costs.as_slice());
        Ok(mean_total_cost(skus, purchase))
    }
}
