// src/strategy/calculator.rs

//! Policy Calculator: aggregated SKU inputs to a full policy table.

use crate::config::{AbcMethod, PolicyConfig};
use crate::model::sku::{AbcCategory, SkuInputs, SkuRecord};
use crate::strategy::abc::{classify_by_demand_tercile, classify_by_value_share};
use crate::strategy::optimization::{
    annual_demand, demand_during_lead, economic_order_quantity, lead_time_weeks, non_negative,
    recommended_order_qty, reorder_point, safety_stock,
};

/// The category-independent part of a SKU's policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasePolicy {
    pub lead_time_weeks: f64,
    pub annual_demand: f64,
    pub eoq: f64,
    pub demand_during_lead: f64,
    pub safety_stock: f64,
}

#[derive(Debug, Clone)]
pub struct PolicyCalculator {
    config: PolicyConfig,
}

impl PolicyCalculator {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Computes the per-SKU quantities that do not depend on other SKUs.
    pub fn base_policy(&self, inputs: &SkuInputs) -> BasePolicy {
        let weeks = lead_time_weeks(inputs.avg_lead_time_days);
        let annual = annual_demand(inputs.avg_weekly_demand);

        BasePolicy {
            lead_time_weeks: weeks,
            annual_demand: annual,
            eoq: economic_order_quantity(
                annual,
                inputs.ordering_cost,
                inputs.holding_cost_per_unit_per_year,
            ),
            demand_during_lead: demand_during_lead(inputs.avg_weekly_demand, weeks),
            safety_stock: safety_stock(
                self.config.service_level.z(),
                inputs.std_weekly_demand,
                weeks,
            ),
        }
    }

    /// Builds the policy table.
    ///
    /// Output order matches input order; the ABC ranking uses that order to
    /// break ties, so the result is a pure function of the slice.
    pub fn calculate(&self, inputs: &[SkuInputs]) -> Vec<SkuRecord> {
        let bases: Vec<BasePolicy> = inputs.iter().map(|i| self.base_policy(i)).collect();
        let categories = self.classify(inputs, &bases);

        inputs
            .iter()
            .zip(bases)
            .zip(categories)
            .map(|((input, base), category)| self.finish(input, base, category))
            .collect()
    }

    fn classify(&self, inputs: &[SkuInputs], bases: &[BasePolicy]) -> Vec<AbcCategory> {
        match self.config.abc_method {
            AbcMethod::DemandTercile => {
                let demands: Vec<f64> = bases.iter().map(|b| b.annual_demand).collect();
                classify_by_demand_tercile(&demands)
            }
            AbcMethod::SalesValuePareto {
                a_threshold_pct,
                b_threshold_pct,
            } => {
                let values: Vec<f64> = inputs
                    .iter()
                    .zip(bases)
                    .map(|(input, base)| base.annual_demand * non_negative(input.unit_cost))
                    .collect();
                classify_by_value_share(&values, a_threshold_pct, b_threshold_pct)
            }
        }
    }

    fn finish(&self, input: &SkuInputs, base: BasePolicy, category: AbcCategory) -> SkuRecord {
        let adjusted = base.safety_stock * self.config.safety_factors.factor(category);
        let buffer = if self.config.rop_uses_adjusted_safety_stock {
            adjusted
        } else {
            base.safety_stock
        };
        let rop = reorder_point(base.demand_during_lead, buffer);

        SkuRecord {
            sku: input.sku.clone(),
            supplier_id: input.supplier_id.clone(),
            unit_cost: input.unit_cost,
            ordering_cost: input.ordering_cost,
            holding_cost_per_unit_per_year: input.holding_cost_per_unit_per_year,
            avg_weekly_demand: non_negative(input.avg_weekly_demand),
            std_weekly_demand: non_negative(input.std_weekly_demand),
            avg_lead_time_days: input.avg_lead_time_days,
            current_stock: input.current_stock,
            lead_time_weeks: base.lead_time_weeks,
            annual_demand: base.annual_demand,
            eoq: base.eoq,
            demand_during_lead: base.demand_during_lead,
            safety_stock: base.safety_stock,
            adjusted_safety_stock: adjusted,
            rop,
            recommended_order_qty: recommended_order_qty(rop, input.current_stock),
            abc_category: category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SafetyFactors, ServiceLevel};

    fn inputs(sku: &str, avg: f64, std: f64, lead_days: f64, stock: f64) -> SkuInputs {
        SkuInputs {
            sku: sku.to_string(),
            supplier_id: "S1".to_string(),
            unit_cost: 10.0,
            ordering_cost: 50.0,
            holding_cost_per_unit_per_year: 2.0,
            avg_weekly_demand: avg,
            std_weekly_demand: std,
            avg_lead_time_days: lead_days,
            current_stock: stock,
        }
    }

    #[test]
    fn reference_sku() {
        let calc = PolicyCalculator::new(PolicyConfig::default());
        let record = &calc.calculate(&[inputs("X", 100.0, 10.0, 14.0, 50.0)])[0];

        assert_eq!(record.annual_demand, 5200.0);
        assert!((record.eoq - 509.902).abs() < 1e-3);
        assert_eq!(record.lead_time_weeks, 2.0);
        assert!((record.safety_stock - 23.335).abs() < 1e-3);
        assert_eq!(record.demand_during_lead, 200.0);
        assert!((record.rop - (200.0 + record.safety_stock)).abs() < 1e-12);
        assert!((record.recommended_order_qty - (record.rop - 50.0)).abs() < 1e-12);
    }

    #[test]
    fn zero_demand_sku() {
        let calc = PolicyCalculator::new(PolicyConfig::default());
        let record = &calc.calculate(&[inputs("Z", 0.0, 0.0, 14.0, 0.0)])[0];

        assert_eq!(record.annual_demand, 0.0);
        assert_eq!(record.eoq, 0.0);
        assert_eq!(record.demand_during_lead, 0.0);
        assert_eq!(record.safety_stock, 0.0);
        assert_eq!(record.rop, record.safety_stock);
        assert_eq!(record.recommended_order_qty, 0.0);
    }

    #[test]
    fn category_factor_scales_adjusted_safety_stock_only() {
        let calc = PolicyCalculator::new(PolicyConfig::default());
        let table = calc.calculate(&[
            inputs("low", 1.0, 10.0, 14.0, 0.0),
            inputs("mid", 2.0, 10.0, 14.0, 0.0),
            inputs("high", 3.0, 10.0, 14.0, 0.0),
        ]);

        let cats: Vec<AbcCategory> = table.iter().map(|r| r.abc_category).collect();
        assert_eq!(cats, vec![AbcCategory::C, AbcCategory::B, AbcCategory::A]);

        let ss = table[0].safety_stock;
        assert!((table[0].adjusted_safety_stock - ss * 0.6).abs() < 1e-12);
        assert!((table[1].adjusted_safety_stock - ss * 0.8).abs() < 1e-12);
        assert!((table[2].adjusted_safety_stock - ss).abs() < 1e-12);
        // reorder point keeps the unadjusted buffer by default
        assert!((table[0].rop - (table[0].demand_during_lead + ss)).abs() < 1e-12);
    }

    #[test]
    fn rop_can_use_adjusted_safety_stock() {
        let config = PolicyConfig {
            rop_uses_adjusted_safety_stock: true,
            safety_factors: SafetyFactors { a: 1.0, b: 0.5, c: 0.5 },
            ..PolicyConfig::default()
        };
        let calc = PolicyCalculator::new(config);
        let record = &calc.calculate(&[inputs("only", 7.0, 10.0, 14.0, 0.0)])[0];

        assert_eq!(record.abc_category, AbcCategory::C);
        assert!((record.rop - (record.demand_during_lead + record.safety_stock * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn z_follows_configured_service_level() {
        let config = PolicyConfig {
            service_level: ServiceLevel::with_z(0.99, 2.33).unwrap(),
            ..PolicyConfig::default()
        };
        let base = PolicyCalculator::new(config).base_policy(&inputs("X", 1.0, 10.0, 7.0, 0.0));
        assert!((base.safety_stock - 23.3).abs() < 1e-9);
    }

    #[test]
    fn pareto_tiers_rank_by_sales_value() {
        let config = PolicyConfig {
            abc_method: AbcMethod::SalesValuePareto {
                a_threshold_pct: 80.0,
                b_threshold_pct: 95.0,
            },
            ..PolicyConfig::default()
        };
        let priced = |sku: &str, avg: f64, unit_cost: f64| SkuInputs {
            unit_cost,
            ..inputs(sku, avg, 1.0, 7.0, 0.0)
        };
        // annual values 52 x (15, 70, 10, 5): shares 70, 85, 95, 100
        let table = PolicyCalculator::new(config).calculate(&[
            priced("mid", 1.0, 15.0),
            priced("top", 2.0, 35.0),
            priced("low", 1.0, 10.0),
            priced("tail", 5.0, 1.0),
        ]);

        let cats: Vec<AbcCategory> = table.iter().map(|r| r.abc_category).collect();
        assert_eq!(cats, vec![AbcCategory::B, AbcCategory::A, AbcCategory::B, AbcCategory::C]);
        // the highest demand SKU is C on value
        assert_eq!(table[3].annual_demand, 260.0);
        assert!((table[3].adjusted_safety_stock - table[3].safety_stock * 0.6).abs() < 1e-12);
    }

    #[test]
    fn negative_inputs_are_sanitised() {
        let calc = PolicyCalculator::new(PolicyConfig::default());
        let mut bad = inputs("N", -5.0, f64::NAN, -3.0, 0.0);
        bad.holding_cost_per_unit_per_year = 0.0;
        let record = &calc.calculate(&[bad])[0];

        assert_eq!(record.avg_weekly_demand, 0.0);
        assert_eq!(record.std_weekly_demand, 0.0);
        assert_eq!(record.eoq, 0.0);
        assert_eq!(record.safety_stock, 0.0);
        assert!(record.rop.is_finite());
    }

    #[test]
    fn calculation_is_idempotent() {
        let calc = PolicyCalculator::new(PolicyConfig::default());
        let rows = vec![
            inputs("a", 3.0, 1.0, 10.0, 5.0),
            inputs("b", 3.0, 2.0, 20.0, 0.0),
            inputs("c", 9.0, 0.5, 5.0, 100.0),
        ];
        assert_eq!(calc.calculate(&rows), calc.calculate(&rows));
    }
}
