// src/config.rs

//! Explicit configuration handed to every component at construction time.

use crate::aggregate::lead_time::DEFAULT_LEAD_TIME_DAYS;
use crate::error::{InventoryError, InventoryResult};
use crate::model::sku::AbcCategory;
use crate::simulation::config::SimulationConfig;
use crate::strategy::optimization::inverse_normal_cdf;
use std::path::PathBuf;

/// Target probability of not stocking out during lead time, with its z-score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceLevel {
    level: f64,
    z: f64,
}

impl ServiceLevel {
    /// Derives z from the normal quantile function.
    pub fn new(level: f64) -> InventoryResult<Self> {
        Self::check_level(level)?;
        Ok(Self {
            level,
            z: inverse_normal_cdf(level),
        })
    }

    /// Uses an explicit z-score, e.g. the rounded table value 1.65 for 95 %.
    pub fn with_z(level: f64, z: f64) -> InventoryResult<Self> {
        Self::check_level(level)?;
        if !z.is_finite() || z < 0.0 {
            return Err(InventoryError::invalid_config(
                "service_level.z",
                format!("z-score must be a non-negative number, got {z}"),
            ));
        }
        Ok(Self { level, z })
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    fn check_level(level: f64) -> InventoryResult<()> {
        if (0.5..1.0).contains(&level) {
            Ok(())
        } else {
            Err(InventoryError::invalid_config(
                "service_level",
                format!("expected a probability in [0.5, 1), got {level}"),
            ))
        }
    }
}

impl Default for ServiceLevel {
    fn default() -> Self {
        Self {
            level: 0.95,
            z: 1.65,
        }
    }
}

/// How SKUs are tiered into A/B/C.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AbcMethod {
    /// Equal-count terciles of annual demand.
    #[default]
    DemandTercile,
    /// Cumulative share of annual sales value (annual demand x unit cost).
    SalesValuePareto {
        a_threshold_pct: f64,
        b_threshold_pct: f64,
    },
}

/// Per-category multipliers applied to safety stock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyFactors {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl SafetyFactors {
    pub fn factor(&self, category: AbcCategory) -> f64 {
        match category {
            AbcCategory::A => self.a,
            AbcCategory::B => self.b,
            AbcCategory::C => self.c,
        }
    }
}

impl Default for SafetyFactors {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.8,
            c: 0.6,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolicyConfig {
    pub service_level: ServiceLevel,
    pub abc_method: AbcMethod,
    pub safety_factors: SafetyFactors,
    /// When set, the reorder point is built on the category-adjusted safety
    /// stock instead of the raw one.
    pub rop_uses_adjusted_safety_stock: bool,
}

impl PolicyConfig {
    pub fn validate(&self) -> InventoryResult<()> {
        let f = &self.safety_factors;
        for (name, value) in [("a", f.a), ("b", f.b), ("c", f.c)] {
            if !value.is_finite() || value < 0.0 {
                return Err(InventoryError::invalid_config(
                    "safety_factors",
                    format!("factor {name} must be a non-negative number, got {value}"),
                ));
            }
        }
        if let AbcMethod::SalesValuePareto {
            a_threshold_pct,
            b_threshold_pct,
        } = self.abc_method
        {
            if !(0.0..=100.0).contains(&a_threshold_pct)
                || !(a_threshold_pct..=100.0).contains(&b_threshold_pct)
            {
                return Err(InventoryError::invalid_config(
                    "abc_method",
                    format!("thresholds must satisfy 0 <= a <= b <= 100, got {a_threshold_pct}/{b_threshold_pct}"),
                ));
            }
        }
        Ok(())
    }
}

/// Substitutes for optional product-table cost columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostDefaults {
    pub unit_cost: f64,
    pub ordering_cost: f64,
    pub holding_cost_per_unit_per_year: f64,
}

impl CostDefaults {
    pub fn validate(&self) -> InventoryResult<()> {
        for (name, value) in [
            ("unit_cost", self.unit_cost),
            ("ordering_cost", self.ordering_cost),
            ("holding_cost_per_unit_per_year", self.holding_cost_per_unit_per_year),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InventoryError::invalid_config(
                    "cost_defaults",
                    format!("{name} must be a non-negative number, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

impl Default for CostDefaults {
    fn default() -> Self {
        Self {
            unit_cost: 1.0,
            ordering_cost: 50.0,
            // 2 per unit per week
            holding_cost_per_unit_per_year: 2.0 * 52.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the collaborator CSV exports.
    pub input_dir: PathBuf,
    /// Directory receiving the policy table and scenario outputs.
    pub output_dir: PathBuf,
    pub policy: PolicyConfig,
    pub cost_defaults: CostDefaults,
    pub default_lead_time_days: f64,
    pub simulation: SimulationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/processed"),
            output_dir: PathBuf::from("output"),
            policy: PolicyConfig::default(),
            cost_defaults: CostDefaults::default(),
            default_lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            simulation: SimulationConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> InventoryResult<()> {
        self.policy.validate()?;
        self.cost_defaults.validate()?;
        self.simulation.validate()?;
        if !self.default_lead_time_days.is_finite() || self.default_lead_time_days <= 0.0 {
            return Err(InventoryError::invalid_config(
                "default_lead_time_days",
                format!("must be positive, got {}", self.default_lead_time_days),
            ));
        }
        Ok(())
    }
}
