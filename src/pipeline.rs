// src/pipeline.rs

//! End-to-end flow: collaborator tables to policy table to scenario report.

use crate::aggregate::demand::{aggregate_weekly_demand, DemandStats};
use crate::aggregate::lead_time::{supplier_performance, LeadTimeEstimate, LeadTimeEstimator, SupplierPerformance};
use crate::aggregate::stock::{current_stock, on_hand_summary, OnHandStats};
use crate::config::PipelineConfig;
use crate::error::InventoryResult;
use crate::io::records::{
    InventoryTransaction, ProductRecord, PurchaseOrderRecord, SalesRecord, SupplierRecord,
};
use crate::model::join::join_on;
use crate::model::kpis::PolicyKpis;
use crate::model::sku::{SkuInputs, SkuRecord};
use crate::simulation::engine::{MonteCarloEngine, TrialOutcomeSeries};
use crate::simulation::scenarios::standard_scenarios;
use crate::simulation::summary::{summarize_all, OutcomeSummary};
use crate::strategy::calculator::PolicyCalculator;
use std::collections::{BTreeMap, BTreeSet};

/// The tables handed over by the ingestion side.
#[derive(Debug, Clone, Default)]
pub struct InventoryInputs {
    pub products: Vec<ProductRecord>,
    pub suppliers: Vec<SupplierRecord>,
    pub sales: Vec<SalesRecord>,
    pub inventory: Vec<InventoryTransaction>,
    pub purchase_orders: Vec<PurchaseOrderRecord>,
}

/// Keys that did not line up across tables.
///
/// None of these stop the calculation. Products without sales get zero
/// demand, products with an unknown supplier get the default lead time, and
/// the rest are left out of the policy table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnmatchedKeys {
    pub products_without_sales: Vec<String>,
    pub sales_without_product: Vec<String>,
    pub products_with_unknown_supplier: Vec<String>,
    pub stock_without_product: Vec<String>,
    /// Repeated SKUs in the product table; only the first row is used.
    pub duplicate_products: Vec<String>,
}

impl UnmatchedKeys {
    pub fn is_empty(&self) -> bool {
        self.products_without_sales.is_empty()
            && self.sales_without_product.is_empty()
            && self.products_with_unknown_supplier.is_empty()
            && self.stock_without_product.is_empty()
            && self.duplicate_products.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PolicyTable {
    /// One row per product, in product-table order.
    pub records: Vec<SkuRecord>,
    pub unmatched: UnmatchedKeys,
    pub demand: BTreeMap<String, DemandStats>,
    pub lead_times: BTreeMap<String, LeadTimeEstimate>,
    pub supplier_performance: Vec<SupplierPerformance>,
    pub on_hand: Vec<OnHandStats>,
}

impl PolicyTable {
    pub fn kpis(&self) -> PolicyKpis {
        PolicyKpis::from_records(&self.records)
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub series: Vec<TrialOutcomeSeries>,
    pub summaries: Vec<OutcomeSummary>,
}

pub struct InventoryPipeline {
    config: PipelineConfig,
    calculator: PolicyCalculator,
    lead_time_estimator: LeadTimeEstimator,
}

impl InventoryPipeline {
    pub fn new(config: PipelineConfig) -> InventoryResult<Self> {
        config.validate()?;
        Ok(Self {
            calculator: PolicyCalculator::new(config.policy.clone()),
            lead_time_estimator: LeadTimeEstimator::new(config.default_lead_time_days),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn build_policy_table(&self, inputs: &InventoryInputs) -> InventoryResult<PolicyTable> {
        let (products, duplicate_products) = unique_products(&inputs.products);
        let demand = aggregate_weekly_demand(&inputs.sales);
        let lead_times = self
            .lead_time_estimator
            .estimate(&inputs.purchase_orders, &inputs.suppliers);
        let stock = current_stock(&inputs.inventory);

        let demand_rows: Vec<(&String, &DemandStats)> = demand.iter().collect();
        let sales_join = join_on(&products, &demand_rows, |p| p.sku.clone(), |(sku, _)| sku.to_string());

        let supplier_rows: Vec<&LeadTimeEstimate> = lead_times.values().collect();
        let supplier_join = join_on(&products, &supplier_rows, |p| p.supplier_id.clone(), |e| e.supplier_id.clone());

        let stock_rows: Vec<&String> = stock.keys().collect();
        let stock_join = join_on(&products, &stock_rows, |p| p.sku.clone(), |sku| sku.to_string());

        let unmatched = UnmatchedKeys {
            products_without_sales: sales_join.left_only.iter().map(|p| p.sku.clone()).collect(),
            sales_without_product: sales_join.right_only.iter().map(|(sku, _)| sku.to_string()).collect(),
            products_with_unknown_supplier: supplier_join.left_only.iter().map(|p| p.sku.clone()).collect(),
            stock_without_product: stock_join.right_only.iter().map(|sku| sku.to_string()).collect(),
            duplicate_products,
        };
        log_unmatched(&unmatched);

        let defaults = &self.config.cost_defaults;
        let sku_inputs: Vec<SkuInputs> = products
            .iter()
            .map(|p| {
                let stats = demand.get(&p.sku).copied().unwrap_or_default();
                let lead_time = lead_times
                    .get(&p.supplier_id)
                    .map(|e| e.avg_lead_time_days)
                    .unwrap_or_else(|| self.lead_time_estimator.default_days());

                SkuInputs {
                    sku: p.sku.clone(),
                    supplier_id: p.supplier_id.clone(),
                    unit_cost: cost_or_default(&p.sku, "Unit_Cost", p.unit_cost, defaults.unit_cost),
                    ordering_cost: cost_or_default(
                        &p.sku,
                        "Ordering_Cost",
                        p.ordering_cost,
                        defaults.ordering_cost,
                    ),
                    holding_cost_per_unit_per_year: cost_or_default(
                        &p.sku,
                        "Holding_Cost_Per_Unit_Per_Year",
                        p.holding_cost_per_unit_per_year,
                        defaults.holding_cost_per_unit_per_year,
                    ),
                    avg_weekly_demand: stats.mean,
                    std_weekly_demand: stats.std_dev,
                    avg_lead_time_days: lead_time,
                    current_stock: stock.get(&p.sku).copied().unwrap_or(0.0),
                }
            })
            .collect();

        let records = self.calculator.calculate(&sku_inputs);
        log::info!(
            "Policy table built for {} SKUs ({} suppliers with lead times)",
            records.len(),
            lead_times.len()
        );

        Ok(PolicyTable {
            records,
            unmatched,
            supplier_performance: supplier_performance(&inputs.purchase_orders, &inputs.suppliers),
            on_hand: on_hand_summary(&inputs.inventory),
            demand,
            lead_times,
        })
    }

    /// Runs every configured scenario against the policy table and reduces
    /// each series.
    pub fn run_scenarios(&self, records: &[SkuRecord]) -> InventoryResult<ScenarioReport> {
        let sim = &self.config.simulation;
        let scenarios = standard_scenarios(sim, self.config.policy.service_level.z());
        let series = MonteCarloEngine::new(sim).run_all(&scenarios, records)?;
        let summaries = summarize_all(&series, sim.histogram_bins);
        Ok(ScenarioReport { series, summaries })
    }

    pub fn run(&self, inputs: &InventoryInputs) -> InventoryResult<(PolicyTable, ScenarioReport)> {
        let table = self.build_policy_table(inputs)?;
        let report = self.run_scenarios(&table.records)?;
        Ok((table, report))
    }
}

/// Keeps the first row per SKU and reports the repeated SKUs.
fn unique_products(products: &[ProductRecord]) -> (Vec<ProductRecord>, Vec<String>) {
    let mut seen = BTreeSet::new();
    let mut unique = Vec::with_capacity(products.len());
    let mut duplicates = Vec::new();
    for product in products {
        if seen.insert(product.sku.as_str()) {
            unique.push(product.clone());
        } else {
            duplicates.push(product.sku.clone());
        }
    }
    (unique, duplicates)
}

/// A missing cost takes the default silently; a negative or non-finite one
/// takes it with a warning.
fn cost_or_default(sku: &str, column: &str, value: Option<f64>, default: f64) -> f64 {
    match value {
        None => default,
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(v) => {
            log::warn!("SKU {sku}: {column} {v} is not a usable cost, using default {default}");
            default
        }
    }
}

fn log_unmatched(unmatched: &UnmatchedKeys) {
    let groups = [
        ("products without sales (zero demand)", &unmatched.products_without_sales),
        ("sold SKUs missing from products (skipped)", &unmatched.sales_without_product),
        ("products with unknown supplier (default lead time)", &unmatched.products_with_unknown_supplier),
        ("stocked SKUs missing from products (skipped)", &unmatched.stock_without_product),
        ("duplicate product rows (first kept)", &unmatched.duplicate_products),
    ];
    for (label, keys) in groups {
        if !keys.is_empty() {
            log::warn!("{} {}: {:?}", keys.len(), label, keys);
        }
    }
}
