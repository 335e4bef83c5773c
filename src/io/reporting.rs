// src/io/reporting.rs

use crate::aggregate::demand::demand_variability;
use crate::aggregate::lead_time::SupplierPerformance;
use crate::error::InventoryResult;
use crate::model::kpis::PolicyKpis;
use crate::pipeline::{PolicyTable, ScenarioReport};
use crate::simulation::summary::OutcomeSummary;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const POLICY_TABLE_FILE: &str = "policy_table.csv";
pub const TRIAL_OUTCOMES_FILE: &str = "trial_outcomes.csv";
pub const SCENARIO_SUMMARY_FILE: &str = "scenario_summary.csv";
pub const SCENARIO_HISTOGRAMS_FILE: &str = "scenario_histograms.csv";
pub const DEMAND_VARIABILITY_FILE: &str = "demand_variability.csv";
pub const SUPPLIER_PERFORMANCE_FILE: &str = "supplier_performance.csv";
pub const INVENTORY_SUMMARY_FILE: &str = "inventory_summary.csv";

/// Serializes `data` as CSV rows (with a header) into any writer.
pub fn write_records<T: Serialize, W: Write>(writer: W, data: &[T]) -> InventoryResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    // Serialize and write each record
    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

/// Writes `data` to a CSV file.
///
/// # Arguments
/// * `path` - Destination file, e.g. "output/policy_table.csv".
/// * `data` - The rows to export.
pub fn write_csv<T: Serialize>(path: &Path, data: &[T]) -> InventoryResult<()> {
    let file = std::fs::File::create(path)?;
    write_records(file, data)?;
    log::info!("Exported {} rows to '{}'", data.len(), path.display());
    Ok(())
}

/// Writes the policy table and every scenario artifact into `dir`.
pub fn write_outputs(dir: &Path, table: &PolicyTable, report: &ScenarioReport) -> InventoryResult<()> {
    std::fs::create_dir_all(dir)?;

    write_csv(&dir.join(POLICY_TABLE_FILE), &table.records)?;
    write_csv(&dir.join(DEMAND_VARIABILITY_FILE), &demand_variability(&table.demand))?;
    write_csv(&dir.join(SUPPLIER_PERFORMANCE_FILE), &table.supplier_performance)?;
    write_csv(&dir.join(INVENTORY_SUMMARY_FILE), &table.on_hand)?;

    let trials: Vec<_> = report.series.iter().flat_map(|s| s.records()).collect();
    write_csv(&dir.join(TRIAL_OUTCOMES_FILE), &trials)?;

    write_csv(&dir.join(SCENARIO_SUMMARY_FILE), &report.summaries)?;

    let bins: Vec<_> = report
        .summaries
        .iter()
        .flat_map(|s| s.histogram_records())
        .collect();
    write_csv(&dir.join(SCENARIO_HISTOGRAMS_FILE), &bins)?;
    Ok(())
}

pub fn print_kpis(kpis: &PolicyKpis) {
    println!("\n=== Inventory Policy KPIs ===");
    println!("Total SKUs:                   {}", kpis.total_skus);
    println!("Avg weekly demand:            {:.2}", kpis.avg_weekly_demand);
    println!("Avg current stock:            {:.2}", kpis.avg_current_stock);
    println!("Avg lead time (days):         {:.2}", kpis.avg_lead_time_days);
    println!("Avg EOQ:                      {:.2}", kpis.avg_eoq);
    println!("Total recommended order qty:  {:.2}", kpis.total_recommended_order_qty);
    println!("SKUs at or below ROP:         {}", kpis.skus_at_or_below_rop);
    println!(
        "ABC split (A/B/C):            {}/{}/{}",
        kpis.category_a, kpis.category_b, kpis.category_c
    );
}

pub fn print_supplier_performance(performance: &[SupplierPerformance]) {
    let days = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |d| format!("{d:.1}"));

    println!("\n=== Supplier Lead Times (days) ===");
    println!(
        "{:<12} {:>7} {:>10} {:>10} {:>10} {:>10}",
        "Supplier", "Orders", "Actual", "Std Dev", "Promised", "Diff"
    );
    for p in performance {
        println!(
            "{:<12} {:>7} {:>10} {:>10} {:>10} {:>10}",
            p.supplier_id,
            p.orders_observed,
            days(p.avg_actual_days),
            days(p.std_actual_days),
            days(p.promised_days),
            days(p.difference_days)
        );
    }
}

pub fn print_scenario_summaries(summaries: &[OutcomeSummary]) {
    println!("\n=== Scenario Sensitivity ===");
    println!(
        "{:<18} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Scenario", "Trials", "Mean", "Std Dev", "P10", "P50", "P90"
    );
    for s in summaries {
        println!(
            "{:<18} {:>6} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            s.scenario, s.count, s.mean, s.std_dev, s.percentile_10, s.percentile_50, s.percentile_90
        );
        if s.undefined_trials > 0 {
            println!("  ({} trials without a defined outcome)", s.undefined_trials);
        }
    }
}
