// src/main.rs

use anyhow::Context;
use inventory_policy::config::ServiceLevel;
use inventory_policy::io::{loader, reporting};
use inventory_policy::{InventoryPipeline, PipelineConfig};
use std::env;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("=== Inventory Policy & Sensitivity Simulation ===");

    // 1. SETUP CONFIGURATION
    let args: Vec<String> = env::args().collect();
    let mut config = PipelineConfig::default();
    config.input_dir = parse_path(&args, "--data-dir", config.input_dir);
    config.output_dir = parse_path(&args, "--out-dir", config.output_dir);

    let sim = &mut config.simulation;
    sim.random_seed = parse_arg(&args, "--seed", sim.random_seed);
    sim.trial_count = parse_arg(&args, "--trials", sim.trial_count);
    sim.surge_factor = parse_arg(&args, "--surge", sim.surge_factor);
    sim.delay_factor = parse_arg(&args, "--delay", sim.delay_factor);
    sim.cost_factor = parse_arg(&args, "--cost-variation", sim.cost_factor);
    sim.histogram_bins = parse_arg(&args, "--bins", sim.histogram_bins);

    // An explicit service level derives its own z; otherwise keep 0.95 / 1.65.
    if let Some(level) = find_arg::<f64>(&args, "--service-level") {
        config.policy.service_level = ServiceLevel::new(level)?;
    }

    let pipeline = InventoryPipeline::new(config)?;
    let config = pipeline.config();

    // 2. LOAD INPUTS
    let inputs = loader::load_inputs(&config.input_dir)
        .with_context(|| format!("loading inputs from '{}'", config.input_dir.display()))?;

    // 3. BUILD POLICY TABLE
    let table = pipeline.build_policy_table(&inputs)?;
    if !table.unmatched.is_empty() {
        println!("Some keys did not match across tables; see log output (RUST_LOG=warn).");
    }

    // 4. RUN SCENARIOS
    println!(
        "Running {} trials per scenario (seed {})...",
        config.simulation.trial_count, config.simulation.random_seed
    );
    let report = pipeline.run_scenarios(&table.records)?;

    // 5. EXPORT RESULTS
    reporting::write_outputs(&config.output_dir, &table, &report)
        .with_context(|| format!("writing outputs to '{}'", config.output_dir.display()))?;
    println!("Results written to ./{}", config.output_dir.display());

    // 6. PRINT SUMMARY
    reporting::print_kpis(&table.kpis());
    reporting::print_supplier_performance(&table.supplier_performance);
    reporting::print_scenario_summaries(&report.summaries);

    println!("\nSimulation Complete.");
    Ok(())
}

fn find_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    find_arg(args, flag).unwrap_or(default)
}

fn parse_path(args: &[String], flag: &str, default: PathBuf) -> PathBuf {
    find_arg(args, flag).unwrap_or(default)
}
