//! Inventory policy estimation and Monte Carlo sensitivity analysis.
//!
//! Historical sales, inventory and purchase-order records are reduced to
//! per-SKU demand and lead-time statistics, turned into reorder policies
//! (EOQ, safety stock, reorder point, ABC tier), and then stressed under
//! randomized demand, lead-time and cost perturbations.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod simulation;
pub mod strategy;

pub use config::PipelineConfig;
pub use error::{InventoryError, InventoryResult};
pub use model::sku::{AbcCategory, SkuRecord};
pub use pipeline::{InventoryInputs, InventoryPipeline, PolicyTable, ScenarioReport};
