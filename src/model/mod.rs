pub mod join;
pub mod kpis;
pub mod sku;
