pub mod demand;
pub mod lead_time;
pub mod stock;
