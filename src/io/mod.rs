pub mod loader;
pub mod records;
pub mod reporting;
