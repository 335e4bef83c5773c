pub mod abc;
pub mod calculator;
pub mod optimization;
