pub mod config;
pub mod engine;
pub mod rng;
pub mod scenarios;
pub mod summary;
pub mod traits;
