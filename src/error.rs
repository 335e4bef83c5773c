// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid normal distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),

    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Required table '{table}' is empty")]
    EmptyTable { table: &'static str },
}

impl InventoryError {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;
