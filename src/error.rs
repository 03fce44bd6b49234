use crate::config::ConfigError;
use crate::domain::FormulaError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid formula: {0}")]
    InvalidFormula(#[from] FormulaError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("No snapshot store configured")]
    SnapshotsUnavailable,
}
