//! Error types for the search query engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid criterion: {0}")]
    InvalidCriterion(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
