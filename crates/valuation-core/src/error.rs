use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
