use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Format error: {0}")]
    Format(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
