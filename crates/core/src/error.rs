#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("failed to write job record: {0}")]
    Write(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}
