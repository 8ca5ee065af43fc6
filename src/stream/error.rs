use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("subscriber gone: {0}")]
    Send(String),
}
