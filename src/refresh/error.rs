use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("refresh already in progress")]
    AlreadyRunning,
    #[error("fetch failed: {0}")]
    Fetch(#[from] CatalogError),
    #[error("position derivation task failed: {0}")]
    Derive(#[from] tokio::task::JoinError),
}
