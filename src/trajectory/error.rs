use thiserror::Error;

use crate::propagate::PropagationError;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("satellite with NORAD ID {0} not found")]
    UnknownSatellite(u32),
    #[error("invalid window: {0}")]
    InvalidWindow(String),
    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),
}
