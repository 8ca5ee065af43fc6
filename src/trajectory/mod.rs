mod error;
mod projector;

pub use error::TrajectoryError;
pub use projector::{
    project, OrbitPoint, TrajectoryWindow, DEFAULT_HOURS_AHEAD, DEFAULT_STEP_MINUTES,
    HOURS_AHEAD_LIMIT,
};
