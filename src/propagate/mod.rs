mod deriver;
mod error;
mod frames;
mod sgp4_propagator;
mod types;

pub use deriver::derive_position;
pub use error::PropagationError;
pub use sgp4_propagator::Sgp4Propagator;
pub use types::{ElementRecord, GeoPosition, PositionSample};

use chrono::{DateTime, Utc};

/// Turns an element record into a sub-satellite point at a given instant.
pub trait Propagator: Send + Sync {
    fn propagate(
        &self,
        record: &ElementRecord,
        at: DateTime<Utc>,
    ) -> Result<GeoPosition, PropagationError>;
}
