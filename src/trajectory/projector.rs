use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::cache::Snapshot;
use crate::propagate::{ElementRecord, PropagationError, Propagator};
use crate::trajectory::TrajectoryError;

pub const DEFAULT_HOURS_AHEAD: f64 = 2.0;
pub const DEFAULT_STEP_MINUTES: u32 = 10;
/// Upper bound on any projection window, whatever the configured maximum
pub const HOURS_AHEAD_LIMIT: f64 = 168.0;

// keeps e.g. 0.3 h / 1 min from rounding down to 17 steps
const STEP_COUNT_EPSILON: f64 = 1e-9;

/// One future sub-satellite point
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrbitPoint {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
}

/// How far ahead to project and at what spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryWindow {
    hours_ahead: f64,
    step_minutes: u32,
}

impl Default for TrajectoryWindow {
    fn default() -> Self {
        Self {
            hours_ahead: DEFAULT_HOURS_AHEAD,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

impl TrajectoryWindow {
    pub fn new(
        hours_ahead: f64,
        step_minutes: u32,
        max_hours_ahead: f64,
    ) -> Result<Self, TrajectoryError> {
        if !hours_ahead.is_finite() || hours_ahead < 0.0 {
            return Err(TrajectoryError::InvalidWindow(
                "hours_ahead must be a non-negative number".into(),
            ));
        }
        let max_hours_ahead = max_hours_ahead.min(HOURS_AHEAD_LIMIT);
        if hours_ahead > max_hours_ahead {
            return Err(TrajectoryError::InvalidWindow(format!(
                "hours_ahead must not exceed {}",
                max_hours_ahead
            )));
        }
        if step_minutes == 0 {
            return Err(TrajectoryError::InvalidWindow(
                "step_minutes must be at least 1".into(),
            ));
        }

        Ok(Self {
            hours_ahead,
            step_minutes,
        })
    }

    /// `floor(hours_ahead * 60 / step_minutes) + 1`
    pub fn point_count(&self) -> usize {
        let steps = self.hours_ahead * 60.0 / f64::from(self.step_minutes);
        (steps + STEP_COUNT_EPSILON).floor() as usize + 1
    }

    pub fn step(&self) -> Duration {
        Duration::minutes(i64::from(self.step_minutes))
    }
}

/// `start + step * index`, or `None` if it leaves chrono's range
fn point_time(start: DateTime<Utc>, step: Duration, index: usize) -> Option<DateTime<Utc>> {
    let index = i32::try_from(index).ok()?;
    start.checked_add_signed(step.checked_mul(index)?)
}

/// Lazily propagated future positions of one satellite, `step` apart from `start`.
/// Each point is computed on its own when the iterator reaches it.
pub struct Trajectory<'a, P: ?Sized> {
    record: ElementRecord,
    propagator: &'a P,
    start: DateTime<Utc>,
    step: Duration,
    next: usize,
    count: usize,
}

impl<P: Propagator + ?Sized> Iterator for Trajectory<'_, P> {
    type Item = Result<OrbitPoint, PropagationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let Some(timestamp) = point_time(self.start, self.step, index) else {
            return Some(Err(PropagationError::Propagation(format!(
                "trajectory point {} is out of the representable time range",
                index
            ))));
        };

        Some(
            self.propagator
                .propagate(&self.record, timestamp)
                .map(|pos| OrbitPoint {
                    timestamp,
                    latitude: pos.latitude,
                    longitude: pos.longitude,
                    altitude_km: pos.altitude_km,
                }),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<P: Propagator + ?Sized> ExactSizeIterator for Trajectory<'_, P> {}

/// Future track of `norad_id` starting at `start`, using the element record
/// held by `snapshot`.
pub fn project<'a, P: Propagator + ?Sized>(
    snapshot: &Snapshot,
    propagator: &'a P,
    norad_id: u32,
    window: TrajectoryWindow,
    start: DateTime<Utc>,
) -> Result<Trajectory<'a, P>, TrajectoryError> {
    let record = snapshot
        .element(norad_id)
        .cloned()
        .ok_or(TrajectoryError::UnknownSatellite(norad_id))?;

    let count = window.point_count();
    if point_time(start, window.step(), count - 1).is_none() {
        return Err(TrajectoryError::InvalidWindow(
            "window ends outside the representable time range".into(),
        ));
    }

    Ok(Trajectory {
        record,
        propagator,
        start,
        step: window.step(),
        next: 0,
        count,
    })
}
