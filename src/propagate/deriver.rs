use chrono::{DateTime, Utc};

use crate::catalog::ElementSet;
use crate::propagate::{ElementRecord, PositionSample, PropagationError, Propagator};

/// Position of one catalog entry at `at`, together with the record it was computed from
pub fn derive_position<P: Propagator + ?Sized>(
    set: &ElementSet,
    at: DateTime<Utc>,
    propagator: &P,
) -> Result<(ElementRecord, PositionSample), PropagationError> {
    let record = ElementRecord::from_set(set)?;
    let position = propagator.propagate(&record, at)?;
    let sample = PositionSample::new(&record, position);
    Ok((record, sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagate::{GeoPosition, Sgp4Propagator};
    use chrono::TimeZone;

    struct Fixed;

    impl Propagator for Fixed {
        fn propagate(
            &self,
            record: &ElementRecord,
            _at: DateTime<Utc>,
        ) -> Result<GeoPosition, PropagationError> {
            Ok(GeoPosition {
                latitude: 10.0,
                longitude: 20.0,
                altitude_km: record.norad_id as f64,
            })
        }
    }

    #[test]
    fn sample_carries_record_identity() {
        let set = ElementSet {
            name: "SAT".into(),
            line1: "1 00042U".into(),
            line2: "2 00042".into(),
        };
        let (record, sample) = derive_position(&set, Utc::now(), &Fixed).unwrap();
        assert_eq!(record.norad_id, 42);
        assert_eq!(sample.norad_id, 42);
        assert_eq!(sample.name, "SAT");
        assert_eq!(sample.altitude_km, 42.0);
        assert!(sample.sat_type.is_none());
    }

    #[test]
    fn malformed_set_fails_before_propagation() {
        let set = ElementSet {
            name: "BROKEN".into(),
            line1: "not".into(),
            line2: "tle".into(),
        };
        let at = Utc.with_ymd_and_hms(2020, 7, 12, 22, 0, 0).unwrap();
        assert!(derive_position(&set, at, &Sgp4Propagator).is_err());
    }
}
