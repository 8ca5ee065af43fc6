use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use super::frames::{ecef_to_geodetic, teme_to_ecef_position};
use crate::propagate::{ElementRecord, GeoPosition, PropagationError, Propagator};

/// SGP4 propagation via the `sgp4` crate, reported as a geodetic sub-satellite point.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    fn propagate(
        &self,
        record: &ElementRecord,
        at: DateTime<Utc>,
    ) -> Result<GeoPosition, PropagationError> {
        let elements = Elements::from_tle(
            Some(record.name.clone()),
            record.line1.as_bytes(),
            record.line2.as_bytes(),
        )?;
        let constants = Constants::from_elements(&elements)?;

        let minutes = elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| PropagationError::Propagation(e.to_string()))?;
        let prediction = constants.propagate(minutes)?;

        let sidereal =
            sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()));
        let ecef = teme_to_ecef_position(prediction.position, sidereal);

        let position = ecef_to_geodetic(ecef);
        if !(position.latitude.is_finite()
            && position.longitude.is_finite()
            && position.altitude_km.is_finite())
        {
            return Err(PropagationError::Propagation(format!(
                "non-finite position for {}",
                record.norad_id
            )));
        }

        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn iss() -> ElementRecord {
        ElementRecord {
            norad_id: 25544,
            name: "ISS (ZARYA)".into(),
            line1: "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992".into(),
            line2: "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008".into(),
        }
    }

    #[test]
    fn iss_near_epoch_is_in_low_earth_orbit() {
        let at = Utc.with_ymd_and_hms(2020, 7, 12, 21, 16, 1).unwrap();
        let pos = Sgp4Propagator.propagate(&iss(), at).unwrap();

        assert!(pos.latitude.abs() <= 51.7, "latitude {}", pos.latitude);
        assert!((-180.0..180.0).contains(&pos.longitude));
        assert!(
            (380.0..460.0).contains(&pos.altitude_km),
            "altitude {}",
            pos.altitude_km
        );
    }

    #[test]
    fn same_instant_gives_same_position() {
        let at = Utc.with_ymd_and_hms(2020, 7, 12, 22, 0, 0).unwrap();
        let a = Sgp4Propagator.propagate(&iss(), at).unwrap();
        let b = Sgp4Propagator.propagate(&iss(), at).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn garbage_lines_are_rejected() {
        let mut record = iss();
        record.line2 = "2 this is not an element line".into();
        let at = Utc.with_ymd_and_hms(2020, 7, 12, 22, 0, 0).unwrap();
        assert!(Sgp4Propagator.propagate(&record, at).is_err());
    }
}
