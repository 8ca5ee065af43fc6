use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::ElementSet;
use crate::propagate::PropagationError;

/// Orbital description of a single satellite, keyed by its NORAD catalog number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRecord {
    pub norad_id: u32,
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl ElementRecord {
    pub fn from_set(set: &ElementSet) -> Result<Self, PropagationError> {
        if !set.line1.starts_with("1 ") || !set.line2.starts_with("2 ") {
            return Err(PropagationError::MalformedElements(format!(
                "{}: element lines must start with \"1 \" and \"2 \"",
                set.name
            )));
        }

        let norad_id = set
            .line1
            .get(2..7)
            .map(str::trim)
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| {
                PropagationError::MalformedElements(format!(
                    "{}: no catalog number in line 1",
                    set.name
                ))
            })?;

        Ok(Self {
            norad_id,
            name: set.name.clone(),
            line1: set.line1.clone(),
            line2: set.line2.clone(),
        })
    }
}

/// Sub-satellite point. Longitude is normalized to [-180, 180).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
}

/// Computed position of one satellite at the snapshot instant
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PositionSample {
    pub name: String,
    pub norad_id: u32,
    #[serde(rename = "type")]
    pub sat_type: Option<String>,
    pub mission_description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
}

impl PositionSample {
    pub fn new(record: &ElementRecord, position: GeoPosition) -> Self {
        Self {
            name: record.name.clone(),
            norad_id: record.norad_id,
            sat_type: None,
            mission_description: None,
            latitude: position.latitude,
            longitude: position.longitude,
            altitude_km: position.altitude_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(line1: &str, line2: &str) -> ElementSet {
        ElementSet {
            name: "TEST SAT".into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    #[test]
    fn reads_catalog_number_from_line_one() {
        let record = ElementRecord::from_set(&set(
            "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992",
            "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008",
        ))
        .unwrap();
        assert_eq!(record.norad_id, 25544);
        assert_eq!(record.name, "TEST SAT");
    }

    #[test]
    fn rejects_lines_without_prefix() {
        assert!(matches!(
            ElementRecord::from_set(&set("garbage", "2 25544")),
            Err(PropagationError::MalformedElements(_))
        ));
        assert!(matches!(
            ElementRecord::from_set(&set("1 ABCDEU", "2 ABCDE")),
            Err(PropagationError::MalformedElements(_))
        ));
    }

    #[test]
    fn reserved_fields_serialize_as_null() {
        let record = ElementRecord {
            norad_id: 7,
            name: "SEVEN".into(),
            line1: String::new(),
            line2: String::new(),
        };
        let sample = PositionSample::new(
            &record,
            GeoPosition {
                latitude: 1.0,
                longitude: -2.0,
                altitude_km: 500.0,
            },
        );
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["norad_id"], 7);
        assert!(json["type"].is_null());
        assert!(json["mission_description"].is_null());
        assert_eq!(json["altitude_km"], 500.0);
    }
}
