use map_3d::{ecef2geodetic, Ellipsoid};

use crate::propagate::GeoPosition;

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// ECEF (km) to WGS-84 latitude/longitude (degrees) and height above the ellipsoid (km)
pub fn ecef_to_geodetic(ecef: [f64; 3]) -> GeoPosition {
    let [x, y, z] = ecef.map(|km| km * 1000.0);
    let (lat, lon, height_m) = ecef2geodetic(x, y, z, Ellipsoid::WGS84);

    GeoPosition {
        latitude: lat.to_degrees(),
        longitude: normalize_longitude(lon.to_degrees()),
        altitude_km: height_m / 1000.0,
    }
}

/// Wrap a longitude in degrees into [-180, 180)
pub fn normalize_longitude(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;

    #[test]
    fn equator_point_above_prime_meridian() {
        let pos = ecef_to_geodetic([EARTH_EQUATORIAL_RADIUS_KM + 400.0, 0.0, 0.0]);
        assert!(close(pos.latitude, 0.0, 1e-9));
        assert!(close(pos.longitude, 0.0, 1e-9));
        assert!(close(pos.altitude_km, 400.0, 1e-6));
    }

    #[test]
    fn high_latitude_point_recovers_its_geodetic_coordinates() {
        let (x, y, z) = map_3d::geodetic2ecef(
            60.0_f64.to_radians(),
            100.0_f64.to_radians(),
            550_000.0,
            Ellipsoid::WGS84,
        );
        let pos = ecef_to_geodetic([x / 1000.0, y / 1000.0, z / 1000.0]);
        assert!(close(pos.latitude, 60.0, 1e-5));
        assert!(close(pos.longitude, 100.0, 1e-6));
        assert!(close(pos.altitude_km, 550.0, 1e-2));
    }

    #[test]
    fn longitude_past_the_antimeridian_is_negative() {
        let (x, y, z) = map_3d::geodetic2ecef(
            (-35.0_f64).to_radians(),
            (-170.0_f64).to_radians(),
            800_000.0,
            Ellipsoid::WGS84,
        );
        let pos = ecef_to_geodetic([x / 1000.0, y / 1000.0, z / 1000.0]);
        assert!(close(pos.longitude, -170.0, 1e-6));
        assert!(close(pos.latitude, -35.0, 1e-5));
    }

    #[test]
    fn longitude_wraps_into_signed_range() {
        assert!(close(normalize_longitude(190.0), -170.0, 1e-9));
        assert!(close(normalize_longitude(-190.0), 170.0, 1e-9));
        assert!(close(normalize_longitude(360.0), 0.0, 1e-9));
        assert!(close(normalize_longitude(-45.0), -45.0, 1e-9));

        let west = ecef_to_geodetic([0.0, -(EARTH_EQUATORIAL_RADIUS_KM + 500.0), 0.0]);
        assert!(close(west.longitude, -90.0, 1e-9));
    }

    #[test]
    fn teme_rotation_preserves_radius() {
        let teme = [4000.0, -3000.0, 4500.0];
        let ecef = teme_to_ecef_position(teme, 1.234);
        let r = |v: [f64; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!(close(r(teme), r(ecef), 1e-9));
        assert_eq!(teme[2], ecef[2]);
    }
}
