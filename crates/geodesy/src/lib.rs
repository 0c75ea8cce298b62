use std::f64::consts::PI;
use thiserror::Error;

pub const R0: f64 = 6371.0; // km, Earth radius used throughout the D1 comparison tables
pub const D2R: f64 = PI / 180.0;
pub const R2D: f64 = 180.0 / PI;

// This was the pole location when the measurement data bank was assembled.
// In 1955 the Geomagnetic North Pole was at 78.5N 68.2W.
pub const GEOMAG_N_POLE: Location = Location {
    lat: 78.5 * D2R,
    lng: -68.2 * D2R,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64, // radians, N positive
    pub lng: f64, // radians, E positive
}

/// Whether a circuit runs along the minor or the major arc of its great circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDirection {
    Short,
    Long,
}

#[derive(Debug, Error)]
pub enum GeodesyError {
    #[error("latitude {0} rad outside [-pi/2, pi/2]")]
    BadLatitude(f64),
    #[error("longitude {0} rad outside (-pi, pi]")]
    BadLongitude(f64),
}

pub fn validate_location(l: Location) -> Result<(), GeodesyError> {
    if !l.lat.is_finite() || l.lat < -PI / 2.0 || l.lat > PI / 2.0 {
        return Err(GeodesyError::BadLatitude(l.lat));
    }
    if !l.lng.is_finite() || l.lng <= -PI || l.lng > PI {
        return Err(GeodesyError::BadLongitude(l.lng));
    }
    Ok(())
}

/// Determines the distance in km between here and there on the great circle.
pub fn great_circle_distance(here: Location, there: Location) -> f64 {
    2.0 * R0
        * f64::asin(f64::sqrt(
            f64::powi(f64::sin((here.lat - there.lat) / 2.0), 2)
                + f64::cos(here.lat)
                    * f64::cos(there.lat)
                    * f64::powi(f64::sin((here.lng - there.lng) / 2.0), 2),
        ))
}

/// Great-circle distance along the arc the circuit actually uses.
/// Long paths take the major arc, the complement of the minor-arc distance.
pub fn path_distance(here: Location, there: Location, direction: PathDirection) -> f64 {
    let d = great_circle_distance(here, there);
    match direction {
        PathDirection::Short => d,
        PathDirection::Long => 2.0 * PI * R0 - d,
    }
}

/// Determines the lat and long of the point halfway along the great circle
/// path of length distance from here to there.
pub fn great_circle_midpoint(here: Location, there: Location, distance: f64) -> Location {
    if distance == 0.0 {
        // Coincident endpoints, the midpoint is the shared point.
        return here;
    }

    let d = distance / R0;
    // At fraction 0.5 both interpolation weights collapse to the same value.
    let a = f64::sin(0.5 * d) / f64::sin(d);
    let b = a;

    let x = a * f64::cos(here.lat) * f64::cos(here.lng)
        + b * f64::cos(there.lat) * f64::cos(there.lng);
    let y = a * f64::cos(here.lat) * f64::sin(here.lng)
        + b * f64::cos(there.lat) * f64::sin(there.lng);
    let z = a * f64::sin(here.lat) + b * f64::sin(there.lat);

    Location {
        lat: f64::atan2(z, f64::sqrt(x.powi(2) + y.powi(2))),
        lng: f64::atan2(y, x),
    }
}

/// Conversion from geographic coordinates to geomagnetic coordinates.
/// Returns None when the point maps onto the geomagnetic pole, where the
/// longitude is undefined.
pub fn geomagnetic_coords(here: Location) -> Option<Location> {
    let gmlat = f64::asin(
        f64::sin(here.lat) * f64::sin(GEOMAG_N_POLE.lat)
            + f64::cos(here.lat)
                * f64::cos(GEOMAG_N_POLE.lat)
                * f64::cos(here.lng - GEOMAG_N_POLE.lng),
    );

    let cos_gmlat = f64::cos(gmlat);
    if cos_gmlat.abs() < 1.0e-9 {
        return None;
    }

    let gmlng = f64::asin(f64::cos(here.lat) * f64::sin(here.lng - GEOMAG_N_POLE.lng) / cos_gmlat);

    Some(Location {
        lat: gmlat,
        lng: gmlng,
    })
}

/// Whole hours between circuit-local time at the path midpoint and the
/// receiver clock. The original comparison derives this from the latitude
/// difference, not the longitude; kept verbatim so the statistics line up
/// with the published tables.
pub fn local_time_offset(rx: Location, midpoint: Location, direction: PathDirection) -> i32 {
    let hours = match direction {
        PathDirection::Short => (rx.lat - midpoint.lat) / (15.0 * D2R),
        PathDirection::Long => (midpoint.lat - rx.lat) / (15.0 * D2R),
    };
    hours.floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn loc(lat_deg: f64, lng_deg: f64) -> Location {
        Location {
            lat: lat_deg * D2R,
            lng: lng_deg * D2R,
        }
    }

    #[test]
    fn distance_of_coincident_points_is_zero() {
        let p = loc(53.3, -6.2);
        assert_eq!(great_circle_distance(p, p), 0.0);
    }

    #[test]
    fn distance_of_antipodal_points_is_half_circumference() {
        let here = loc(45.0, 30.0);
        let there = loc(-45.0, -150.0);
        assert_relative_eq!(
            great_circle_distance(here, there),
            PI * R0,
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn distance_is_symmetric() {
        let dublin = loc(53.3, -6.2);
        let new_york = loc(40.7, -74.0);
        assert_relative_eq!(
            great_circle_distance(dublin, new_york),
            great_circle_distance(new_york, dublin),
        );
    }

    #[test]
    fn short_and_long_arcs_sum_to_the_full_circle() {
        let dublin = loc(53.3, -6.2);
        let new_york = loc(40.7, -74.0);
        let short = path_distance(dublin, new_york, PathDirection::Short);
        let long = path_distance(dublin, new_york, PathDirection::Long);
        assert_relative_eq!(short + long, 2.0 * PI * R0, epsilon = 1.0e-9);
    }

    #[test]
    fn one_degree_of_arc_on_a_meridian() {
        let d = great_circle_distance(loc(0.0, 0.0), loc(1.0, 0.0));
        assert_relative_eq!(d, R0 * D2R, epsilon = 1.0e-9);
    }

    #[test]
    fn midpoint_of_coincident_points_is_the_point() {
        let p = loc(10.0, 20.0);
        let mid = great_circle_midpoint(p, p, 0.0);
        assert_eq!(mid, p);
    }

    #[test]
    fn midpoint_on_the_equator() {
        let here = loc(0.0, 0.0);
        let there = loc(0.0, 90.0);
        let d = great_circle_distance(here, there);
        let mid = great_circle_midpoint(here, there, d);
        assert_relative_eq!(mid.lat, 0.0, epsilon = 1.0e-9);
        assert_relative_eq!(mid.lng, 45.0 * D2R, epsilon = 1.0e-9);
    }

    #[test]
    fn midpoint_on_a_meridian() {
        let here = loc(40.0, 10.0);
        let there = loc(50.0, 10.0);
        let d = great_circle_distance(here, there);
        let mid = great_circle_midpoint(here, there, d);
        assert_relative_eq!(mid.lat, 45.0 * D2R, epsilon = 1.0e-9);
        assert_relative_eq!(mid.lng, 10.0 * D2R, epsilon = 1.0e-9);
    }

    #[test]
    fn geomagnetic_pole_maps_to_ninety_north() {
        let gm = geomagnetic_coords(GEOMAG_N_POLE);
        // Directly over the dipole pole the longitude is undefined.
        assert!(gm.is_none());
    }

    #[test]
    fn geomagnetic_latitude_of_a_mid_latitude_point() {
        // 46N 0E, hand computed against the dipole rotation.
        let gm = geomagnetic_coords(loc(46.0, 0.0)).unwrap();
        assert_relative_eq!(gm.lat * R2D, 49.128, epsilon = 0.05);
    }

    #[test]
    fn local_time_offset_floors_toward_negative_infinity() {
        // rx 4 degrees south of the midpoint: -4/15 h floors to -1, not 0.
        let rx = loc(42.0, 0.0);
        let mid = loc(46.0, 0.0);
        assert_eq!(local_time_offset(rx, mid, PathDirection::Short), -1);
        assert_eq!(local_time_offset(rx, mid, PathDirection::Long), 0);
    }

    #[test]
    fn validate_location_rejects_out_of_range() {
        assert!(validate_location(loc(91.0, 0.0)).is_err());
        assert!(validate_location(loc(0.0, 181.0)).is_err());
        assert!(validate_location(loc(89.9, 179.9)).is_ok());
    }
}
