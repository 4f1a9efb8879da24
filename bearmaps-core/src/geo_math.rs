//! Great-circle distance and bearing between WGS84 coordinates.
//!
//! Both helpers follow the formulas published at
//! <https://www.movable-type.co.uk/scripts/latlong.html>. Inputs are
//! `geo::Coord` values with `x = longitude` and `y = latitude` in degrees.

use geo::Coord;

/// Earth radius used for distances, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

/// Great-circle distance in miles between two coordinates (haversine).
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bearmaps_core::geo_math::distance;
///
/// let berkeley = Coord { x: -122.2585, y: 37.8719 };
/// assert_eq!(distance(berkeley, berkeley), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine distance is defined in floating point"
)]
pub fn distance(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let phi_from = from.y.to_radians();
    let phi_to = to.y.to_radians();
    let delta_phi = (to.y - from.y).to_radians();
    let delta_lambda = (to.x - from.x).to_radians();

    let half_phi = (delta_phi / 2.0).sin();
    let half_lambda = (delta_lambda / 2.0).sin();
    let hav = half_phi * half_phi + phi_from.cos() * phi_to.cos() * half_lambda * half_lambda;
    2.0 * EARTH_RADIUS_MILES * hav.sqrt().atan2((1.0 - hav).sqrt())
}

/// Initial bearing in degrees when travelling from `from` towards `to`.
///
/// The result is the raw `atan2` range `(-180, 180]`; callers wanting a
/// compass heading must normalise it themselves.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bearmaps_core::geo_math::bearing;
///
/// let south = Coord { x: 0.0, y: 0.0 };
/// let north = Coord { x: 0.0, y: 1.0 };
/// assert!(bearing(south, north).abs() < 1e-9);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "initial bearing is defined in floating point"
)]
pub fn bearing(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let phi_from = from.y.to_radians();
    let phi_to = to.y.to_radians();
    let delta_lambda = to.x.to_radians() - from.x.to_radians();

    let y = delta_lambda.sin() * phi_to.cos();
    let x = phi_from.cos() * phi_to.sin() - phi_from.sin() * phi_to.cos() * delta_lambda.cos();
    y.atan2(x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        let delta = (actual - expected).abs();
        assert!(
            delta <= tolerance,
            "expected {expected}, got {actual} (|Δ| = {delta})"
        );
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_sixty_nine_miles() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let north = Coord { x: 0.0, y: 1.0 };
        assert_close(distance(origin, north), 69.167, 0.01);
    }

    #[rstest]
    fn distance_between_berkeley_landmarks() {
        // Sather Tower to the Berkeley Marina.
        let campanile = Coord { x: -122.2578, y: 37.8721 };
        let marina = Coord { x: -122.3157, y: 37.8659 };
        assert_close(distance(campanile, marina), 3.19, 0.05);
    }

    #[rstest]
    #[case(Coord { x: 0.0, y: 1.0 }, 0.0)]
    #[case(Coord { x: 1.0, y: 0.0 }, 90.0)]
    #[case(Coord { x: 0.0, y: -1.0 }, 180.0)]
    #[case(Coord { x: -1.0, y: 0.0 }, -90.0)]
    fn bearing_follows_compass_points(#[case] target: Coord<f64>, #[case] expected: f64) {
        let origin = Coord { x: 0.0, y: 0.0 };
        assert_close(bearing(origin, target), expected, 1e-9);
    }

    #[rstest]
    fn bearing_is_not_normalised_to_positive_range() {
        let origin = Coord { x: -122.25, y: 37.87 };
        let west = Coord { x: -122.30, y: 37.86 };
        assert!(bearing(origin, west) < 0.0);
    }
}
