//! Great-circle distance between coordinates.

use geo::Coord;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Return the haversine distance in kilometres between two positions.
///
/// Coordinates follow the crate convention of `x = longitude` and
/// `y = latitude`, both in degrees. The intermediate term is clamped into
/// `[0, 1]` so rounding on coincident or antipodal points cannot produce
/// `NaN`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use rambler_core::distance::haversine_km;
///
/// let london = Coord { x: -0.1278, y: 51.5074 };
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let km = haversine_km(london, paris);
/// assert!((km - 343.5).abs() < 1.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "great-circle distance is floating-point trigonometry"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let from_lat = from.y.to_radians();
    let to_lat = to.y.to_radians();
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lng = (to.x - from.x).to_radians();

    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_lng / 2.0).sin().powi(2);
    let central_angle = 2.0 * half_chord.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * central_angle
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point results within a tolerance"
)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const TOLERANCE_KM: f64 = 1e-6;

    fn coord(lat: f64, lng: f64) -> Coord<f64> {
        Coord { x: lng, y: lat }
    }

    #[rstest]
    #[case(coord(0.0, 0.0), coord(0.0, 0.0), 0.0)]
    #[case(coord(0.0, 0.0), coord(0.0, 180.0), EARTH_RADIUS_KM * std::f64::consts::PI)]
    #[case(coord(90.0, 0.0), coord(-90.0, 0.0), EARTH_RADIUS_KM * std::f64::consts::PI)]
    #[case(coord(0.0, 0.0), coord(0.0, 90.0), EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2)]
    fn known_distances(#[case] from: Coord<f64>, #[case] to: Coord<f64>, #[case] expected: f64) {
        let km = haversine_km(from, to);
        assert!(km.is_finite());
        assert!((km - expected).abs() < 1e-3, "expected {expected}, got {km}");
    }

    #[rstest]
    fn antipodal_points_stay_finite() {
        let km = haversine_km(coord(12.971_6, 77.594_6), coord(-12.971_6, -102.405_4));
        assert!(km.is_finite());
        assert!(km <= EARTH_RADIUS_KM * std::f64::consts::PI + TOLERANCE_KM);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat_a in -90.0_f64..=90.0,
            lng_a in -180.0_f64..=180.0,
            lat_b in -90.0_f64..=90.0,
            lng_b in -180.0_f64..=180.0,
        ) {
            let a = coord(lat_a, lng_a);
            let b = coord(lat_b, lng_b);
            prop_assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < TOLERANCE_KM);
        }

        #[test]
        fn distance_to_self_is_zero(lat in -90.0_f64..=90.0, lng in -180.0_f64..=180.0) {
            let a = coord(lat, lng);
            prop_assert!(haversine_km(a, a).abs() < TOLERANCE_KM);
        }

        #[test]
        fn distance_is_bounded_by_half_circumference(
            lat_a in -90.0_f64..=90.0,
            lng_a in -180.0_f64..=180.0,
            lat_b in -90.0_f64..=90.0,
            lng_b in -180.0_f64..=180.0,
        ) {
            let km = haversine_km(coord(lat_a, lng_a), coord(lat_b, lng_b));
            prop_assert!(km.is_finite());
            prop_assert!(km >= 0.0);
            prop_assert!(km <= EARTH_RADIUS_KM * std::f64::consts::PI + TOLERANCE_KM);
        }
    }
}
