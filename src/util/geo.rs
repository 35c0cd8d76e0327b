//! Great-circle distance, per `spec.md` §4.4: `R = 6_371_000`,
//! `a = sin²(Δφ/2) + cosφ₁·cosφ₂·sin²(Δλ/2)`, `d = 2R·atan2(√a, √(1−a))`.

use crate::projection::EARTH_RADIUS_METERS;

/// Haversine distance in meters between two WGS84 points given as
/// `(lat_deg, lon_deg)`.
pub fn haversine_distance_meters(src: (f64, f64), dst: (f64, f64)) -> f64 {
    let (lat1, lon1) = src;
    let (lat2, lon2) = dst;
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_distance_between_identical_points() {
        assert_abs_diff_eq!(haversine_distance_meters((39.75, -105.2), (39.75, -105.2)), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_roughly_111km() {
        let d = haversine_distance_meters((0.0, 0.0), (1.0, 0.0));
        assert!((d - 111_195.0).abs() < 500.0);
    }
}
