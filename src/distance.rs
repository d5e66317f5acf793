// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Point;

/// Radius of Earth used by all distance computations, in kilometers.
const EARTH_RADIUS: f64 = 6371.0;

const EARTH_DIAMETER: f64 = EARTH_RADIUS + EARTH_RADIUS;

/// Calculates the great-circle distance between two lon-lat positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in kilometers.
///
/// A perfect sphere is assumed, no ellipsoidal correction is applied.
pub fn haversine_distance_km(p0: Point, p1: Point) -> f64 {
    let lat0 = p0.lat.to_radians();
    let lat1 = p1.lat.to_radians();

    let sin_dlat_half = ((p1.lat - p0.lat).to_radians() * 0.5).sin();
    let sin_dlon_half = ((p1.lon - p0.lon).to_radians() * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat0.cos() * lat1.cos() * sin_dlon_half * sin_dlon_half;

    EARTH_DIAMETER * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-6),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    #[test]
    fn zero_for_same_point() {
        let p = Point::new(21.7643873, 49.6833371);
        assert_eq!(haversine_distance_km(p, p), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = Point::new(21.7643873, 49.6833371);
        let b = Point::new(21.7602742, 49.6853010);
        assert_eq!(haversine_distance_km(a, b), haversine_distance_km(b, a));
    }

    #[test]
    fn one_degree_along_meridian() {
        // 2πR / 360
        let d = haversine_distance_km(Point::new(0.0, 0.0), Point::new(0.0, 1.0));
        assert_almost_eq!(d, 111.19492664455873);
    }

    #[test]
    fn short_distance() {
        let d = haversine_distance_km(
            Point::new(21.7643873, 49.6833371),
            Point::new(21.7602742, 49.6853010),
        );
        assert!(d > 0.3 && d < 0.4, "unexpected distance {d}");
    }
}
