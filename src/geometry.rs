// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Planar predicates over lon-lat coordinates.
//!
//! Longitude is treated as the x axis and latitude as the y axis; no projection
//! is applied. This is only reasonable for small areas away from the antimeridian.

use crate::Point;

/// Represents a single continuous road, as an ordered sequence of [Points](Point).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Road {
    pub points: Vec<Point>,
}

impl Road {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl From<Vec<Point>> for Road {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// Represents a flood zone, as a list of rings.
///
/// Only the first (outer) ring is ever used by the predicates in this crate.
/// Any further rings (holes) are kept for rendering, but are otherwise ignored:
/// a point inside a hole is still considered to be inside the polygon.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Vec<Point>>,
}

impl Polygon {
    pub fn new(rings: Vec<Vec<Point>>) -> Self {
        Self { rings }
    }

    /// Creates a polygon without any holes.
    pub fn from_exterior(ring: Vec<Point>) -> Self {
        Self { rings: vec![ring] }
    }

    /// Returns the outer ring of the polygon, or an empty slice if the polygon has no rings.
    pub fn exterior(&self) -> &[Point] {
        self.rings.first().map(Vec::as_slice).unwrap_or_default()
    }
}

/// Checks whether segment `p0`-`p1` intersects segment `q0`-`q1`.
///
/// Parallel and collinear segments (including overlapping ones) are never
/// considered to be intersecting. Touching at an endpoint counts as an intersection.
pub fn segments_intersect(p0: Point, p1: Point, q0: Point, q1: Point) -> bool {
    let s1_x = p1.lon - p0.lon;
    let s1_y = p1.lat - p0.lat;
    let s2_x = q1.lon - q0.lon;
    let s2_y = q1.lat - q0.lat;

    let denom = -s2_x * s1_y + s1_x * s2_y;
    if denom == 0.0 {
        return false;
    }

    let dx = p0.lon - q0.lon;
    let dy = p0.lat - q0.lat;
    let s = (-s1_y * dx + s1_x * dy) / denom;
    let t = (s2_x * dy - s2_y * dx) / denom;

    (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t)
}

/// Iterates over all edges of a closed ring, as (previous, current) pairs,
/// starting with the closing (last, first) edge.
fn ring_edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let closing = ring.last().copied().zip(ring.first().copied());
    closing
        .into_iter()
        .chain(ring.windows(2).map(|pair| (pair[0], pair[1])))
}

/// Checks whether `point` lies inside `ring` using the even-odd ray casting rule.
///
/// Results for points exactly on the boundary are unspecified, but stable.
pub fn point_in_ring(point: Point, ring: &[Point]) -> bool {
    let mut inside = false;

    for (pj, pi) in ring_edges(ring) {
        let (xi, yi) = (pi.lon, pi.lat);
        let (xj, yj) = (pj.lon, pj.lat);

        if (yi > point.lat) != (yj > point.lat)
            && point.lon < (xj - xi) * (point.lat - yi) / (yj - yi) + xi
        {
            inside = !inside;
        }
    }

    inside
}

/// Checks whether segment `p0`-`p1` intersects any edge of `ring`.
pub fn segment_intersects_ring(p0: Point, p1: Point, ring: &[Point]) -> bool {
    ring_edges(ring).any(|(q0, q1)| segments_intersect(p0, p1, q0, q1))
}

/// Checks whether `point` lies inside the outer ring of `polygon`.
pub fn point_in_polygon(point: Point, polygon: &Polygon) -> bool {
    point_in_ring(point, polygon.exterior())
}

/// Checks whether segment `p0`-`p1` intersects the outer ring of `polygon`.
pub fn segment_intersects_polygon(p0: Point, p1: Point, polygon: &Polygon) -> bool {
    segment_intersects_ring(p0, p1, polygon.exterior())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Polygon {
        Polygon::from_exterior(vec![
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
            Point::new(min, min),
        ])
    }

    #[test]
    fn transversal_segments_intersect() {
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 0.0),
        ));
    }

    #[test]
    fn disjoint_segments_do_not_intersect() {
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(3.0, 0.0),
            Point::new(2.0, 5.0),
        ));
    }

    #[test]
    fn touching_segments_intersect() {
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ));
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 2.0),
        ));
    }

    #[test]
    fn collinear_overlapping_segments_do_not_intersect() {
        // Known approximation: overlapping collinear segments are missed
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(3.0, 0.0),
        ));
    }

    #[test]
    fn point_in_square() {
        let sq = square(0.0, 2.0);
        assert!(point_in_polygon(Point::new(1.0, 1.0), &sq));
        assert!(point_in_polygon(Point::new(0.1, 1.9), &sq));
        assert!(!point_in_polygon(Point::new(3.0, 1.0), &sq));
        assert!(!point_in_polygon(Point::new(1.0, -0.5), &sq));
        assert!(!point_in_polygon(Point::new(-1.0, -1.0), &sq));
    }

    #[test]
    fn point_in_unclosed_ring() {
        // The closing edge is implied
        let triangle = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ];
        assert!(point_in_ring(Point::new(1.0, 1.0), &triangle));
        assert!(!point_in_ring(Point::new(3.0, 3.0), &triangle));
    }

    #[test]
    fn boundary_point_is_stable() {
        let sq = square(0.0, 2.0);
        for p in [Point::new(0.0, 0.0), Point::new(2.0, 1.0), Point::new(1.0, 2.0)] {
            let first = point_in_polygon(p, &sq);
            for _ in 0..3 {
                assert_eq!(point_in_polygon(p, &sq), first);
            }
        }
    }

    #[test]
    fn holes_are_ignored() {
        let mut with_hole = square(0.0, 4.0);
        with_hole.rings.push(square(1.0, 3.0).rings.remove(0));
        assert!(point_in_polygon(Point::new(2.0, 2.0), &with_hole));
    }

    #[test]
    fn empty_polygon() {
        let empty = Polygon::default();
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &empty));
        assert!(!segment_intersects_polygon(
            Point::new(-1.0, -1.0),
            Point::new(1.0, 1.0),
            &empty
        ));
    }

    #[test]
    fn segment_crossing_square() {
        let sq = square(0.0, 2.0);
        assert!(segment_intersects_polygon(
            Point::new(-1.0, 1.0),
            Point::new(3.0, 1.0),
            &sq
        ));
        assert!(segment_intersects_polygon(
            Point::new(-1.0, 1.0),
            Point::new(1.0, 1.0),
            &sq
        ));
        assert!(!segment_intersects_polygon(
            Point::new(-1.0, 3.0),
            Point::new(3.0, 3.5),
            &sq
        ));
        // Entirely inside - no boundary is crossed
        assert!(!segment_intersects_polygon(
            Point::new(0.5, 0.5),
            Point::new(1.5, 1.0),
            &sq
        ));
    }
}
