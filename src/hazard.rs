// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::geometry::{point_in_polygon, segment_intersects_polygon, Polygon};
use crate::Point;

/// Answers safety questions about positions and segments during graph building.
///
/// [FloodZones] is a simple linear-scan implementation; a spatially-indexed one
/// can be plugged into [build_graph](crate::build_graph) without any other changes.
pub trait HazardIndex {
    /// Returns `true` if `point` lies inside any hazardous area.
    fn contains(&self, point: Point) -> bool;

    /// Returns `true` if the straight segment `p0`-`p1` crosses the boundary
    /// of any hazardous area.
    fn crosses(&self, p0: Point, p1: Point) -> bool;
}

/// Set of flood zone [Polygons](Polygon). Membership in any zone marks a position as unsafe.
///
/// Every query checks every zone, which is fine for tens of zones.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FloodZones {
    zones: Vec<Polygon>,
}

impl FloodZones {
    pub fn new(zones: Vec<Polygon>) -> Self {
        Self { zones }
    }

    /// Returns the number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Returns an iterator over all zones.
    pub fn iter(&self) -> impl Iterator<Item = &Polygon> {
        self.zones.iter()
    }
}

impl FromIterator<Polygon> for FloodZones {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl HazardIndex for FloodZones {
    fn contains(&self, point: Point) -> bool {
        self.zones.iter().any(|zone| point_in_polygon(point, zone))
    }

    fn crosses(&self, p0: Point, p1: Point) -> bool {
        self.zones
            .iter()
            .any(|zone| segment_intersects_polygon(p0, p1, zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> FloodZones {
        [
            Polygon::from_exterior(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ]),
            Polygon::from_exterior(vec![
                Point::new(5.0, 5.0),
                Point::new(6.0, 5.0),
                Point::new(6.0, 6.0),
                Point::new(5.0, 6.0),
            ]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn contains_checks_all_zones() {
        let z = zones();
        assert_eq!(z.len(), 2);
        assert!(z.contains(Point::new(0.5, 0.5)));
        assert!(z.contains(Point::new(5.5, 5.5)));
        assert!(!z.contains(Point::new(3.0, 3.0)));
    }

    #[test]
    fn crosses_checks_all_zones() {
        let z = zones();
        assert!(z.crosses(Point::new(4.0, 5.5), Point::new(7.0, 5.5)));
        assert!(z.crosses(Point::new(-1.0, 0.5), Point::new(0.5, 0.5)));
        assert!(!z.crosses(Point::new(2.0, 2.0), Point::new(4.0, 4.0)));
    }

    #[test]
    fn empty_index_is_safe() {
        let z = FloodZones::default();
        assert!(z.is_empty());
        assert!(!z.contains(Point::new(0.0, 0.0)));
        assert!(!z.crosses(Point::new(-1.0, -1.0), Point::new(1.0, 1.0)));
    }
}
