// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{haversine_distance_km, HazardIndex, Point, Road, RouteGraph, VertexId};

/// Position of the road walk, relative to the last accepted point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Cursor {
    /// At the start of a road, or right after a flooded point.
    NoCursor,

    /// Right after a safe point, which was added as a vertex.
    CursorAt(VertexId, Point),
}

/// Outcome of processing a single road point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Transition {
    /// The point is flooded: it is skipped and the road is broken.
    Contained,

    /// The point is safe and starts a new run.
    Start,

    /// The point is safe, but the segment from the previous point crosses a flood zone.
    CrossingEdge { from: VertexId },

    /// The point is safe and connects to the previous point.
    SafeEdge { from: VertexId, weight: f64 },
}

impl Transition {
    /// Classifies `point`, given the current cursor.
    pub(crate) fn classify<H: HazardIndex + ?Sized>(
        cursor: Cursor,
        point: Point,
        hazards: &H,
    ) -> Self {
        if hazards.contains(point) {
            return Self::Contained;
        }

        match cursor {
            Cursor::NoCursor => Self::Start,
            Cursor::CursorAt(from, previous) => {
                if hazards.crosses(previous, point) {
                    Self::CrossingEdge { from }
                } else {
                    Self::SafeEdge {
                        from,
                        weight: haversine_distance_km(previous, point),
                    }
                }
            }
        }
    }
}

/// Converts [Roads](Road) into a [RouteGraph], excluding everything
/// unsafe according to a [HazardIndex].
///
/// The graph is handed off with [GraphBuilder::finish], after which it can no longer change.
pub struct GraphBuilder<'a, H: HazardIndex + ?Sized> {
    g: RouteGraph,
    hazards: &'a H,
    flooded_points: usize,
    crossing_segments: usize,
}

impl<'a, H: HazardIndex + ?Sized> GraphBuilder<'a, H> {
    /// Create a new builder with an empty graph.
    pub fn new(hazards: &'a H) -> Self {
        Self {
            g: RouteGraph::default(),
            hazards,
            flooded_points: 0,
            crossing_segments: 0,
        }
    }

    /// Add all safe points and segments of a road.
    pub fn add_road(&mut self, road: &Road) {
        let mut cursor = Cursor::NoCursor;
        for &point in &road.points {
            cursor = self.add_point(cursor, point);
        }
    }

    fn add_point(&mut self, cursor: Cursor, point: Point) -> Cursor {
        let transition = Transition::classify(cursor, point, self.hazards);
        if transition == Transition::Contained {
            self.flooded_points += 1;
            return Cursor::NoCursor;
        }

        let id = self.g.insert_vertex(point);

        match transition {
            Transition::Contained | Transition::Start => {}

            Transition::CrossingEdge { from } => {
                log::trace!("segment {:?} -> {:?} crosses a flood zone", from, id);
                self.crossing_segments += 1;
            }

            Transition::SafeEdge { from, weight } => {
                if from == id {
                    log::warn!("repeated road point {:?} - not creating a loop", point);
                } else {
                    self.g.insert_edge(from, id, weight);
                }
            }
        }

        Cursor::CursorAt(id, point)
    }

    /// Returns the built graph.
    pub fn finish(self) -> RouteGraph {
        log::debug!(
            "route graph has {} vertices and {} edges ({} flooded points, {} segments crossing flood zones)",
            self.g.len(),
            self.g.edge_count(),
            self.flooded_points,
            self.crossing_segments,
        );
        self.g
    }
}

/// Builds a [RouteGraph] from all provided roads, excluding points inside
/// and segments crossing any hazard.
pub fn build_graph<H: HazardIndex + ?Sized>(roads: &[Road], hazards: &H) -> RouteGraph {
    if roads.is_empty() {
        log::warn!("no roads to build the route graph from");
    }

    let mut b = GraphBuilder::new(hazards);
    roads.iter().for_each(|road| b.add_road(road));
    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FloodZones, Polygon};

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-9),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    fn road(points: &[(f64, f64)]) -> Road {
        Road::new(points.iter().map(|&p| Point::from(p)).collect())
    }

    fn zone(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Polygon {
        Polygon::from_exterior(vec![
            Point::new(min_lon, min_lat),
            Point::new(max_lon, min_lat),
            Point::new(max_lon, max_lat),
            Point::new(min_lon, max_lat),
            Point::new(min_lon, min_lat),
        ])
    }

    #[test]
    fn transitions() {
        let hazards = FloodZones::new(vec![zone(0.5, 0.5, 1.5, 1.5)]);
        let a = Point::new(0.0, 0.0);
        let inside = Point::new(1.0, 1.0);
        let across = Point::new(2.0, 2.0);
        let beside = Point::new(0.0, 2.0);
        let at_a = Cursor::CursorAt(VertexId(0), a);

        assert_eq!(
            Transition::classify(Cursor::NoCursor, inside, &hazards),
            Transition::Contained
        );
        assert_eq!(
            Transition::classify(at_a, inside, &hazards),
            Transition::Contained
        );
        assert_eq!(
            Transition::classify(Cursor::NoCursor, a, &hazards),
            Transition::Start
        );
        assert_eq!(
            Transition::classify(at_a, across, &hazards),
            Transition::CrossingEdge { from: VertexId(0) }
        );
        assert_eq!(
            Transition::classify(at_a, beside, &hazards),
            Transition::SafeEdge {
                from: VertexId(0),
                weight: haversine_distance_km(a, beside)
            }
        );
    }

    #[test]
    fn safe_road() {
        let points = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 2.0)];
        let g = build_graph(&[road(&points)], &FloodZones::default());

        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 3);
        for pair in points.windows(2) {
            let (a, b) = (Point::from(pair[0]), Point::from(pair[1]));
            assert_almost_eq!(
                g.edge_weight(a, b).expect("edge between consecutive points"),
                haversine_distance_km(a, b)
            );
        }
        assert_eq!(g.edge_weight(Point::new(0.0, 0.0), Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn fully_flooded_road() {
        let hazards = FloodZones::new(vec![zone(-1.0, -1.0, 3.0, 3.0)]);
        let g = build_graph(&[road(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])], &hazards);
        assert_eq!(g.len(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn flooded_point_breaks_road() {
        let hazards = FloodZones::new(vec![zone(-0.5, 1.5, 0.5, 2.5)]);
        let g = build_graph(
            &[road(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (0.0, 3.0), (0.0, 4.0)])],
            &hazards,
        );

        assert_eq!(g.len(), 4);
        assert!(!g.contains(Point::new(0.0, 2.0)));
        assert_eq!(g.edge_count(), 2);
        assert!(g.edge_weight(Point::new(0.0, 0.0), Point::new(0.0, 1.0)).is_some());
        assert!(g.edge_weight(Point::new(0.0, 3.0), Point::new(0.0, 4.0)).is_some());
        assert!(g.edge_weight(Point::new(0.0, 1.0), Point::new(0.0, 3.0)).is_none());
    }

    #[test]
    fn crossing_segment_is_skipped_but_walk_continues() {
        // Both ends of the middle segment are safe, but it passes through the zone
        let hazards = FloodZones::new(vec![zone(0.4, 0.4, 0.6, 0.6)]);
        let g = build_graph(
            &[road(&[(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0), (2.0, 1.0)])],
            &hazards,
        );

        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 2);
        assert!(g.edge_weight(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).is_none());
        assert!(g.edge_weight(Point::new(-1.0, -1.0), Point::new(0.0, 0.0)).is_some());
        assert!(g.edge_weight(Point::new(1.0, 1.0), Point::new(2.0, 1.0)).is_some());
    }

    #[test]
    fn shared_points_are_merged() {
        let g = build_graph(
            &[
                road(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]),
                road(&[(1.0, 1.0), (0.0, 1.0)]),
                road(&[(0.0, 1.0), (0.0, 2.0)]),
            ],
            &FloodZones::default(),
        );

        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.edges(g.vertex_id(Point::new(0.0, 1.0)).unwrap()).len(), 3);
    }

    #[test]
    fn repeated_points_do_not_create_loops() {
        let g = build_graph(
            &[road(&[(0.0, 0.0), (0.0, 0.0), (0.0, 1.0)])],
            &FloodZones::default(),
        );
        assert_eq!(g.len(), 2);
        assert_eq!(g.edge_count(), 1);
    }
}
