// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Flood-safe evacuation routing over [GeoJSON](https://geojson.org/) road networks.
//!
//! Roads (polylines) are turned into a weighted undirected graph, from which every
//! point lying inside a flood zone and every segment crossing a flood zone boundary
//! is excluded. Routes are found with Dijkstra's algorithm between the graph vertices
//! nearest to the requested positions.
//!
//! # Example
//!
//! ```no_run
//! let options = evacroute::loader::Options::default();
//! let roads = evacroute::loader::load_roads_from_file(&options, "roads.geojson")
//!     .expect("failed to load roads");
//! let zones = evacroute::loader::load_flood_zones_from_file(&options, "flood_zones.geojson")
//!     .expect("failed to load flood zones");
//!
//! let hazards = evacroute::FloodZones::new(zones);
//! let g = evacroute::build_graph(&roads, &hazards);
//!
//! let query = evacroute::RouteQuery::new(
//!     evacroute::Point::new(21.7643873, 49.6833371),
//!     evacroute::Point::new(21.7602742, 49.6853010),
//! );
//! let route = evacroute::find_evacuation_route(&g, &query).expect("failed to find route");
//!
//! println!("Route: {:?}", route.path.points);
//! ```

mod builder;
mod distance;
mod geometry;
mod graph;
mod hazard;
pub mod loader;
pub mod render;
mod search;

pub use builder::{build_graph, GraphBuilder};
pub use distance::haversine_distance_km;
pub use geometry::{
    point_in_polygon, point_in_ring, segment_intersects_polygon, segment_intersects_ring,
    segments_intersect, Polygon, Road,
};
pub use graph::{RouteGraph, VertexId};
pub use hazard::{FloodZones, HazardIndex};
pub use search::{
    find_evacuation_route, shortest_path, Path, Route, RouteError, RouteQuery,
    DEFAULT_SNAP_TOLERANCE_KM,
};

use std::hash::{Hash, Hasher};

/// Represents a position on Earth, in decimal degrees.
///
/// Points double as [RouteGraph] vertex identities. Two points are equal only if
/// their coordinates are bit-for-bit identical; no tolerance is applied, so
/// slightly misaligned road ends will not be merged into a single vertex.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[inline]
    fn bits(&self) -> (u64, u64) {
        (self.lon.to_bits(), self.lat.to_bits())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

/// Represents one side of an undirected connection in a [RouteGraph].
///
/// `weight` is the great-circle distance between both ends, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: VertexId,
    pub weight: f64,
}
