// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use crate::{haversine_distance_km, Edge, Point};

/// Stable index of a vertex inside a [RouteGraph].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub(crate) u32);

impl VertexId {
    /// Id of the vertex stored at the provided arena index.
    ///
    /// # Panics
    ///
    /// Panics if `index` doesn't fit in a `u32`; a graph holds at most `u32::MAX + 1` vertices.
    fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("RouteGraph can't hold more than 2^32 vertices"))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Represents a safe road network as a set of vertices ([Points](Point))
/// and undirected, weighted [Edges](Edge) between them.
///
/// Vertices are stored in an arena, in order of insertion. A RouteGraph can only be
/// created through a [GraphBuilder](crate::GraphBuilder), and is immutable afterwards.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RouteGraph {
    points: Vec<Point>,
    edges: Vec<Vec<Edge>>,
    index: HashMap<Point, VertexId>,
    edge_count: usize,
}

impl RouteGraph {
    /// Returns the number of vertices in the graph.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of undirected edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns an iterator over all vertices in the graph, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Retrieves the [Point] of a vertex with the provided id.
    pub fn point(&self, id: VertexId) -> Option<Point> {
        self.points.get(id.index()).copied()
    }

    /// Retrieves the id of a vertex at exactly the provided position.
    pub fn vertex_id(&self, point: Point) -> Option<VertexId> {
        self.index.get(&point).copied()
    }

    /// Checks if there is a vertex at exactly the provided position.
    pub fn contains(&self, point: Point) -> bool {
        self.index.contains_key(&point)
    }

    /// Gets all [Edges](Edge) incident to the vertex with a given id.
    pub fn edges(&self, id: VertexId) -> &[Edge] {
        self.edges
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Gets the weight of an edge between two positions.
    /// If such an edge doesn't exist, returns `None`.
    pub fn edge_weight(&self, a: Point, b: Point) -> Option<f64> {
        let a = self.vertex_id(a)?;
        let b = self.vertex_id(b)?;
        self.edges(a)
            .iter()
            .find_map(|e| if e.to == b { Some(e.weight) } else { None })
    }

    /// Finds the closest vertex to `target`, but only if it is not further than
    /// `max_distance_km`.
    ///
    /// This function computes the distance to every vertex in the graph.
    /// If multiple vertices are equally close, the one inserted first is returned;
    /// callers should not rely on any particular choice among them.
    pub fn find_nearest_vertex(&self, target: Point, max_distance_km: f64) -> Option<Point> {
        let mut nearest: Option<(f64, Point)> = None;

        for &p in &self.points {
            let distance = haversine_distance_km(p, target);
            let closer = nearest.map_or(true, |(best, _)| distance < best);
            if closer && distance <= max_distance_km {
                nearest = Some((distance, p));
            }
        }

        nearest.map(|(_, p)| p)
    }

    /// Inserts a vertex, unless one already exists at the same position.
    pub(crate) fn insert_vertex(&mut self, point: Point) -> VertexId {
        match self.index.entry(point) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = VertexId::from_index(self.points.len());
                self.points.push(point);
                self.edges.push(Vec::default());
                e.insert(id);
                id
            }
        }
    }

    /// Creates an undirected edge between two existing vertices.
    ///
    /// Returns `false` without touching the graph if such an edge already exists,
    /// or if both ends are the same vertex.
    pub(crate) fn insert_edge(&mut self, a: VertexId, b: VertexId, weight: f64) -> bool {
        debug_assert!(a.index() < self.points.len());
        debug_assert!(b.index() < self.points.len());
        debug_assert!(weight >= 0.0);

        if a == b || self.edges[a.index()].iter().any(|e| e.to == b) {
            return false;
        }

        self.edges[a.index()].push(Edge { to: b, weight });
        self.edges[b.index()].push(Edge { to: a, weight });
        self.edge_count += 1;
        true
    }
}
