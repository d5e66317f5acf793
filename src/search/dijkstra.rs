// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{Edge, Point, RouteGraph, VertexId};

/// Ordered sequence of vertices, from the source to the destination,
/// together with the sum of all traversed edge weights (in kilometers).
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub points: Vec<Point>,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: VertexId,
    cost: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.cost.total_cmp(&self.cost)
    }
}

fn reconstruct_path(
    g: &RouteGraph,
    came_from: &[Option<VertexId>],
    mut last: VertexId,
) -> Vec<Point> {
    let mut path = vec![last];

    while let Some(v) = came_from[last.index()] {
        path.push(v);
        last = v;
    }

    path.reverse();
    path.into_iter().filter_map(|v| g.point(v)).collect()
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the shortest path between two vertices of the provided graph.
///
/// Returns `None` if either `source` or `destination` is not a vertex of the graph,
/// or if there is no path between them. If `source == destination`, a single-vertex
/// path with zero weight is returned.
///
/// When multiple paths have the same weight, which one is returned is unspecified.
pub fn shortest_path(g: &RouteGraph, source: Point, destination: Point) -> Option<Path> {
    let from_id = g.vertex_id(source)?;
    let to_id = g.vertex_id(destination)?;

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: Vec<Option<VertexId>> = vec![None; g.len()];
    let mut known_costs: Vec<f64> = vec![f64::INFINITY; g.len()];

    queue.push(QueueItem {
        at: from_id,
        cost: 0.0,
    });
    known_costs[from_id.index()] = 0.0;

    while let Some(item) = queue.pop() {
        if item.at == to_id {
            return Some(Path {
                points: reconstruct_path(g, &came_from, to_id),
                weight: item.cost,
            });
        }

        // Multiple items may be kept in the queue for the same vertex - skip outdated ones
        if item.cost > known_costs[item.at.index()] {
            continue;
        }

        for &Edge { to, weight } in g.edges(item.at) {
            let neighbor_cost = item.cost + weight;
            if neighbor_cost >= known_costs[to.index()] {
                continue;
            }

            came_from[to.index()] = Some(item.at);
            known_costs[to.index()] = neighbor_cost;
            queue.push(QueueItem {
                at: to,
                cost: neighbor_cost,
            });
        }
    }

    None
}
