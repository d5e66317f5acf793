// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{shortest_path, Path, RouteError};
use crate::{Point, RouteGraph};

/// Default maximum distance between a query position and the graph vertex
/// it gets snapped to, in kilometers (50 meters).
pub const DEFAULT_SNAP_TOLERANCE_KM: f64 = 0.05;

/// Request for an evacuation route between two arbitrary positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    pub start: Point,
    pub end: Point,

    /// How far (in kilometers) `start` and `end` may be from the graph vertices
    /// they are snapped to.
    pub snap_tolerance_km: f64,
}

impl RouteQuery {
    /// Creates a query with [DEFAULT_SNAP_TOLERANCE_KM].
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            snap_tolerance_km: DEFAULT_SNAP_TOLERANCE_KM,
        }
    }

    pub fn with_snap_tolerance(self, snap_tolerance_km: f64) -> Self {
        Self {
            snap_tolerance_km,
            ..self
        }
    }
}

/// Answer to a [RouteQuery].
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Graph vertex the start position was snapped to.
    pub start: Point,

    /// Graph vertex the end position was snapped to.
    pub end: Point,

    pub path: Path,
}

/// Snaps both query positions to their nearest graph vertices
/// and finds the shortest path between them.
pub fn find_evacuation_route(g: &RouteGraph, query: &RouteQuery) -> Result<Route, RouteError> {
    let start = g
        .find_nearest_vertex(query.start, query.snap_tolerance_km)
        .ok_or(RouteError::NoVertexNearStart)?;

    let end = g
        .find_nearest_vertex(query.end, query.snap_tolerance_km)
        .ok_or(RouteError::NoVertexNearEnd)?;

    log::debug!(
        "snapped {:?} -> {:?} to {:?} -> {:?}",
        query.start,
        query.end,
        start,
        end
    );

    let path = shortest_path(g, start, end).ok_or(RouteError::NoPath)?;
    Ok(Route { start, end, path })
}
