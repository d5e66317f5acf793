// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Reasons why [find_evacuation_route](crate::find_evacuation_route) did not produce a route.
///
/// None of these indicate a fault; they are regular "not found" outcomes
/// which callers are expected to present to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No graph vertex lies within the snap tolerance of the start position.
    #[error("no safe road near the start position")]
    NoVertexNearStart,

    /// No graph vertex lies within the snap tolerance of the end position.
    #[error("no safe road near the end position")]
    NoVertexNearEnd,

    /// Both positions were snapped to the graph, but no safe path connects them.
    #[error("no safe path between the start and end positions")]
    NoPath,
}
