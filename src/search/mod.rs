// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod dijkstra;
mod error;
mod query;

pub use dijkstra::{shortest_path, Path};
pub use error::RouteError;
pub use query::{find_evacuation_route, Route, RouteQuery, DEFAULT_SNAP_TOLERANCE_KM};
