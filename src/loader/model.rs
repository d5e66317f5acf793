// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use geojson::{Geometry, Value};

use super::Error;
use crate::{Point, Polygon, Road};

/// Union over all GeoJSON geometries understood by the router.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Road(Road),
    Zone(Polygon),
}

fn to_point(position: &[f64]) -> Result<Point, Error> {
    match position {
        [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Ok(Point::new(*lon, *lat)),
        [_, _, ..] => Err(Error::NonFiniteCoordinate),
        _ => Err(Error::InvalidPosition(position.len())),
    }
}

fn to_points(positions: &[Vec<f64>]) -> Result<Vec<Point>, Error> {
    positions.iter().map(|p| to_point(p)).collect()
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon, Error> {
    let rings = rings
        .iter()
        .map(|ring| to_points(ring))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(rings))
}

/// Converts a GeoJSON geometry into [Features](Feature), appending them to `out`.
///
/// LineStrings and MultiLineStrings become roads, Polygons and MultiPolygons become
/// flood zones, GeometryCollections are flattened, and all other geometries are ignored.
pub(super) fn extend_from_geometry(out: &mut Vec<Feature>, g: &Geometry) -> Result<(), Error> {
    match &g.value {
        Value::LineString(line) => out.push(Feature::Road(Road::new(to_points(line)?))),

        Value::MultiLineString(lines) => {
            for line in lines {
                out.push(Feature::Road(Road::new(to_points(line)?)));
            }
        }

        Value::Polygon(rings) => out.push(Feature::Zone(to_polygon(rings)?)),

        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                out.push(Feature::Zone(to_polygon(rings)?));
            }
        }

        Value::GeometryCollection(geometries) => {
            for g in geometries {
                extend_from_geometry(out, g)?;
            }
        }

        Value::Point(_) | Value::MultiPoint(_) => {
            log::debug!("ignoring point geometry");
        }
    }

    Ok(())
}
