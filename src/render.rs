// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Presenting routes as [GeoJSON](https://geojson.org/), styled for
//! [geojson.io](http://geojson.io/).

use std::fmt::Write;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::{Path, Point, Polygon, Road};

const GEOJSON_IO_PREFIX: &str = "http://geojson.io/#data=data:application/json,";

fn position(p: Point) -> Vec<f64> {
    vec![p.lon, p.lat]
}

fn line(points: &[Point]) -> Value {
    Value::LineString(points.iter().map(|&p| position(p)).collect())
}

fn feature(value: Value, properties: serde_json::Value) -> Feature {
    let properties: Option<JsonObject> = match properties {
        serde_json::Value::Object(o) => Some(o),
        _ => None,
    };

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties,
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Appends the path line (only for paths with at least 2 points)
/// and its start and end markers.
fn push_path_features(features: &mut Vec<Feature>, path: &Path) {
    if path.points.len() > 1 {
        features.push(feature(
            line(&path.points),
            json!({"type": "escape_path", "stroke": "#00ff00", "stroke-width": 4}),
        ));
    }

    if let (Some(&start), Some(&end)) = (path.points.first(), path.points.last()) {
        features.push(feature(
            Value::Point(position(start)),
            json!({"type": "start_point", "marker-color": "#00ff00"}),
        ));
        features.push(feature(
            Value::Point(position(end)),
            json!({"type": "end_point", "marker-color": "#ff0000"}),
        ));
    }
}

/// Creates a FeatureCollection with only the path and its endpoints.
pub fn route_collection(path: &Path) -> FeatureCollection {
    let mut features = Vec::new();
    push_path_features(&mut features, path);
    collection(features)
}

/// Creates a FeatureCollection with all roads, all flood zones,
/// the path and its endpoints - in that order.
pub fn full_collection<'a, Z>(roads: &[Road], zones: Z, path: &Path) -> FeatureCollection
where
    Z: IntoIterator<Item = &'a Polygon>,
{
    let mut features: Vec<Feature> = roads
        .iter()
        .map(|road| {
            feature(
                line(&road.points),
                json!({"type": "road", "stroke": "#3887be", "stroke-width": 2}),
            )
        })
        .collect();

    features.extend(zones.into_iter().map(|zone| {
        let rings: Vec<Vec<Vec<f64>>> = zone
            .rings
            .iter()
            .map(|ring| ring.iter().map(|&p| position(p)).collect::<Vec<_>>())
            .collect();

        feature(
            Value::Polygon(rings),
            json!({
                "type": "flood_zone",
                "fill": "#e55e5e",
                "fill-opacity": 0.5,
                "stroke": "#e55e5e",
                "stroke-width": 1
            }),
        )
    }));

    push_path_features(&mut features, path);
    collection(features)
}

/// Serializes a FeatureCollection into compact JSON.
pub fn to_json_string(fc: &FeatureCollection) -> Result<String, serde_json::Error> {
    serde_json::to_string(fc)
}

/// Encodes `s` as `application/x-www-form-urlencoded`: ASCII alphanumerics and `.-*_`
/// are kept, spaces become `+` and every other byte is percent-encoded.
fn form_urlencode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() * 3);

    for b in s.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' | b'*' | b'_' => {
                encoded.push(b as char)
            }
            b' ' => encoded.push('+'),
            _ => {
                // Writing into a String can't fail
                let _ = write!(encoded, "%{:02X}", b);
            }
        }
    }

    encoded
}

/// Builds a [geojson.io](http://geojson.io/) link which displays the provided collection.
pub fn geojson_io_url(fc: &FeatureCollection) -> Result<String, serde_json::Error> {
    let data = to_json_string(fc)?;
    Ok(format!("{}{}", GEOJSON_IO_PREFIX, form_urlencode(&data)))
}
