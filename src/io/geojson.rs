use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, Geometry, LineString, MultiLineString};
use log::warn;
use serde_json::{json, Value};

use crate::crs::Crs;
use crate::io::fs::write_atomic;
use crate::route::{LayerMetrics, RouteFeature, RouteLayer};

/// Layer name written into the angle point FeatureCollection.
pub const ANGLE_LAYER_NAME: &str = "route_angles";

/// Layer name written into the segment length FeatureCollection.
pub const SEGMENT_LAYER_NAME: &str = "route_segments";

/// Read a route layer from GeoJSON bytes.
///
/// Accepts a FeatureCollection, a single Feature, or a bare geometry. The CRS
/// is `crs_override` if given, else the legacy `crs` member, else EPSG:4326.
/// Non-line features are skipped with a warning.
pub fn read_route_layer(bytes: &[u8], crs_override: Option<Crs>) -> Result<RouteLayer> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;

    let crs = match crs_override {
        Some(crs) => crs,
        None => declared_crs(&value)?.unwrap_or_else(Crs::wgs84),
    };
    let mut layer = RouteLayer::new(crs);

    match value["type"].as_str() {
        Some("FeatureCollection") => {
            let features = value["features"].as_array()
                .ok_or_else(|| anyhow!("[read_route_layer] FeatureCollection has no `features` array"))?;
            for (idx, feature) in features.iter().enumerate() {
                if let Some(route) = parse_feature(feature, idx)? { layer.push(route) }
            }
        }
        Some("Feature") => {
            if let Some(route) = parse_feature(&value, 0)? { layer.push(route) }
        }
        Some(kind) => match parse_geometry(&value)? {
            Some(geometry) => layer.push(RouteFeature::new(None, geometry)),
            None => warn!("[read_route_layer] skipping {kind} geometry, only line routes are measured"),
        },
        None => bail!("[read_route_layer] missing GeoJSON `type` member"),
    }

    Ok(layer)
}

/// Read a route layer from a GeoJSON file.
pub fn read_route_layer_from_path(path: &Path, crs_override: Option<Crs>) -> Result<RouteLayer> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    read_route_layer(&bytes, crs_override)
        .with_context(|| format!("Failed to load routes from {}", path.display()))
}

/// Angle points as a FeatureCollection of `Point` features with an `angle` property.
pub fn angle_points_to_geojson(metrics: &LayerMetrics) -> Value {
    let features = metrics.angle_points()
        .map(|(route, point)| json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [point.location.x(), point.location.y()],
            },
            "properties": {
                "angle": point.angle_degrees,
                "route": route.id,
                "index": point.index,
            },
        }))
        .collect();
    feature_collection(ANGLE_LAYER_NAME, &metrics.crs, features)
}

/// Length segments as a FeatureCollection of `LineString` features with a `distance_m` property.
pub fn length_segments_to_geojson(metrics: &LayerMetrics) -> Value {
    let features = metrics.length_segments()
        .map(|(route, segment)| json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [
                    [segment.geometry.start.x, segment.geometry.start.y],
                    [segment.geometry.end.x, segment.geometry.end.y],
                ],
            },
            "properties": {
                "distance_m": segment.distance_meters,
                "route": route.id,
                "index": segment.index,
            },
        }))
        .collect();
    feature_collection(SEGMENT_LAYER_NAME, &metrics.crs, features)
}

/// Serialize a GeoJSON value to `path`, replacing any previous file atomically.
pub fn write_geojson(path: &Path, value: &Value) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("Failed to serialize GeoJSON to bytes")?;
    write_atomic(path, &bytes)
}

fn feature_collection(name: &str, crs: &Crs, features: Vec<Value>) -> Value {
    let mut collection = json!({
        "type": "FeatureCollection",
        "name": name,
        "features": features,
    });

    // RFC 7946 output is implicitly EPSG:4326; anything else keeps the legacy member.
    match crs.epsg() {
        Some(4326) => {}
        Some(code) => {
            collection["crs"] = json!({
                "type": "name",
                "properties": { "name": format!("urn:ogc:def:crs:EPSG::{code}") },
            });
        }
        None => warn!("[feature_collection] {name}: CRS `{crs}` has no EPSG code, omitting `crs` member"),
    }
    collection
}

/// The CRS named by a legacy `crs` member, if present.
fn declared_crs(value: &Value) -> Result<Option<Crs>> {
    let Some(name) = value["crs"]["properties"]["name"].as_str() else { return Ok(None) };
    let crs = name.parse::<Crs>()
        .with_context(|| format!("[read_route_layer] unsupported GeoJSON crs `{name}`"))?;
    Ok(Some(crs))
}

fn parse_feature(feature: &Value, idx: usize) -> Result<Option<RouteFeature>> {
    let id = match &feature["id"] {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    };

    let geometry = &feature["geometry"];
    if geometry.is_null() {
        warn!("[read_route_layer] feature {idx} has no geometry, skipping");
        return Ok(None);
    }

    let parsed = parse_geometry(geometry)
        .with_context(|| format!("[read_route_layer] feature {idx} has invalid geometry"))?;
    match parsed {
        Some(geometry) => Ok(Some(RouteFeature { id, geometry })),
        None => {
            warn!("[read_route_layer] feature {idx} is not a line, skipping");
            Ok(None)
        }
    }
}

/// Parse a GeoJSON geometry object. `None` for geometry types that are not routes.
fn parse_geometry(geometry: &Value) -> Result<Option<Geometry<f64>>> {
    let coords = &geometry["coordinates"];
    match geometry["type"].as_str() {
        Some("LineString") => Ok(Some(Geometry::LineString(parse_line_string(coords)?))),
        Some("MultiLineString") => {
            let parts = coords.as_array()
                .ok_or_else(|| anyhow!("MultiLineString coordinates must be an array"))?
                .iter()
                .map(parse_line_string)
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(Geometry::MultiLineString(MultiLineString::new(parts))))
        }
        Some("Point" | "MultiPoint" | "Polygon" | "MultiPolygon" | "GeometryCollection") => Ok(None),
        Some(other) => bail!("unsupported GeoJSON geometry type `{other}`"),
        None => bail!("geometry has no `type` member"),
    }
}

fn parse_line_string(coords: &Value) -> Result<LineString<f64>> {
    let positions = coords.as_array()
        .ok_or_else(|| anyhow!("LineString coordinates must be an array"))?;
    positions.iter()
        .map(parse_position)
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

/// Parse `[x, y, ...]`; any third (elevation) ordinate is dropped.
fn parse_position(position: &Value) -> Result<Coord<f64>> {
    let ordinates = position.as_array()
        .ok_or_else(|| anyhow!("position must be an array, got {position}"))?;
    match ordinates.as_slice() {
        [x, y, ..] => {
            let x = x.as_f64().ok_or_else(|| anyhow!("non-numeric x in {position}"))?;
            let y = y.as_f64().ok_or_else(|| anyhow!("non-numeric y in {position}"))?;
            Ok(Coord { x, y })
        }
        _ => bail!("position needs at least two ordinates, got {position}"),
    }
}
