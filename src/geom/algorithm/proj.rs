use std::fmt;

use geo::Coord;
use log::debug;
use proj4rs::{proj::Proj as Proj4, transform::transform};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crs::Crs;
use crate::error::ProjectionError;

/// A UTM zone: number in `[1, 60]` plus hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtmZone {
    pub number: u8,
    pub north: bool,
}

impl UtmZone {
    /// Zone containing a WGS84 longitude/latitude, in degrees.
    /// Longitude 180 falls in zone 60; latitude 0 counts as northern.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        let number = (((lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8;
        Self { number, north: lat >= 0.0 }
    }

    /// WGS84 UTM EPSG code: 326zz (north) / 327zz (south).
    #[inline]
    pub fn epsg(&self) -> u32 {
        let base = if self.north { 32600 } else { 32700 };
        base + u32::from(self.number)
    }

    /// The metric CRS for this zone.
    #[inline]
    pub fn crs(&self) -> Result<Crs, ProjectionError> { Crs::utm(self.number, self.north) }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, if self.north { 'N' } else { 'S' })
    }
}

/// A forward/inverse coordinate transform between a source CRS and a target CRS.
///
/// The transform is fully determined by its `(source, target)` pair: it
/// serializes as that pair and is rebuilt from it on deserialization.
/// Geographic ends are given and returned in degrees.
pub struct Transform {
    source: Crs,
    target: Crs,
    projs: Option<(Proj4, Proj4)>, // None for the identity
}

impl Transform {
    /// The no-op transform on `crs`.
    pub fn identity(crs: Crs) -> Self {
        Self { target: crs.clone(), source: crs, projs: None }
    }

    /// Build the transform from `source` to `target`.
    /// Two CRS describing the same coordinate space give the identity.
    pub fn between(source: &Crs, target: &Crs) -> Result<Self, ProjectionError> {
        if source.same_space(target) {
            return Ok(Self { source: source.clone(), target: target.clone(), projs: None });
        }
        Ok(Self {
            source: source.clone(),
            target: target.clone(),
            projs: Some((build_proj(source)?, build_proj(target)?)),
        })
    }

    #[inline] pub fn source(&self) -> &Crs { &self.source }

    #[inline] pub fn target(&self) -> &Crs { &self.target }

    #[inline] pub fn is_identity(&self) -> bool { self.projs.is_none() }

    /// Map a coordinate from the source CRS into the target CRS.
    pub fn forward(&self, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        match &self.projs {
            None => check_finite(coord, coord, &self.source, &self.target),
            Some((source, target)) => project(coord, (&self.source, source), (&self.target, target)),
        }
    }

    /// Map a coordinate from the target CRS back into the source CRS.
    pub fn inverse(&self, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        match &self.projs {
            None => check_finite(coord, coord, &self.target, &self.source),
            Some((source, target)) => project(coord, (&self.target, target), (&self.source, source)),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("source", &self.source.to_string())
            .field("target", &self.target.to_string())
            .field("identity", &self.is_identity())
            .finish()
    }
}

#[derive(Serialize, Deserialize)]
struct TransformPair {
    source: Crs,
    target: Crs,
}

impl Serialize for Transform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TransformPair { source: self.source.clone(), target: self.target.clone() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Transform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pair = TransformPair::deserialize(deserializer)?;
        Transform::between(&pair.source, &pair.target).map_err(serde::de::Error::custom)
    }
}

/// Resolve the transform from `crs` into a metric plane.
///
/// Metric CRS get the identity. Anything else is projected into the WGS84
/// UTM zone containing `representative_point` (given in `crs`), located via
/// its EPSG:4326 longitude/latitude.
pub fn resolve(crs: &Crs, representative_point: Coord<f64>) -> Result<Transform, ProjectionError> {
    if crs.is_metric() {
        return Ok(Transform::identity(crs.clone()));
    }

    let lon_lat = Transform::between(crs, &Crs::wgs84())?.forward(representative_point)?;
    let zone = UtmZone::from_lon_lat(lon_lat.x, lon_lat.y);
    debug!(
        "[resolve] {crs} center ({:.6}, {:.6}) -> lon/lat ({:.6}, {:.6}) -> UTM {zone} (EPSG:{})",
        representative_point.x, representative_point.y, lon_lat.x, lon_lat.y, zone.epsg(),
    );

    Transform::between(crs, &zone.crs()?)
}

fn build_proj(crs: &Crs) -> Result<Proj4, ProjectionError> {
    Proj4::from_proj_string(crs.definition()).map_err(|source| ProjectionError::InvalidDefinition {
        crs: crs.to_string(),
        definition: crs.definition().to_string(),
        source,
    })
}

/// Run one coordinate through proj4rs. Geographic CRS take radians in and give radians out.
fn project(
    coord: Coord<f64>,
    (from_crs, from): (&Crs, &Proj4),
    (to_crs, to): (&Crs, &Proj4),
) -> Result<Coord<f64>, ProjectionError> {
    let mut point = if from_crs.is_geographic() {
        (coord.x.to_radians(), coord.y.to_radians(), 0.0)
    } else {
        (coord.x, coord.y, 0.0)
    };

    transform(from, to, &mut point).map_err(|source| ProjectionError::Transform {
        from: from_crs.to_string(),
        to: to_crs.to_string(),
        x: coord.x,
        y: coord.y,
        source,
    })?;

    let projected = if to_crs.is_geographic() {
        Coord { x: point.0.to_degrees(), y: point.1.to_degrees() }
    } else {
        Coord { x: point.0, y: point.1 }
    };
    check_finite(coord, projected, from_crs, to_crs)
}

#[inline]
fn check_finite(input: Coord<f64>, output: Coord<f64>, from: &Crs, to: &Crs) -> Result<Coord<f64>, ProjectionError> {
    if output.x.is_finite() && output.y.is_finite() {
        Ok(output)
    } else {
        Err(ProjectionError::NonFinite { from: from.to_string(), to: to.to_string(), x: input.x, y: input.y })
    }
}
