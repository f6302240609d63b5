use geo::Geometry;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::error::ProjectionError;
use crate::route::metrics::{compute_geometry, round_to, AnglePoint, LengthSegment, RouteMetrics, DISPLAY_DECIMALS};

/// One route feature of a line layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteFeature {
    /// Host-side feature id, if any.
    pub id: Option<String>,
    pub geometry: Geometry<f64>,
}

impl RouteFeature {
    pub fn new(id: Option<String>, geometry: impl Into<Geometry<f64>>) -> Self {
        Self { id, geometry: geometry.into() }
    }
}

/// A layer of routes sharing one source CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLayer {
    pub crs: Crs,
    pub routes: Vec<RouteFeature>,
}

/// Metrics of one measured route, tagged with its source feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMeasurement {
    /// Position of the feature in its layer.
    pub feature_index: usize,
    pub id: Option<String>,
    pub metrics: RouteMetrics,
}

/// Output of measuring a whole layer: per-route metrics in feature order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerMetrics {
    pub crs: Crs,
    pub routes: Vec<RouteMeasurement>,
}

impl RouteLayer {
    pub fn new(crs: Crs) -> Self {
        Self { crs, routes: Vec::new() }
    }

    /// Append a route feature.
    pub fn push(&mut self, feature: RouteFeature) { self.routes.push(feature); }

    #[inline] pub fn len(&self) -> usize { self.routes.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.routes.is_empty() }

    /// Measure every route from scratch.
    ///
    /// Each route gets its own UTM zone. Degenerate and non-line features
    /// produce no output. The first projection failure aborts the whole call,
    /// so a caller never sees a partially rebuilt result.
    pub fn measure(&self) -> Result<LayerMetrics, ProjectionError> {
        let mut routes = Vec::with_capacity(self.routes.len());

        for (feature_index, feature) in self.routes.iter().enumerate() {
            let metrics = compute_geometry(&feature.geometry, &self.crs)?;
            if metrics.is_empty() {
                debug!("[measure] feature {feature_index} is degenerate, skipping");
                continue;
            }
            routes.push(RouteMeasurement { feature_index, id: feature.id.clone(), metrics });
        }

        info!("[measure] {} of {} routes measured in {}", routes.len(), self.routes.len(), self.crs);
        Ok(LayerMetrics { crs: self.crs.clone(), routes })
    }
}

impl LayerMetrics {
    /// All angle points across routes, in feature then traversal order.
    pub fn angle_points(&self) -> impl Iterator<Item = (&RouteMeasurement, &AnglePoint)> + '_ {
        self.routes.iter()
            .flat_map(|route| route.metrics.angle_points.iter().map(move |point| (route, point)))
    }

    /// All length segments across routes, in feature then traversal order.
    pub fn length_segments(&self) -> impl Iterator<Item = (&RouteMeasurement, &LengthSegment)> + '_ {
        self.routes.iter()
            .flat_map(|route| route.metrics.length_segments.iter().map(move |segment| (route, segment)))
    }

    /// Total length of all routes in meters, accumulated at full precision
    /// and rounded to two decimals.
    pub fn total_length_meters(&self) -> f64 {
        let total: f64 = self.routes.iter().map(|route| route.metrics.unrounded_length_meters()).sum();
        round_to(total, DISPLAY_DECIMALS)
    }
}
