#![doc = "RouteMetrics public API: turning angles and ground segment lengths of route polylines"]
mod crs;
mod error;
mod geom;
pub mod io;
mod route;

#[doc(inline)]
pub use crs::{Crs, Units};

#[doc(inline)]
pub use error::ProjectionError;

#[doc(inline)]
pub use geom::{azimuth, bbox_center, resolve, turning_angle, Transform, UtmZone};

#[doc(inline)]
pub use route::{
    compute, compute_geometry, compute_multi, round_to, AnglePoint, LayerMetrics, LengthSegment, RouteFeature,
    RouteLayer, RouteMeasurement, RouteMetrics, DISPLAY_DECIMALS,
};
