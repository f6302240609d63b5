mod layer;
mod metrics;

pub use layer::{LayerMetrics, RouteFeature, RouteLayer, RouteMeasurement};
pub use metrics::{
    compute, compute_geometry, compute_multi, round_to, AnglePoint, LengthSegment, RouteMetrics, DISPLAY_DECIMALS,
};
