use geo::{Coord, Geometry, Line, LineString, MultiLineString, Point};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::error::ProjectionError;
use crate::geom::{bbox_center, resolve, turning_angle};

/// Decimal places kept in emitted angles and distances.
pub const DISPLAY_DECIMALS: i32 = 2;

/// Round `value` to `decimals` places. Only applied when a measurement is emitted.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Turning angle at an interior vertex of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnglePoint {
    /// Index of the interior vertex in the input route.
    pub index: usize,
    /// Vertex location, in the route's CRS.
    pub location: Point<f64>,
    /// Turning angle in degrees within `[0, 180]`, rounded to two decimals.
    pub angle_degrees: f64,
}

/// Ground length of one segment of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthSegment {
    /// Index of the segment's start vertex in the input route.
    pub index: usize,
    /// Segment endpoints, in the route's CRS.
    pub geometry: Line<f64>,
    /// Ground distance in meters, rounded to two decimals.
    pub distance_meters: f64,
}

/// Angles and segment lengths of one route, in traversal order.
///
/// Always rebuilt from scratch for the current geometry; there is no
/// incremental update. Both collections are empty for a degenerate route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub angle_points: Vec<AnglePoint>,
    pub length_segments: Vec<LengthSegment>,
    /// Sum of full-precision segment lengths in meters, rounded to two decimals.
    pub total_length_meters: f64,
    /// Same sum before rounding, for accumulating across routes.
    #[serde(default)]
    pub(crate) full_length_meters: f64,
}

impl RouteMetrics {
    /// True for a degenerate route (fewer than two vertices).
    #[inline] pub fn is_empty(&self) -> bool { self.length_segments.is_empty() }

    /// Sharpest turn along the route, if it has any interior vertex.
    pub fn max_angle(&self) -> Option<f64> {
        self.angle_points.iter()
            .map(|point| point.angle_degrees)
            .reduce(f64::max)
    }

    /// Route length in meters at full precision.
    #[inline] pub fn unrounded_length_meters(&self) -> f64 { self.full_length_meters }
}

/// Measure a single-part route given in `crs`.
///
/// The route is projected into a metric plane (the identity for metric CRS,
/// otherwise the UTM zone of its bounding-box center), angles and lengths are
/// computed there in full precision, and every emitted geometry is mapped back
/// into `crs`. The input is never modified.
pub fn compute(route: &LineString<f64>, crs: &Crs) -> Result<RouteMetrics, ProjectionError> {
    if route.0.len() < 2 {
        return Ok(RouteMetrics::default());
    }
    let Some(center) = bbox_center(route) else { return Ok(RouteMetrics::default()) };

    let transform = resolve(crs, center)?;
    let projected = route.coords()
        .map(|&coord| transform.forward(coord))
        .collect::<Result<Vec<Coord<f64>>, _>>()?;

    let angle_points = projected.windows(3).enumerate()
        .map(|(i, w)| -> Result<AnglePoint, ProjectionError> {
            let angle = turning_angle(w[0], w[1], w[2]);
            Ok(AnglePoint {
                index: i + 1,
                location: transform.inverse(w[1])?.into(),
                angle_degrees: round_to(angle, DISPLAY_DECIMALS),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut total_length = 0.0;
    let length_segments = projected.windows(2).enumerate()
        .map(|(i, w)| -> Result<LengthSegment, ProjectionError> {
            let distance = (w[1].x - w[0].x).hypot(w[1].y - w[0].y);
            total_length += distance;
            Ok(LengthSegment {
                index: i,
                geometry: Line::new(transform.inverse(w[0])?, transform.inverse(w[1])?),
                distance_meters: round_to(distance, DISPLAY_DECIMALS),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "[compute] {} vertices in {crs} via {} -> {} angles, {} segments, {:.2} m",
        projected.len(), transform.target(), angle_points.len(), length_segments.len(), total_length,
    );

    Ok(RouteMetrics {
        angle_points,
        length_segments,
        total_length_meters: round_to(total_length, DISPLAY_DECIMALS),
        full_length_meters: total_length,
    })
}

/// Measure a multi-part route.
///
/// Only the first part is measured; later parts are ignored.
pub fn compute_multi(route: &MultiLineString<f64>, crs: &Crs) -> Result<RouteMetrics, ProjectionError> {
    let Some(first) = route.0.first() else { return Ok(RouteMetrics::default()) };
    if route.0.len() > 1 {
        debug!("[compute_multi] measuring first of {} parts, ignoring the rest", route.0.len());
    }
    compute(first, crs)
}

/// Measure any line-like geometry. Non-line geometries yield empty metrics.
pub fn compute_geometry(geometry: &Geometry<f64>, crs: &Crs) -> Result<RouteMetrics, ProjectionError> {
    match geometry {
        Geometry::LineString(route) => compute(route, crs),
        Geometry::MultiLineString(route) => compute_multi(route, crs),
        Geometry::Line(line) => compute(&LineString::from(vec![line.start, line.end]), crs),
        _ => {
            debug!("[compute_geometry] skipping non-line geometry");
            Ok(RouteMetrics::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo::{line_string, point};

    fn metric() -> Crs { Crs::from_epsg(32631).unwrap() }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(179.999, 2), 180.0);
        assert_eq!(round_to(0.004, 2), 0.0);
    }

    #[test]
    fn degenerate_routes_are_empty() {
        let empty = compute(&LineString::new(vec![]), &metric()).unwrap();
        assert!(empty.is_empty());
        assert!(empty.angle_points.is_empty());

        let single = compute(&line_string![(x: 1.0, y: 1.0)], &metric()).unwrap();
        assert_eq!(single, RouteMetrics::default());
    }

    #[test]
    fn two_vertices_give_one_segment_and_no_angle() {
        let metrics = compute(&line_string![(x: 0.0, y: 0.0), (x: 3.0, y: 4.0)], &metric()).unwrap();
        assert!(metrics.angle_points.is_empty());
        assert_eq!(metrics.length_segments.len(), 1);
        assert_eq!(metrics.length_segments[0].distance_meters, 5.0);
        assert_eq!(metrics.length_segments[0].geometry, Line::new((0.0, 0.0), (3.0, 4.0)));
        assert_eq!(metrics.max_angle(), None);
    }

    #[test]
    fn collinear_right_angle_and_reversal() {
        let straight = compute(&line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)], &metric()).unwrap();
        assert_eq!(straight.angle_points[0].angle_degrees, 0.0);
        assert_eq!(straight.angle_points[0].location, point!(x: 1.0, y: 0.0));

        let right = compute(&line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)], &metric()).unwrap();
        assert_eq!(right.angle_points[0].angle_degrees, 90.0);

        let reversal = compute(&line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 0.0, y: 0.0)], &metric()).unwrap();
        assert_eq!(reversal.angle_points[0].angle_degrees, 180.0);
    }

    #[test]
    fn total_length_accumulates_before_rounding() {
        // Three segments of 0.004 m each: rounded individually they are 0.0,
        // accumulated in full precision they make 0.01 (0.012 rounded).
        let route = line_string![(x: 0.0, y: 0.0), (x: 0.004, y: 0.0), (x: 0.008, y: 0.0), (x: 0.012, y: 0.0)];
        let metrics = compute(&route, &metric()).unwrap();
        assert!(metrics.length_segments.iter().all(|segment| segment.distance_meters == 0.0));
        assert_abs_diff_eq!(metrics.total_length_meters, 0.01);
        assert_abs_diff_eq!(metrics.unrounded_length_meters(), 0.012, epsilon = 1e-12);
    }

    #[test]
    fn duplicate_vertices_measure_zero() {
        let route = line_string![(x: 0.0, y: 0.0), (x: 5.0, y: 5.0), (x: 5.0, y: 5.0), (x: 10.0, y: 5.0)];
        let metrics = compute(&route, &metric()).unwrap();
        assert_eq!(metrics.length_segments[1].distance_meters, 0.0);
        assert_eq!(metrics.angle_points.len(), 2);
    }

    #[test]
    fn multi_part_routes_measure_only_the_first_part() {
        let route = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)],
            line_string![(x: 100.0, y: 0.0), (x: 100.0, y: 50.0), (x: 0.0, y: 50.0)],
        ]);
        let metrics = compute_multi(&route, &metric()).unwrap();
        assert_eq!(metrics.length_segments.len(), 1);
        assert_eq!(metrics.total_length_meters, 10.0);

        assert!(compute_multi(&MultiLineString::new(vec![]), &metric()).unwrap().is_empty());
    }

    #[test]
    fn geometry_dispatch() {
        let line = Geometry::Line(Line::new((0.0, 0.0), (0.0, 2.5)));
        assert_eq!(compute_geometry(&line, &metric()).unwrap().total_length_meters, 2.5);

        let point = Geometry::Point(point!(x: 1.0, y: 1.0));
        assert!(compute_geometry(&point, &metric()).unwrap().is_empty());
    }

    #[test]
    fn input_route_is_left_untouched() {
        let route = line_string![(x: 2.0, y: 48.0), (x: 2.01, y: 48.0), (x: 2.01, y: 48.01)];
        let before = route.clone();
        compute(&route, &Crs::wgs84()).unwrap();
        assert_eq!(route, before);
    }
}
