// Integration tests for the projection path: UTM zone selection, transform
// round trips, and ground distances measured from geographic input.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use geo::{Coord, LineString, MultiLineString};
use routemetrics::{compute, compute_multi, resolve, Crs, ProjectionError, Transform, UtmZone};

#[test]
fn zone_selection_examples() {
    assert_eq!(UtmZone::from_lon_lat(3.0, 45.0).epsg(), 32631);
    assert_eq!(UtmZone::from_lon_lat(-3.0, -10.0).epsg(), 32730);

    assert_eq!(resolve(&Crs::wgs84(), Coord { x: 3.0, y: 45.0 }).unwrap().target().epsg(), Some(32631));
    assert_eq!(resolve(&Crs::wgs84(), Coord { x: -3.0, y: -10.0 }).unwrap().target().epsg(), Some(32730));
}

#[test]
fn forward_then_inverse_round_trips() {
    let transform = resolve(&Crs::wgs84(), Coord { x: 3.0, y: 45.0 }).unwrap();
    for coord in [
        Coord { x: 3.0, y: 45.0 },
        Coord { x: 1.25, y: 44.5 },
        Coord { x: 5.9, y: 46.1 },
    ] {
        let projected = transform.forward(coord).unwrap();
        let back = transform.inverse(projected).unwrap();
        assert_relative_eq!(back.x, coord.x, max_relative = 1e-6);
        assert_relative_eq!(back.y, coord.y, max_relative = 1e-6);
    }
}

#[test]
fn utm_easting_on_central_meridian_is_false_easting() {
    let transform = Transform::between(&Crs::wgs84(), &Crs::utm(31, true).unwrap()).unwrap();
    let projected = transform.forward(Coord { x: 3.0, y: 0.0 }).unwrap();
    assert_abs_diff_eq!(projected.x, 500_000.0, epsilon = 1e-3);
    assert_abs_diff_eq!(projected.y, 0.0, epsilon = 1e-3);
}

#[test]
fn geographic_segment_is_measured_in_meters() {
    // 0.01 degrees of longitude on the equator, on zone 31's central meridian.
    let route: LineString<f64> = vec![(2.995, 0.0), (3.005, 0.0)].into();
    let metrics = compute(&route, &Crs::wgs84()).unwrap();
    assert_relative_eq!(metrics.length_segments[0].distance_meters, 1113.19, max_relative = 1e-3);

    // 0.01 degrees of latitude around 45N.
    let route: LineString<f64> = vec![(3.0, 45.0), (3.0, 45.01)].into();
    let metrics = compute(&route, &Crs::wgs84()).unwrap();
    assert_relative_eq!(metrics.length_segments[0].distance_meters, 1111.5, max_relative = 2e-3);
}

#[test]
fn geographic_outputs_are_mapped_back_to_degrees() {
    let route: LineString<f64> = vec![(3.0, 0.0), (3.01, 0.0), (3.01, 0.01)].into();
    let metrics = compute(&route, &Crs::wgs84()).unwrap();

    let point = metrics.angle_points[0].location;
    assert_abs_diff_eq!(point.x(), 3.01, epsilon = 1e-7);
    assert_abs_diff_eq!(point.y(), 0.0, epsilon = 1e-7);
    assert_abs_diff_eq!(metrics.angle_points[0].angle_degrees, 90.0, epsilon = 0.5);

    let segment = metrics.length_segments[1].geometry;
    assert_abs_diff_eq!(segment.start.x, 3.01, epsilon = 1e-7);
    assert_abs_diff_eq!(segment.end.y, 0.01, epsilon = 1e-7);
}

#[test]
fn southern_route_uses_southern_zone() {
    let route: LineString<f64> = vec![(-3.0, -10.0), (-2.99, -10.0)].into();
    let metrics = compute(&route, &Crs::wgs84()).unwrap();
    assert_relative_eq!(metrics.length_segments[0].distance_meters, 1096.5, max_relative = 2e-3);
}

#[test]
fn multi_part_geographic_route_measures_first_part() {
    let route = MultiLineString::new(vec![
        vec![(3.0, 45.0), (3.0, 45.01)].into(),
        vec![(10.0, 10.0), (11.0, 11.0)].into(),
    ]);
    let metrics = compute_multi(&route, &Crs::wgs84()).unwrap();
    assert_eq!(metrics.length_segments.len(), 1);
    assert!(metrics.total_length_meters < 1200.0);
}

#[test]
fn non_finite_vertices_are_projection_errors() {
    let route: LineString<f64> = vec![(3.0, 45.0), (f64::NAN, 45.0)].into();
    let err = compute(&route, &Crs::wgs84()).unwrap_err();
    assert!(matches!(err, ProjectionError::NonFinite { .. } | ProjectionError::Transform { .. }));
}

#[test]
fn unknown_crs_is_a_projection_error() {
    let err = "EPSG:12345678".parse::<Crs>().unwrap_err();
    assert!(matches!(err, ProjectionError::UnknownCrs { .. }));
}
