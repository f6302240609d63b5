use geo::{BoundingRect, Coord, LineString};

/// Center of the route's bounding box: the midpoint of min/max x and y.
/// Used as the representative point for UTM zone selection.
#[inline]
pub fn bbox_center(route: &LineString<f64>) -> Option<Coord<f64>> {
    route.bounding_rect().map(|rect| rect.center())
}
