//! Host-side adapters: reading route layers and writing the two output layers.
//!
//! - `geojson` - GeoJSON route input and angle/segment FeatureCollection output
//! - `fs` - directory checks and atomic file replacement

pub mod fs;
pub mod geojson;

pub use geojson::{
    angle_points_to_geojson, length_segments_to_geojson, read_route_layer, read_route_layer_from_path,
    write_geojson, ANGLE_LAYER_NAME, SEGMENT_LAYER_NAME,
};
