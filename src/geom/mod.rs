mod algorithm;
mod bbox;

pub use algorithm::{azimuth, resolve, turning_angle, Transform, UtmZone};
pub use bbox::bbox_center;
