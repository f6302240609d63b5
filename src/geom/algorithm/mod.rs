mod azimuth;
mod proj;

pub use azimuth::{azimuth, turning_angle};
pub use proj::{resolve, Transform, UtmZone};
