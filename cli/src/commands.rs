pub mod measure;
pub mod zone;
