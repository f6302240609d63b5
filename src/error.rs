use thiserror::Error;

/// Failure to resolve a CRS or to carry a coordinate through a transform.
///
/// Projection failures are deterministic functions of their input, so none of
/// these are worth retrying. Each variant names the CRS (and, for transform
/// failures, the coordinate) involved so the host can report it.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The descriptor is not an authority code or PROJ.4 string we can resolve.
    #[error("unknown CRS descriptor `{descriptor}`")]
    UnknownCrs { descriptor: String },

    /// The PROJ.4 definition was rejected by the projection library.
    #[error("invalid PROJ.4 definition for {crs}: `{definition}`")]
    InvalidDefinition {
        crs: String,
        definition: String,
        #[source]
        source: proj4rs::errors::Error,
    },

    /// The projection library failed while transforming a coordinate.
    #[error("transform {from} -> {to} failed at ({x}, {y})")]
    Transform {
        from: String,
        to: String,
        x: f64,
        y: f64,
        #[source]
        source: proj4rs::errors::Error,
    },

    /// The transform produced NaN or infinite coordinates.
    #[error("transform {from} -> {to} produced non-finite coordinates at ({x}, {y})")]
    NonFinite { from: String, to: String, x: f64, y: f64 },
}

impl ProjectionError {
    pub(crate) fn unknown(descriptor: impl Into<String>) -> Self {
        Self::UnknownCrs { descriptor: descriptor.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_crs_names_the_descriptor() {
        let err = ProjectionError::unknown("EPSG:999999");
        assert_eq!(err.to_string(), "unknown CRS descriptor `EPSG:999999`");
    }

    #[test]
    fn non_finite_names_crs_pair_and_coordinate() {
        let err = ProjectionError::NonFinite {
            from: "EPSG:4326".into(),
            to: "EPSG:32631".into(),
            x: 3.0,
            y: f64::NAN,
        };
        let message = err.to_string();
        assert!(message.contains("EPSG:4326 -> EPSG:32631"));
        assert!(message.contains("(3, NaN)"));
    }
}
