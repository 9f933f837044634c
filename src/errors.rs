//! Error types produced while transforming, joining or mapping beam models.

use thiserror::Error;

use crate::geometry::BeamNumber;

/// Identifies which set of correspondence points an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelSide {
    /// The local model whose coordinates are being transformed.
    Source,
    /// The model providing the target coordinate frame.
    Target,
}

impl std::fmt::Display for ModelSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSide::Source => f.write_str("source"),
            ModelSide::Target => f.write_str("target"),
        }
    }
}

/// Error returned when fitting or applying a similarity transform fails.
///
/// # Examples
///
/// ```
/// use beamx::{GeometricTransformer, TransformError};
///
/// let transformer = GeometricTransformer::new();
/// let error = transformer
///     .transform_point([1.0, 2.0, 3.0])
///     .expect_err("no transform has been fitted yet");
/// assert_eq!(error, TransformError::NotSet);
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum TransformError {
    /// Returned when a side does not supply exactly three correspondence points.
    #[error("{side} model needs exactly 3 mapping points (received {count})")]
    WrongPointCount {
        /// Side with the wrong number of points.
        side: ModelSide,
        /// Number of points supplied.
        count: usize,
    },
    /// Returned when the first two points of a side coincide.
    #[error("first two {side} mapping points coincide")]
    CoincidentPoints {
        /// Side with the coincident points.
        side: ModelSide,
    },
    /// Returned when the three points of a side lie on one line.
    #[error("{side} mapping points are collinear")]
    CollinearPoints {
        /// Side with the collinear points.
        side: ModelSide,
    },
    /// Returned when the third frame axis or the frame matrix degenerates.
    #[error("{side} mapping frame is degenerate")]
    DegenerateFrame {
        /// Side with the degenerate frame.
        side: ModelSide,
    },
    /// Returned when the source base distance is too small to derive a scale.
    #[error("source reference distance is zero; cannot derive a scale")]
    ZeroReferenceDistance,
    /// Returned when a point is transformed before any mapping was fitted.
    #[error("transformation has not been set; call set_mapping_points first")]
    NotSet,
}

/// Error returned when matching beams between two models.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// Returned when a candidate beam has coincident end points.
    #[error("candidate beam {0} has coincident end points")]
    DegenerateCandidate(BeamNumber),
}

/// Error returned by [`map_models`](crate::map_models).
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ModelMappingError {
    /// The correspondence points could not define a transform.
    #[error(transparent)]
    Transform(#[from] TransformError),
    /// The transformed beams could not be matched.
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Error returned when loading [`MappingSettings`](crate::MappingSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Returned when the settings document is not valid JSON for the schema.
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when an environment variable cannot be parsed.
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnv {
        /// Name of the offending variable.
        name: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },
    /// Returned when a tolerance is negative or not finite.
    #[error("{name} must be finite and non-negative (received {value})")]
    InvalidTolerance {
        /// Name of the offending setting.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}
