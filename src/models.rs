//! Mapping of one beam model onto another.

use serde::Serialize;
use tracing::info;

use crate::errors::ModelMappingError;
use crate::geometry::{Beam, BeamNumber, Point, PointLike};
use crate::mapper::BeamMapper;
use crate::transform::GeometricTransformer;

/// One beam of the first model after transformation and matching.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MappedBeam {
    /// Beam number in the first model.
    pub number: BeamNumber,
    /// Transformed start point.
    pub start: Point,
    /// Transformed end point.
    pub end: Point,
    /// Matching beam number in the second model.
    pub matched: Option<BeamNumber>,
    /// Profile of the beam in the first model.
    pub profile: String,
    /// Profile of the matching beam in the second model.
    pub matched_profile: Option<String>,
}

/// Carry `beams1` into the frame of `beams2` and match the two models.
///
/// The transform is fitted from the three correspondence points of each model.
/// `tolerance` is used both as the line parameter slack and as the distance
/// bound of the matching.
///
/// # Errors
///
/// Returns [`ModelMappingError::Transform`] when the correspondence points do
/// not define a frame and [`ModelMappingError::Mapping`] when a beam of the
/// second model has coincident ends.
///
/// # Examples
/// ```
/// use beamx::{map_models, Beam};
///
/// let local = vec![Beam::new(1, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], "A", "")];
/// let global = vec![Beam::new(40, [10.0, 0.0, 0.0], [10.0, 2.0, 0.0], "A", "")];
/// let rows = map_models(
///     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///     &[[10.0, 0.0, 0.0], [10.0, 2.0, 0.0], [8.0, 0.0, 0.0]],
///     &local,
///     &global,
///     0.01,
/// )
/// .unwrap();
/// assert_eq!(rows[0].matched, Some(40));
/// ```
pub fn map_models<P: PointLike, Q: PointLike>(
    points_model1: &[P],
    points_model2: &[Q],
    beams1: &[Beam],
    beams2: &[Beam],
    tolerance: f64,
) -> Result<Vec<MappedBeam>, ModelMappingError> {
    let mut transformer = GeometricTransformer::new();
    transformer.set_mapping_points(points_model1, points_model2)?;

    let transformed = beams1
        .iter()
        .map(|beam| transformer.transform_beam(beam))
        .collect::<Result<Vec<_>, _>>()?;
    let mapping = BeamMapper::new(&transformed, beams2).map_lines(tolerance, tolerance)?;

    let rows: Vec<MappedBeam> = transformed
        .iter()
        .map(|beam| {
            let matched = mapping.get(&beam.number()).copied().flatten();
            let matched_profile = matched.and_then(|number| {
                beams2
                    .iter()
                    .find(|candidate| candidate.number() == number)
                    .map(|candidate| candidate.profile().to_string())
            });
            MappedBeam {
                number: beam.number(),
                start: beam.start(),
                end: beam.end(),
                matched,
                profile: beam.profile().to_string(),
                matched_profile,
            }
        })
        .collect();

    let mapped = rows.iter().filter(|row| row.matched.is_some()).count();
    info!(
        beams = rows.len(),
        mapped,
        unmatched = rows.len() - mapped,
        tolerance,
        "mapped model beams"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{MappingError, ModelSide, TransformError};

    fn local_model() -> Vec<Beam> {
        vec![
            Beam::new(1, [0.0, 0.0, 0.0], [0.0, 0.0, 3.0], "HEA200", "Columns"),
            Beam::new(2, [0.0, 0.0, 3.0], [5.0, 0.0, 3.0], "IPE300", "Girders"),
            Beam::new(3, [0.0, 8.0, 0.0], [0.0, 8.0, 3.0], "HEA200", "Columns"),
        ]
    }

    /// The local model doubled in size and shifted by (100, 50, 0).
    fn global_model() -> Vec<Beam> {
        vec![
            Beam::new(101, [110.0, 50.0, 6.0], [100.0, 50.0, 6.0], "IPE300", ""),
            Beam::new(102, [100.0, 50.0, 0.0], [100.0, 50.0, 6.0], "HEA200", ""),
        ]
    }

    const LOCAL_POINTS: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [0.0, 0.0, 3.0]];
    const GLOBAL_POINTS: [[f64; 3]; 3] =
        [[100.0, 50.0, 0.0], [110.0, 50.0, 0.0], [100.0, 50.0, 6.0]];

    #[test]
    fn matches_scaled_and_shifted_model() {
        let rows = map_models(
            &LOCAL_POINTS,
            &GLOBAL_POINTS,
            &local_model(),
            &global_model(),
            0.01,
        )
        .expect("well conditioned mapping");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].matched, Some(102));
        assert_eq!(rows[0].matched_profile.as_deref(), Some("HEA200"));
        assert_eq!(rows[1].matched, Some(101));
        assert!((rows[1].end.x - 110.0).abs() < 1e-9);
        assert_eq!(rows[2].matched, None);
        assert_eq!(rows[2].matched_profile, None);
    }

    #[test]
    fn transform_errors_propagate() {
        let collinear = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let error = map_models(
            &collinear,
            &GLOBAL_POINTS,
            &local_model(),
            &global_model(),
            0.01,
        )
        .expect_err("collinear points are rejected");
        assert_eq!(
            error,
            ModelMappingError::Transform(TransformError::CollinearPoints {
                side: ModelSide::Source
            })
        );
    }

    #[test]
    fn mapping_errors_propagate() {
        let mut global = global_model();
        global.push(Beam::new(103, [0.0; 3], [0.0; 3], "X", ""));
        let error = map_models(&LOCAL_POINTS, &GLOBAL_POINTS, &local_model(), &global, 0.01)
            .expect_err("degenerate candidate is rejected");
        assert_eq!(
            error,
            ModelMappingError::Mapping(MappingError::DegenerateCandidate(103))
        );
    }
}
