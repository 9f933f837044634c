//! Matching of beams between two independently numbered models.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::MappingError;
use crate::geometry::{Beam, BeamNumber, PointLike};

/// Smallest squared length accepted for a candidate beam direction.
pub const LINE_EPSILON_SQUARED: f64 = 1e-12;

/// Position of a point relative to the infinite line through a beam.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LineProjection {
    /// Line parameter of the foot point: `0` at the beam start, `1` at its end.
    pub t: f64,
    /// Perpendicular distance from the point to the line.
    pub distance: f64,
}

/// Project `point` onto the infinite line through `beam`.
///
/// # Errors
///
/// Returns [`MappingError::DegenerateCandidate`] when the ends of `beam`
/// coincide.
///
/// # Examples
/// ```
/// use beamx::{project_onto_line, Beam};
///
/// let beam = Beam::new(1, [0.0, 0.0, 0.0], [10.0, 0.0, 0.0], "A", "");
/// let projection = project_onto_line([2.5, 3.0, 0.0], &beam).unwrap();
/// assert_eq!(projection.t, 0.25);
/// assert_eq!(projection.distance, 3.0);
/// ```
pub fn project_onto_line(
    point: impl PointLike,
    beam: &Beam,
) -> Result<LineProjection, MappingError> {
    let origin = beam.start().to_vector();
    let direction = beam.direction();
    let length_squared = direction.norm_squared();
    if length_squared < LINE_EPSILON_SQUARED {
        return Err(MappingError::DegenerateCandidate(beam.number()));
    }
    let offset = point.to_vector() - origin;
    let t = offset.dot(&direction) / length_squared;
    let distance = (offset - direction * t).norm();
    Ok(LineProjection { t, distance })
}

/// Best candidate found for one beam.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineMatch {
    /// Beam from the first model.
    pub beam: BeamNumber,
    /// Matching beam of the second model with the largest of the three
    /// perpendicular distances, or `None` when no candidate qualified.
    pub candidate: Option<(BeamNumber, f64)>,
}

/// Finds, for every beam of one model, the best matching beam of another.
///
/// A candidate qualifies when the start, end and midpoint of the beam all
/// project onto the candidate within the parameter slack and within the
/// distance bound. Among qualifying candidates the one with the smallest
/// largest distance wins; the first one seen wins ties.
#[derive(Clone, Copy, Debug)]
pub struct BeamMapper<'a> {
    /// Beams to find matches for.
    beams1: &'a [Beam],
    /// Candidate beams.
    beams2: &'a [Beam],
}

impl<'a> BeamMapper<'a> {
    /// Create a mapper between two beam sets.
    #[must_use]
    pub const fn new(beams1: &'a [Beam], beams2: &'a [Beam]) -> Self {
        Self { beams1, beams2 }
    }

    /// Match every beam of the first set against the second set.
    ///
    /// `tolerance` is the slack allowed on the line parameter beyond `[0, 1]`;
    /// `max_tolerance` bounds the perpendicular distance of each projected point.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DegenerateCandidate`] as soon as a candidate with
    /// coincident ends is projected onto.
    pub fn match_lines(
        &self,
        tolerance: f64,
        max_tolerance: f64,
    ) -> Result<Vec<LineMatch>, MappingError> {
        self.beams1
            .iter()
            .map(|beam| {
                Ok(LineMatch {
                    beam: beam.number(),
                    candidate: self.best_candidate(beam, tolerance, max_tolerance)?,
                })
            })
            .collect()
    }

    /// Map beam numbers of the first set onto beam numbers of the second set.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DegenerateCandidate`] as soon as a candidate with
    /// coincident ends is projected onto.
    ///
    /// # Examples
    /// ```
    /// use beamx::{Beam, BeamMapper};
    ///
    /// let first = vec![Beam::new(1, [0.0, 0.0, 0.0], [5.0, 0.0, 0.0], "A", "")];
    /// let second = vec![
    ///     Beam::new(70, [0.0, 3.0, 0.0], [5.0, 3.0, 0.0], "A", ""),
    ///     Beam::new(71, [-1.0, 0.0, 0.0], [9.0, 0.0, 0.0], "A", ""),
    /// ];
    /// let mapping = BeamMapper::new(&first, &second).map_lines(0.01, 0.01).unwrap();
    /// assert_eq!(mapping[&1], Some(71));
    /// ```
    pub fn map_lines(
        &self,
        tolerance: f64,
        max_tolerance: f64,
    ) -> Result<BTreeMap<BeamNumber, Option<BeamNumber>>, MappingError> {
        Ok(self
            .match_lines(tolerance, max_tolerance)?
            .into_iter()
            .map(|found| (found.beam, found.candidate.map(|(number, _)| number)))
            .collect())
    }

    /// Candidate for `beam` with the smallest largest distance.
    fn best_candidate(
        &self,
        beam: &Beam,
        tolerance: f64,
        max_tolerance: f64,
    ) -> Result<Option<(BeamNumber, f64)>, MappingError> {
        let probes = [beam.start(), beam.end(), beam.midpoint()];
        let mut best: Option<(BeamNumber, f64)> = None;

        'candidates: for candidate in self.beams2 {
            let mut worst = 0.0_f64;
            for probe in probes {
                let projection = project_onto_line(probe, candidate)?;
                let within_segment =
                    projection.t >= -tolerance && projection.t <= 1.0 + tolerance;
                if !within_segment || projection.distance > max_tolerance {
                    continue 'candidates;
                }
                worst = worst.max(projection.distance);
            }
            if best.map_or(true, |(_, distance)| worst < distance) {
                best = Some((candidate.number(), worst));
            }
        }
        Ok(best)
    }
}
