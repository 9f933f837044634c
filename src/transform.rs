//! Similarity transforms between the coordinate frames of two models.
//!
//! A frame is built from three non-collinear points: the first point is the
//! origin, the first axis runs towards the second point and the second axis is
//! the part of the direction to the third point that is orthogonal to the first.
//! Mapping one frame onto the other yields a rotation, a uniform scale taken
//! from the distance between the first two points of each side, and a
//! translation that lands the source origin on the target origin.

use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

use crate::errors::{ModelSide, TransformError};
use crate::geometry::{Beam, Point, PointLike};

/// Smallest length accepted for frame axes and reference distances.
pub const FRAME_EPSILON: f64 = 1e-8;

/// Orthonormal right-handed frame attached to three points.
#[derive(Clone, Copy, Debug)]
struct Frame {
    /// First point of the triple.
    origin: Vector3<f64>,
    /// Columns are the three unit axes.
    axes: Matrix3<f64>,
    /// Distance between the first two points.
    base_length: f64,
}

impl Frame {
    /// Build the frame for one side of the correspondence.
    fn from_points<P: PointLike>(points: &[P], side: ModelSide) -> Result<Self, TransformError> {
        if points.len() != 3 {
            return Err(TransformError::WrongPointCount {
                side,
                count: points.len(),
            });
        }
        let origin = points[0].to_vector();
        let base = points[1].to_vector() - origin;
        let base_length = base.norm();
        if base_length < FRAME_EPSILON {
            return Err(TransformError::CoincidentPoints { side });
        }
        let first = base / base_length;

        let towards_third = points[2].to_vector() - origin;
        let orthogonal = towards_third - first * towards_third.dot(&first);
        let orthogonal_norm = orthogonal.norm();
        if orthogonal_norm < FRAME_EPSILON {
            return Err(TransformError::CollinearPoints { side });
        }
        let second = orthogonal / orthogonal_norm;

        let normal = first.cross(&second);
        let normal_norm = normal.norm();
        if normal_norm < FRAME_EPSILON {
            return Err(TransformError::DegenerateFrame { side });
        }
        let third = normal / normal_norm;

        Ok(Self {
            origin,
            axes: Matrix3::from_columns(&[first, second, third]),
            base_length,
        })
    }
}

/// Fits and applies a rotation, uniform scale and translation between two
/// coordinate frames.
///
/// The transform is stored once by [`GeometricTransformer::set_mapping_points`]
/// and read by every later call. Share it between threads by cloning the
/// transformer after it has been set.
///
/// # Examples
/// ```
/// use beamx::GeometricTransformer;
///
/// let mut transformer = GeometricTransformer::new();
/// transformer
///     .set_mapping_points(
///         &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
///         &[[5.0, 0.0, 0.0], [5.0, 2.0, 0.0], [3.0, 0.0, 0.0]],
///     )
///     .unwrap();
/// let moved = transformer.transform_point([1.0, 0.0, 0.0]).unwrap();
/// assert!((moved.y - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GeometricTransformer {
    /// Homogeneous 4x4 matrix, `None` until mapping points are supplied.
    transformation: Option<Matrix4<f64>>,
}

impl GeometricTransformer {
    /// Create a transformer with no transform set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transformation: None,
        }
    }

    /// Fit the transform that carries `points_model1` onto `points_model2`.
    ///
    /// Any previously stored transform is replaced, and left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::WrongPointCount`] unless both sides have exactly
    /// three points, [`TransformError::CoincidentPoints`] or
    /// [`TransformError::CollinearPoints`] when a side cannot define a frame, and
    /// [`TransformError::ZeroReferenceDistance`] when no scale can be derived.
    pub fn set_mapping_points<P: PointLike, Q: PointLike>(
        &mut self,
        points_model1: &[P],
        points_model2: &[Q],
    ) -> Result<(), TransformError> {
        let source = Frame::from_points(points_model1, ModelSide::Source)?;
        let target = Frame::from_points(points_model2, ModelSide::Target)?;

        let source_inverse = source
            .axes
            .try_inverse()
            .ok_or(TransformError::DegenerateFrame {
                side: ModelSide::Source,
            })?;
        let rotation = target.axes * source_inverse;

        if source.base_length < FRAME_EPSILON {
            return Err(TransformError::ZeroReferenceDistance);
        }
        let scale = target.base_length / source.base_length;

        let block = rotation * scale;
        let translation = target.origin - block * source.origin;

        let mut matrix = Matrix4::identity();
        for row in 0..3 {
            for column in 0..3 {
                matrix[(row, column)] = block[(row, column)];
            }
            matrix[(row, 3)] = translation[row];
        }
        self.transformation = Some(matrix);
        Ok(())
    }

    /// Return `true` once a transform has been fitted.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.transformation.is_some()
    }

    /// The stored homogeneous matrix, if any.
    #[must_use]
    pub fn transformation(&self) -> Option<&Matrix4<f64>> {
        self.transformation.as_ref()
    }

    /// Forget the stored transform.
    pub fn reset(&mut self) {
        self.transformation = None;
    }

    /// Apply the stored transform to a single point.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotSet`] when no transform has been fitted.
    pub fn transform_point(&self, point: impl PointLike) -> Result<Point, TransformError> {
        let matrix = self.transformation.as_ref().ok_or(TransformError::NotSet)?;
        let [x, y, z] = point.coordinates();
        let mapped = matrix * Vector4::new(x, y, z, 1.0);
        Ok(Point::new(mapped.x, mapped.y, mapped.z))
    }

    /// Apply the stored transform to both ends of a beam.
    ///
    /// The result keeps the number, profile and group of `beam`; its length is
    /// recomputed from the transformed ends.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotSet`] when no transform has been fitted.
    pub fn transform_beam(&self, beam: &Beam) -> Result<Beam, TransformError> {
        let start = self.transform_point(beam.start())?;
        let end = self.transform_point(beam.end())?;
        Ok(Beam::new(
            beam.number(),
            start,
            end,
            beam.profile(),
            beam.group(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;
    use approx::assert_abs_diff_eq;

    fn assert_point_near(actual: Point, expected: Point) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-6);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-6);
        assert_abs_diff_eq!(actual.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn identical_frames_give_identity() {
        let points = [[0.0, 0.0, 0.0], [100.0, 0.0, 0.0], [0.0, 200.0, 0.0]];
        let mut transformer = GeometricTransformer::new();
        transformer
            .set_mapping_points(&points, &points)
            .expect("well conditioned points");
        let mapped = transformer
            .transform_point([50.0, 50.0, 0.0])
            .expect("transform set");
        assert_point_near(mapped, point(50.0, 50.0, 0.0));
    }

    #[test]
    fn recovers_rotation_scale_and_translation() {
        // Unit square scaled by 2, turned 90 degrees about Z and moved by (10, 0, 0).
        let source = [point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0), point(0.0, 1.0, 0.0)];
        let target = [point(10.0, 0.0, 0.0), point(10.0, 2.0, 0.0), point(8.0, 0.0, 0.0)];
        let mut transformer = GeometricTransformer::new();
        transformer
            .set_mapping_points(&source, &target)
            .expect("well conditioned points");

        assert_point_near(
            transformer.transform_point([1.0, 1.0, 0.0]).expect("set"),
            point(8.0, 2.0, 0.0),
        );
        assert_point_near(
            transformer.transform_point([3.0, 4.0, 5.0]).expect("set"),
            point(2.0, 6.0, 10.0),
        );
    }

    #[test]
    fn inverse_correspondence_round_trips() {
        let a = [point(1.0, 2.0, 3.0), point(4.0, 6.0, 3.0), point(1.0, 2.0, 9.0)];
        let b = [point(-5.0, 0.5, 2.0), point(-5.0, 0.5, 12.0), point(7.0, 0.5, 2.0)];
        let mut forward = GeometricTransformer::new();
        forward.set_mapping_points(&a, &b).expect("forward");
        let mut backward = GeometricTransformer::new();
        backward.set_mapping_points(&b, &a).expect("backward");

        for probe in [point(0.0, 0.0, 0.0), point(13.0, -7.5, 2.25), point(-1.0, 4.0, 100.0)] {
            let there = forward.transform_point(probe).expect("set");
            let back = backward.transform_point(there).expect("set");
            assert_point_near(back, probe);
        }
    }

    #[test]
    fn rejects_wrong_point_count() {
        let mut transformer = GeometricTransformer::new();
        let error = transformer
            .set_mapping_points(
                &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
                &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            )
            .expect_err("two points cannot define a frame");
        assert_eq!(
            error,
            TransformError::WrongPointCount {
                side: ModelSide::Source,
                count: 2
            }
        );
    }

    #[test]
    fn rejects_coincident_and_collinear_points() {
        let good = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let mut transformer = GeometricTransformer::new();

        let coincident = [[1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 0.0]];
        assert_eq!(
            transformer.set_mapping_points(&good, &coincident),
            Err(TransformError::CoincidentPoints {
                side: ModelSide::Target
            })
        );

        let collinear = [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [3.0, 3.0, 3.0]];
        assert_eq!(
            transformer.set_mapping_points(&collinear, &good),
            Err(TransformError::CollinearPoints {
                side: ModelSide::Source
            })
        );
        assert!(!transformer.is_set());
    }

    #[test]
    fn transform_requires_mapping_points() {
        let mut transformer = GeometricTransformer::new();
        let beam = Beam::new(1, [0.0; 3], [1.0, 0.0, 0.0], "A", "G");
        assert_eq!(transformer.transform_beam(&beam), Err(TransformError::NotSet));

        let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        transformer.set_mapping_points(&points, &points).expect("set");
        assert!(transformer.transform_point([0.0; 3]).is_ok());
        transformer.reset();
        assert_eq!(
            transformer.transform_point([0.0; 3]),
            Err(TransformError::NotSet)
        );
    }

    #[test]
    fn transformed_beam_keeps_identity_and_rescales_length() {
        let source = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let target = [[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 3.0, 0.0]];
        let mut transformer = GeometricTransformer::new();
        transformer.set_mapping_points(&source, &target).expect("set");

        let beam = Beam::new(12, [0.0, 0.0, 0.0], [0.0, 2.0, 0.0], "RHS", "Roof");
        let moved = transformer.transform_beam(&beam).expect("set");
        assert_eq!(moved.number(), 12);
        assert_eq!(moved.profile(), "RHS");
        assert_eq!(moved.group(), "Roof");
        assert_abs_diff_eq!(moved.length(), 6.0, epsilon = 1e-9);
    }
}
