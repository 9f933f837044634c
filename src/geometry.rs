//! Fundamental geometric records for beam models.

use std::ops::Index;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Identifier of a beam element as numbered by the analysis model.
pub type BeamNumber = u32;

/// Identifier of a deduplicated node, assigned from 1 in first-seen order.
pub type NodeId = usize;

/// Distance below which two points are considered the same node.
pub const NODE_TOLERANCE: f64 = 1e-4;

/// Position in three dimensional space in model units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the global Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Euclidean distance to another point-like value.
    #[must_use]
    pub fn distance_to(&self, other: impl PointLike) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

impl From<[f64; 3]> for Point {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

/// Anything that can be read as an `(x, y, z)` coordinate triple.
///
/// Comparisons between nodes, points and raw coordinates go through
/// [`PointLike::coordinates`] so every representation is compared the same way.
pub trait PointLike {
    /// Coordinates of the value as `[x, y, z]`.
    fn coordinates(&self) -> [f64; 3];

    /// Coordinates as an algebraic vector.
    fn to_vector(&self) -> Vector3<f64> {
        let [x, y, z] = self.coordinates();
        Vector3::new(x, y, z)
    }
}

impl PointLike for Point {
    fn coordinates(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl PointLike for [f64; 3] {
    fn coordinates(&self) -> [f64; 3] {
        *self
    }
}

impl PointLike for (f64, f64, f64) {
    fn coordinates(&self) -> [f64; 3] {
        [self.0, self.1, self.2]
    }
}

impl PointLike for Vector3<f64> {
    fn coordinates(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl<T: PointLike + ?Sized> PointLike for &T {
    fn coordinates(&self) -> [f64; 3] {
        (**self).coordinates()
    }
}

/// A deduplicated point shared by one or more beam ends.
///
/// Nodes compare by distance rather than by exact coordinates. The relation is
/// not transitive: `a` may coincide with `b` and `b` with `c` while `a` and `c`
/// are further apart than [`NODE_TOLERANCE`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
    /// Distance along the global Z axis.
    pub z: f64,
}

impl Node {
    /// Create a [`Node`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Return `true` when `other` lies closer than [`NODE_TOLERANCE`].
    ///
    /// # Examples
    /// ```
    /// use beamx::{point, Node};
    ///
    /// let node = Node::new(10.0, 0.0, 0.0);
    /// assert!(node.coincides_with(point(10.00005, 0.0, 0.0)));
    /// assert!(node.coincides_with((10.0, 0.0, 0.0)));
    /// assert!(!node.coincides_with([10.001, 0.0, 0.0]));
    /// ```
    #[must_use]
    pub fn coincides_with(&self, other: impl PointLike) -> bool {
        (other.to_vector() - PointLike::to_vector(self)).norm() < NODE_TOLERANCE
    }

    /// Position of the node as a [`Point`].
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y, self.z)
    }
}

impl PointLike for Node {
    fn coordinates(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Point> for Node {
    fn from(value: Point) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

/// Row shape in which beam tables arrive from the results store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeamRow {
    /// Beam number in the source model.
    pub number: BeamNumber,
    /// First end of the beam.
    pub start: Point,
    /// Second end of the beam.
    pub end: Point,
    /// Section profile name.
    pub profile: String,
    /// Group the beam belongs to; empty when the source has no grouping.
    #[serde(default)]
    pub group: String,
}

/// A straight beam element between two points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BeamRow")]
pub struct Beam {
    /// Beam number in the source model.
    number: BeamNumber,
    /// First end of the beam.
    start: Point,
    /// Second end of the beam.
    end: Point,
    /// Section profile name.
    profile: String,
    /// Group the beam belongs to.
    group: String,
    /// Distance between the ends, fixed at construction.
    length: f64,
}

impl Beam {
    /// Create a beam; the length is computed once from the end points.
    ///
    /// # Examples
    /// ```
    /// use beamx::{point, Beam};
    ///
    /// let beam = Beam::new(7, point(0.0, 0.0, 0.0), point(3.0, 4.0, 0.0), "UB203", "Deck");
    /// assert_eq!(beam.length(), 5.0);
    /// assert_eq!(beam[1], point(3.0, 4.0, 0.0));
    /// ```
    pub fn new(
        number: BeamNumber,
        start: impl Into<Point>,
        end: impl Into<Point>,
        profile: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        let start = start.into();
        let end = end.into();
        Self {
            number,
            start,
            end,
            profile: profile.into(),
            group: group.into(),
            length: start.distance_to(end),
        }
    }

    /// Beam number in the source model.
    #[must_use]
    pub const fn number(&self) -> BeamNumber {
        self.number
    }

    /// First end of the beam.
    #[must_use]
    pub const fn start(&self) -> Point {
        self.start
    }

    /// Second end of the beam.
    #[must_use]
    pub const fn end(&self) -> Point {
        self.end
    }

    /// Section profile name.
    #[must_use]
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Group the beam belongs to.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Length computed when the beam was created.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Vector from the start to the end of the beam.
    #[must_use]
    pub fn direction(&self) -> Vector3<f64> {
        self.end.to_vector() - self.start.to_vector()
    }

    /// Point halfway between the two ends.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        Point::from((self.start.to_vector() + self.end.to_vector()) * 0.5)
    }

    /// End point by position: `0` is the start, `1` the end.
    #[must_use]
    pub const fn endpoint(&self, index: usize) -> Option<Point> {
        match index {
            0 => Some(self.start),
            1 => Some(self.end),
            _ => None,
        }
    }

    /// Copy of the beam assigned to another group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }
}

impl Index<usize> for Beam {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        match index {
            0 => &self.start,
            1 => &self.end,
            _ => panic!("beam end index must be 0 or 1 (received {index})"),
        }
    }
}

impl From<BeamRow> for Beam {
    fn from(row: BeamRow) -> Self {
        Beam::new(row.number, row.start, row.end, row.profile, row.group)
    }
}

/// Parse a JSON array of beam rows.
///
/// End points may be written either as `{"x": .., "y": .., "z": ..}` objects or
/// as `[x, y, z]` arrays; any stored `length` is ignored and recomputed.
///
/// # Errors
///
/// Returns the [`serde_json::Error`] raised while parsing `json`.
///
/// # Examples
/// ```
/// let beams = beamx::beams_from_json(
///     r#"[{"number": 1, "start": [0, 0, 0], "end": [2, 0, 0], "profile": "SHS100"}]"#,
/// ).unwrap();
/// assert_eq!(beams[0].length(), 2.0);
/// assert_eq!(beams[0].group(), "");
/// ```
pub fn beams_from_json(json: &str) -> Result<Vec<Beam>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use beamx::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}
