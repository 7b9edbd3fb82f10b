//! 2D geometry primitives and distance metrics.

use kdtree::distance::squared_euclidean;
use serde::{Deserialize, Serialize};

/// An immutable point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2D {
    /// Creates a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinates as a vector, in the layout the spatial index expects.
    pub fn to_vec(self) -> Vec<f64> {
        vec![self.x, self.y]
    }

    /// Returns the point confined to the `[0, width] x [0, height]` rectangle.
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width),
            y: self.y.clamp(0.0, height),
        }
    }
}

impl std::ops::Add<Offset2D> for Point2D {
    type Output = Point2D;

    fn add(self, offset: Offset2D) -> Point2D {
        Point2D::new(self.x + offset.dx, self.y + offset.dy)
    }
}

/// An immutable displacement applied to a [`Point2D`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset2D {
    /// Horizontal displacement.
    pub dx: f64,
    /// Vertical displacement.
    pub dy: f64,
}

impl Offset2D {
    /// Creates an offset from its components.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Manhattan (L1) distance between two coordinate slices.
///
/// Same pairwise shape as [`squared_euclidean`], so the spatial index can use
/// it directly; the per-axis terms give the index a valid pruning bound.
pub fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}

/// Distance metric used for all proximity judgments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Straight-line (L2) distance.
    Euclidean,
    /// Axis-aligned (L1) distance.
    Manhattan,
}

impl Metric {
    /// Distance between two points in real units.
    pub fn distance(self, a: Point2D, b: Point2D) -> f64 {
        self.from_index_distance(self.index_distance(a, b))
    }

    /// Distance in the index's comparison space (squared for Euclidean).
    ///
    /// Both detection strategies compare in this space so that they agree
    /// bit-for-bit on threshold inclusion.
    pub fn index_distance(self, a: Point2D, b: Point2D) -> f64 {
        match self {
            Metric::Euclidean => squared_euclidean(&[a.x, a.y], &[b.x, b.y]),
            Metric::Manhattan => manhattan(&[a.x, a.y], &[b.x, b.y]),
        }
    }

    /// Radius to hand the spatial index for a threshold in real units.
    pub fn query_radius(self, threshold: f64) -> f64 {
        match self {
            Metric::Euclidean => threshold * threshold,
            Metric::Manhattan => threshold,
        }
    }

    /// Converts an index-space distance back to real units.
    pub fn from_index_distance(self, raw: f64) -> f64 {
        match self {
            Metric::Euclidean => raw.sqrt(),
            Metric::Manhattan => raw,
        }
    }
}
