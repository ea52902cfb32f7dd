use std::ops::{Add, Mul, Neg, Sub};

use super::curvature::Curvature;
use glam::Vec4;

/// A smooth manifold where local motion is defined by a tangent space.
/// This allows us to separate the "State" (Point) from the "Change" (Tangent).
pub trait Manifold {
    /// The point on the manifold.
    type Point: Clone + Copy + std::fmt::Debug;

    /// The vector in the tangent space at a point.
    type Tangent: Clone
        + Copy
        + std::fmt::Debug
        + Add<Output = Self::Tangent>
        + Sub<Output = Self::Tangent>
        + Neg<Output = Self::Tangent>
        + Mul<f32, Output = Self::Tangent>;

    /// The dimension of the manifold.
    fn dim(&self) -> usize;

    /// Moves a point `p` along the tangent vector `v` (exponential map).
    fn retract(&self, p: Self::Point, v: Self::Tangent) -> Self::Point;

    /// Finds the tangent vector `v` at `p` such that `retract(p, v) ≈ q`
    /// (logarithm map).
    fn local(&self, p: Self::Point, q: Self::Point) -> Self::Tangent;
}

/// The constant-curvature space form: Euclidean 3-space, the 3-sphere or
/// hyperbolic 3-space, in homogeneous coordinates.
impl Manifold for Curvature {
    type Point = Vec4;
    type Tangent = Vec4;

    fn dim(&self) -> usize {
        3
    }

    /// Walks the geodesic leaving `p` with velocity `v` for unit time.
    fn retract(&self, p: Vec4, v: Vec4) -> Vec4 {
        if self.is_euclidean() {
            return p + v;
        }
        let len = self.length(v);
        if len == 0.0 {
            return p;
        }
        p * self.cos(len) + v * (self.sin(len) / len)
    }

    fn local(&self, p: Vec4, q: Vec4) -> Vec4 {
        if self.is_euclidean() {
            return q - p;
        }
        let dist = self.distance(p, q);
        let sin_d = self.sin(dist);
        if sin_d.abs() <= f32::EPSILON {
            return Vec4::ZERO;
        }
        (q - p * self.cos(dist)) * (dist / sin_d)
    }
}
