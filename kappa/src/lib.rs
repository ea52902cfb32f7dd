// Curvature-parameterised transformation core for Euclidean, spherical and
// hyperbolic rendering.

/// Assertion that only exists with the `numeric-checks` feature in debug builds.
/// Hot paths otherwise let degenerate values propagate as NaN/Inf.
macro_rules! numeric_check {
    ($cond:expr, $($arg:tt)+) => {
        #[cfg(feature = "numeric-checks")]
        debug_assert!($cond, $($arg)+);
    };
}

pub mod core {
    pub mod geometry;
    pub mod math;
}

pub mod camera;
pub mod mesh;
pub mod scene;

pub use crate::camera::{Camera, Direction, Projection};
pub use crate::core::geometry::{Curvature, CurvatureState, Manifold};
pub use crate::core::math::ad::{Dual, Dual2};
pub use crate::core::math::linalg::{Matrix3, Matrix4};
