//! Curvature-aware vector algebra on the homogeneous 4D embedding.
//!
//! Points live on `x²+y²+z²+w²=1` (spherical), on the upper sheet of
//! `x²+y²+z²−w²=−1` (hyperbolic), or at `w=1` (Euclidean). Directions are
//! tangent vectors at a point; in Euclidean space they have `w=0`.
//!
//! Every function assumes its inputs belong to those families. Values built
//! by hand and fed in directly are not checked.

use super::curvature::Curvature;
use crate::core::math::linalg::{euclidean_dot, Matrix3, Matrix4};
use glam::{Vec3, Vec4};

/// Offset added to the length of a flat point before porting so the origin
/// does not divide by zero.
pub const PORT_EPSILON: f32 = 1e-6;

/// Allowed overshoot of an `acos`/`acosh` argument before the
/// `numeric-checks` feature reports it.
pub const DOMAIN_DRIFT: f32 = 1e-3;

/// The origin of every model space, `(0, 0, 0, 1)`.
pub const ORIGIN: Vec4 = Vec4::W;

impl Curvature {
    /// Ambient bilinear form: Euclidean on `xyz`, `w` added with the sign
    /// of the geometry (Lorentzian when hyperbolic).
    #[inline]
    pub fn dot(self, u: Vec4, v: Vec4) -> f32 {
        u.x * v.x + u.y * v.y + u.z * v.z + self.w_sign() * u.w * v.w
    }

    #[inline]
    pub fn length(self, v: Vec4) -> f32 {
        self.dot(v, v).sqrt()
    }

    /// Unit length under [`Curvature::dot`]. Timelike or zero vectors give NaN.
    #[inline]
    pub fn normalize(self, v: Vec4) -> Vec4 {
        let len = self.length(v);
        numeric_check!(len > f32::EPSILON, "normalising a degenerate vector {v:?} in {self}");
        v * (1.0 / len)
    }

    /// Geodesic distance between two points of the current space.
    ///
    /// The `acos`/`acosh` argument is clamped into the function's domain, so
    /// coincident and antipodal points survive floating-point drift.
    pub fn distance(self, p: Vec4, q: Vec4) -> f32 {
        if self.is_euclidean() {
            return self.length(p - q);
        }

        let cos_d = if self.is_hyperbolic() { -self.dot(q, p) } else { self.dot(q, p) };
        let clamped = if self.is_hyperbolic() {
            numeric_check!(cos_d > 1.0 - DOMAIN_DRIFT, "acosh argument {cos_d} out of domain");
            cos_d.max(1.0)
        } else {
            numeric_check!(cos_d.abs() < 1.0 + DOMAIN_DRIFT, "acos argument {cos_d} out of domain");
            cos_d.clamp(-1.0, 1.0)
        };
        self.acos(clamped)
    }

    /// A vector orthogonal under [`Curvature::dot`] to `t`, `a` and `b`.
    ///
    /// Cofactor expansion of the 4D generalised cross product with the `w`
    /// column weighted by the curvature. Near `k=0` the spatial part tends to
    /// `k·(a×b)` when `t` is the origin.
    pub fn cross(self, t: Vec4, a: Vec4, b: Vec4) -> Vec4 {
        let k = self.value();
        let mx = Matrix3::new(
            t.y, t.z, k * t.w, //
            a.y, a.z, k * a.w, //
            b.y, b.z, k * b.w,
        );
        let my = Matrix3::new(
            t.x, t.z, k * t.w, //
            a.x, a.z, k * a.w, //
            b.x, b.z, k * b.w,
        );
        let mz = Matrix3::new(
            t.x, t.y, k * t.w, //
            a.x, a.y, k * a.w, //
            b.x, b.y, k * b.w,
        );
        let mw = Matrix3::new(
            t.x, t.y, t.z, //
            a.x, a.y, a.z, //
            b.x, b.y, b.z,
        );
        Vec4::new(
            mx.determinant(),
            -my.determinant(),
            mz.determinant(),
            -mw.determinant(),
        )
    }

    /// Isometry carrying [`ORIGIN`] to `position`.
    ///
    /// Spherical rotation, Lorentz boost or affine translation depending on
    /// the curvature. At `k=0` with `w=1` this is the usual translation
    /// matrix. Undefined at the antipode of the origin (`w=-1`).
    #[rustfmt::skip]
    pub fn translate_matrix(self, position: Vec4) -> Matrix4 {
        let k = self.value();
        let (x, y, z, w) = (position.x, position.y, position.z, position.w);
        let d = 1.0 + w;
        Matrix4::new(
            1.0 - k * x * x / d, -k * x * y / d, -k * x * z / d, -k * x,
            -k * y * x / d, 1.0 - k * y * y / d, -k * y * z / d, -k * y,
            -k * z * x / d, -k * z * y / d, 1.0 - k * z * z / d, -k * z,
            x, y, z, w,
        )
    }

    /// Embeds a flat point into the current space.
    ///
    /// In curved space `p` is read as a tangent vector at the origin and
    /// wrapped along the geodesic of length `|p|` (the exponential map).
    pub fn port_point(self, p: Vec3) -> Vec4 {
        if self.is_euclidean() {
            return p.extend(1.0);
        }
        let dist = euclidean_dot(p, p).sqrt() + PORT_EPSILON;
        let dir = (p / dist).extend(0.0);
        ORIGIN * self.cos(dist) + dir * self.sin(dist)
    }

    /// Transports a flat direction from the origin to `base`.
    pub fn port_vector(self, v: Vec3, base: Vec4) -> Vec4 {
        if self.is_euclidean() {
            return v.extend(0.0);
        }
        v.extend(0.0) * self.translate_matrix(base)
    }

    /// Inverse of [`Curvature::port_point`]: the flat coordinates whose port
    /// is `p`. Spherical points are read on the hemisphere-agnostic branch
    /// `atan2(|xyz|, w)`, so the result has length in `[0, π]`.
    pub fn flatten_point(self, p: Vec4) -> Vec3 {
        let spatial = p.truncate();
        if self.is_euclidean() {
            return spatial;
        }
        let r = euclidean_dot(spatial, spatial).sqrt();
        if r == 0.0 {
            return Vec3::ZERO;
        }
        let dist = if self.is_hyperbolic() { r.asinh() } else { r.atan2(p.w) };
        spatial * (dist / r)
    }
}
