use glam::{Mat4, Vec3, Vec4};
use std::ops::Mul;

/// Euclidean dot product of two flat 3-vectors.
#[inline]
pub fn euclidean_dot(a: Vec3, b: Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Euclidean cross product. Only defined for 3-vectors.
#[inline]
pub fn euclidean_cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Scales `v` to unit length.
///
/// A zero-length input yields NaN components; callers must not pass one.
#[inline]
pub fn euclidean_normalize(v: Vec3) -> Vec3 {
    let len = euclidean_dot(v, v).sqrt();
    numeric_check!(len > f32::EPSILON, "normalising a zero-length vector {v:?}");
    v * (1.0 / len)
}

/// Row-major 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub rows: [Vec3; 3],
}

impl Matrix3 {
    pub const fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f32, m01: f32, m02: f32,
        m10: f32, m11: f32, m12: f32,
        m20: f32, m21: f32, m22: f32,
    ) -> Self {
        Self::from_rows(
            Vec3::new(m00, m01, m02),
            Vec3::new(m10, m11, m12),
            Vec3::new(m20, m21, m22),
        )
    }

    /// Cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let [r0, r1, r2] = self.rows;
        r0.x * (r1.y * r2.z - r1.z * r2.y) - r0.y * (r1.x * r2.z - r1.z * r2.x)
            + r0.z * (r1.x * r2.y - r1.y * r2.x)
    }
}

/// Row-major 4x4 matrix using the row-vector convention: `v' = v * M`.
///
/// Composition therefore reads left to right: `v * (A * B)` applies `A`
/// first, then `B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub rows: [Vec4; 4],
}

impl Matrix4 {
    pub const IDENTITY: Self = Self::from_rows(Vec4::X, Vec4::Y, Vec4::Z, Vec4::W);
    pub const ZERO: Self = Self::from_rows(Vec4::ZERO, Vec4::ZERO, Vec4::ZERO, Vec4::ZERO);

    pub const fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        Self { rows: [r0, r1, r2, r3] }
    }

    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f32, m01: f32, m02: f32, m03: f32,
        m10: f32, m11: f32, m12: f32, m13: f32,
        m20: f32, m21: f32, m22: f32, m23: f32,
        m30: f32, m31: f32, m32: f32, m33: f32,
    ) -> Self {
        Self::from_rows(
            Vec4::new(m00, m01, m02, m03),
            Vec4::new(m10, m11, m12, m13),
            Vec4::new(m20, m21, m22, m23),
            Vec4::new(m30, m31, m32, m33),
        )
    }

    pub fn row(&self, i: usize) -> Vec4 {
        self.rows[i]
    }

    pub fn column(&self, j: usize) -> Vec4 {
        Vec4::new(self.rows[0][j], self.rows[1][j], self.rows[2][j], self.rows[3][j])
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(self.column(0), self.column(1), self.column(2), self.column(3))
    }

    /// Row vector times matrix.
    #[inline]
    pub fn transform(&self, v: Vec4) -> Vec4 {
        self.rows[0] * v.x + self.rows[1] * v.y + self.rows[2] * v.z + self.rows[3] * v.w
    }

    /// `self * rhs`: transform by `self`, then by `rhs`.
    pub fn multiply(&self, rhs: &Matrix4) -> Self {
        Self::from_rows(
            rhs.transform(self.rows[0]),
            rhs.transform(self.rows[1]),
            rhs.transform(self.rows[2]),
            rhs.transform(self.rows[3]),
        )
    }

    /// Row-major float layout, ready for a uniform upload with transposition
    /// handled by the shader side.
    pub fn to_rows_array(&self) -> [[f32; 4]; 4] {
        self.rows.map(|r| r.to_array())
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        self.multiply(&rhs)
    }
}

impl Mul<Matrix4> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: Matrix4) -> Vec4 {
        rhs.transform(self)
    }
}

/// Column-vector equivalent: `Mat4::from(m) * v == v * m`.
impl From<Matrix4> for Mat4 {
    fn from(m: Matrix4) -> Mat4 {
        Mat4::from_cols(m.rows[0], m.rows[1], m.rows[2], m.rows[3])
    }
}

pub fn scale_matrix(s: Vec3) -> Matrix4 {
    Matrix4::from_rows(
        Vec4::new(s.x, 0.0, 0.0, 0.0),
        Vec4::new(0.0, s.y, 0.0, 0.0),
        Vec4::new(0.0, 0.0, s.z, 0.0),
        Vec4::W,
    )
}

/// Rotation by `angle` radians about `axis` (normalised here).
pub fn rotation_matrix(angle: f32, axis: Vec3) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    let w = euclidean_normalize(axis);
    Matrix4::from_rows(
        Vec4::new(
            c * (1.0 - w.x * w.x) + w.x * w.x,
            w.x * w.y * (1.0 - c) + w.z * s,
            w.x * w.z * (1.0 - c) - w.y * s,
            0.0,
        ),
        Vec4::new(
            w.x * w.y * (1.0 - c) - w.z * s,
            c * (1.0 - w.y * w.y) + w.y * w.y,
            w.y * w.z * (1.0 - c) + w.x * s,
            0.0,
        ),
        Vec4::new(
            w.x * w.z * (1.0 - c) + w.y * s,
            w.y * w.z * (1.0 - c) - w.x * s,
            c * (1.0 - w.z * w.z) + w.z * w.z,
            0.0,
        ),
        Vec4::W,
    )
}
