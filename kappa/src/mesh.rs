use crate::core::math::ad::Dual2;
use crate::core::math::linalg::{euclidean_cross, euclidean_dot};
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

pub const TESSELLATION_LEVEL: usize = 20;

/// Interleaved vertex layout uploaded as-is to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VertexData {
    pub position: [f32; 4],
    pub normal: [f32; 4],
    pub texcoord: [f32; 2],
}

/// A surface `r(u, v)` over the unit square, in flat authoring coordinates.
///
/// Evaluated on dual numbers so the tangents, and with them the normal,
/// come out exactly.
pub trait ParamSurface {
    fn eval(&self, u: Dual2, v: Dual2) -> [Dual2; 3];
}

/// Samples `surface` at `(u, v)`.
///
/// The normal is `∂r/∂u × ∂r/∂v`, normalised. Where the surface is singular
/// (the poles of a sphere) it comes out NaN.
pub fn vertex(surface: &impl ParamSurface, u: f32, v: f32) -> VertexData {
    let [x, y, z] = surface.eval(Dual2::u(u), Dual2::v(v));

    let dr_du = Vec3::new(x.der.x, y.der.x, z.der.x);
    let dr_dv = Vec3::new(x.der.y, y.der.y, z.der.y);
    let n = euclidean_cross(dr_du, dr_dv);
    // Zero at singular points such as the sphere poles; yields NaN there.
    let normal = n / euclidean_dot(n, n).sqrt();

    VertexData {
        position: [x.val, y.val, z.val, 1.0],
        normal: normal.extend(0.0).to_array(),
        texcoord: Vec2::new(u, v).to_array(),
    }
}

/// Triangle-strip tessellation of a parametric surface.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<VertexData>,
    vertices_per_strip: usize,
    strips: usize,
}

impl Mesh {
    /// `n` strips along `v`, each with `m + 1` vertex pairs along `u`.
    pub fn tessellate(surface: &impl ParamSurface, n: usize, m: usize) -> Self {
        let vertices_per_strip = (m + 1) * 2;
        let mut vertices = Vec::with_capacity(vertices_per_strip * n);

        for i in 0..n {
            for j in 0..=m {
                let u = j as f32 / m as f32;
                vertices.push(vertex(surface, u, i as f32 / n as f32));
                vertices.push(vertex(surface, u, (i + 1) as f32 / n as f32));
            }
        }

        tracing::debug!(target: "mesh", strips = n, vertices = vertices.len(), "tessellated surface");
        Self { vertices, vertices_per_strip, strips: n }
    }

    pub fn with_default_level(surface: &impl ParamSurface) -> Self {
        Self::tessellate(surface, TESSELLATION_LEVEL, TESSELLATION_LEVEL)
    }

    pub fn vertices(&self) -> &[VertexData] {
        &self.vertices
    }

    pub fn strips(&self) -> usize {
        self.strips
    }

    pub fn vertices_per_strip(&self) -> usize {
        self.vertices_per_strip
    }

    /// Vertices of strip `i`, drawn as one triangle strip. `None` past the
    /// last strip.
    pub fn strip(&self, i: usize) -> Option<&[VertexData]> {
        if i >= self.strips {
            return None;
        }
        let start = i * self.vertices_per_strip;
        self.vertices.get(start..start + self.vertices_per_strip)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Unit sphere centred at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere;

impl ParamSurface for Sphere {
    fn eval(&self, u: Dual2, v: Dual2) -> [Dual2; 3] {
        let u = u * (2.0 * PI);
        let v = v * PI;
        [u.cos() * v.sin(), u.sin() * v.sin(), v.cos()]
    }
}

/// Unit square in the XZ plane, centred at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plane;

impl ParamSurface for Plane {
    fn eval(&self, u: Dual2, v: Dual2) -> [Dual2; 3] {
        [u - 0.5, Dual2::constant(0.0), v - 0.5]
    }
}
