use crate::core::geometry::{Curvature, Manifold};
use crate::core::math::linalg::{euclidean_cross, euclidean_normalize, Matrix4};
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Discrete movement request, usually one per polled key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Backward,
    #[default]
    None,
}

/// Perspective parameters. The far plane depends on the geometry: depth in
/// spherical space saturates at `π`, so it gets its own cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    /// Far plane in spherical space.
    pub far_spherical: f32,
    /// Far plane in Euclidean and hyperbolic space.
    pub far: f32,
}

impl Default for Projection {
    // 3.14 stays just short of π so the spherical depth mapping keeps its range.
    #[allow(clippy::approx_constant)]
    fn default() -> Self {
        Self {
            fov: 90.0_f32.to_radians(),
            aspect: 1200.0 / 800.0,
            near: 0.01,
            far_spherical: 3.14,
            far: 10.0,
        }
    }
}

impl Projection {
    pub fn far_for(&self, k: Curvature) -> f32 {
        if k.is_spherical() { self.far_spherical } else { self.far }
    }
}

/// Free-flying camera.
///
/// Position, look direction and up vector are stored in flat authoring
/// coordinates (`w=1` for the position, `w=0` for directions). They are
/// ported into the current space every time a matrix is built, so a
/// curvature switch between frames keeps the camera where the user left it.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec4,
    look_at: Vec4,
    up: Vec4,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec4::new(0.0, 0.2, 2.0, 1.0),
            look_at: Vec4::new(0.0, 0.0, -1.0, 0.0),
            up: Vec4::new(0.0, 1.0, 0.0, 0.0),
            projection: Projection::default(),
        }
    }
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            ..Self::default()
        }
    }

    pub fn update_aspect_ratio(&mut self, width: u32, height: u32) {
        self.projection.aspect = width as f32 / height as f32;
    }

    /// Flat position.
    pub fn position(&self) -> Vec4 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec4) {
        self.position = position;
    }

    pub fn look_at(&self) -> Vec4 {
        self.look_at
    }

    pub fn up(&self) -> Vec4 {
        self.up
    }

    /// Sets the flat look direction; normalised here.
    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.look_at = euclidean_normalize(look_at).extend(0.0);
    }

    /// Position in the current space, for the `wEye` uniform.
    pub fn eye(&self, k: Curvature) -> Vec4 {
        k.port_point(self.position.truncate())
    }

    /// Flat unit-ish direction the camera would travel in.
    pub fn direction_vector(&self, direction: Direction) -> Vec3 {
        let look = self.look_at.truncate();
        let up = self.up.truncate();
        match direction {
            Direction::Left => euclidean_cross(up, look),
            Direction::Right => euclidean_cross(look, up),
            Direction::Up => Vec3::Y,
            Direction::Down => -Vec3::Y,
            Direction::Forward => look,
            Direction::Backward => -look,
            Direction::None => Vec3::ZERO,
        }
    }

    /// Rotates the look direction inside the camera's tangent frame.
    /// `dx` and `dy` are in `[-1, 1]`. Independent of the curvature.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let look = self.look_at.truncate();
        let up = self.up.truncate();
        let right = euclidean_cross(look, up);
        self.look_at = euclidean_normalize(look + right * dx + up * dy).extend(0.0);
    }

    /// Advances the camera by `dt` along `direction`.
    ///
    /// Euclidean space integrates linearly. Curved space walks the geodesic
    /// leaving the ported position with the ported direction. In spherical
    /// space, once the camera passes the equator (`w < 0`) it is reflected
    /// onto the antipode and `up` is flipped to keep the orientation
    /// continuous. Returns whether that wraparound happened. A step that
    /// would leave the stored position non-finite falls back to the linear
    /// flat update.
    pub fn move_by(&mut self, k: Curvature, dt: f32, direction: Direction) -> bool {
        let dir = self.direction_vector(direction);
        if dir == Vec3::ZERO {
            return false;
        }

        if k.is_euclidean() {
            self.position += dir.extend(0.0) * dt;
            return false;
        }

        let eye = self.eye(k);
        let heading = k.port_vector(dir, eye);
        let mut next = k.retract(eye, heading * dt);

        let wrapped = k.is_spherical() && next.w < 0.0;
        if wrapped {
            next = -next;
        }

        let flat = k.flatten_point(next);
        if !flat.is_finite() {
            // The port is singular at the spherical antipode of the origin.
            // Step in flat coordinates instead so the stored state stays finite.
            tracing::debug!(target: "camera", position = ?self.position, "degenerate geodesic step");
            self.position += dir.extend(0.0) * dt;
            return false;
        }

        if wrapped {
            self.up = -self.up;
            tracing::debug!(target: "camera", position = ?next, "wrapped through the antipode");
        }
        self.position = flat.extend(1.0);
        wrapped
    }

    /// View matrix: moves the eye to the origin and aligns the look
    /// direction with `-z`.
    pub fn view(&self, k: Curvature) -> Matrix4 {
        if k.is_euclidean() {
            let world_up = Vec3::Y;
            let kz = euclidean_normalize(-self.look_at.truncate());
            let ix = euclidean_normalize(euclidean_cross(world_up, kz));
            let jy = euclidean_normalize(euclidean_cross(kz, ix));

            let back = self.position * Vec4::new(-1.0, -1.0, -1.0, 1.0);
            return k.translate_matrix(back) * basis_matrix(ix, jy, kz);
        }

        let eye = self.eye(k);
        let forward = k.port_vector(self.look_at.truncate(), eye);
        let up = k.port_vector(self.up.truncate(), eye);

        let a = k.value();
        let kz = k.normalize(-forward);
        let ix = k.normalize(k.cross(eye, up, kz)) * a;
        let jy = k.normalize(k.cross(eye, kz, ix)) * a;

        Matrix4::from_rows(
            Vec4::new(ix.x, jy.x, kz.x, a * eye.x),
            Vec4::new(ix.y, jy.y, kz.y, a * eye.y),
            Vec4::new(ix.z, jy.z, kz.z, a * eye.z),
            Vec4::new(a * ix.w, a * jy.w, a * kz.w, eye.w),
        )
    }

    /// Projection matrix. Curved space replaces the linear near/far terms
    /// with `sin`/`sinh` of the planes.
    pub fn projection(&self, k: Curvature) -> Matrix4 {
        let Projection { fov, aspect, near, .. } = self.projection;
        let far = self.projection.far_for(k);

        let (a, b) = if k.is_euclidean() {
            (-(near + far) / (far - near), -2.0 * near * far / (far - near))
        } else {
            (
                -k.sin(near + far) / k.sin(far - near),
                -2.0 * k.sin(near) * k.sin(far) / k.sin(far - near),
            )
        };

        let t = (fov / 2.0).tan();
        Matrix4::from_rows(
            Vec4::new(1.0 / (t * aspect), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0 / t, 0.0, 0.0),
            Vec4::new(0.0, 0.0, a, -1.0),
            Vec4::new(0.0, 0.0, b, 0.0),
        )
    }

    pub fn view_projection(&self, k: Curvature) -> Matrix4 {
        self.view(k) * self.projection(k)
    }
}

fn basis_matrix(i: Vec3, j: Vec3, k: Vec3) -> Matrix4 {
    Matrix4::from_rows(
        Vec4::new(i.x, j.x, k.x, 0.0),
        Vec4::new(i.y, j.y, k.y, 0.0),
        Vec4::new(i.z, j.z, k.z, 0.0),
        Vec4::W,
    )
}
