use crate::camera::Camera;
use crate::core::geometry::Curvature;
use crate::core::math::linalg::{rotation_matrix, scale_matrix, Matrix4};
use crate::mesh::{Mesh, Plane, Sphere};
use glam::{Vec3, Vec4};
use image::{Rgba, RgbaImage};
use std::f32::consts::FRAC_PI_2;

/// Shader program an object is drawn with. The renderer matches on this to
/// batch objects per program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Curvature-aware Phong shading.
    Geom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kd: Vec3,
    pub ks: Vec3,
    pub ka: Vec3,
    pub shininess: f32,
}

/// Point light, placed in flat coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub la: Vec3,
    pub le: Vec3,
    pub position: Vec4,
}

/// Light after porting, laid out for upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub la: [f32; 4],
    pub le: [f32; 4],
    pub position: [f32; 4],
}

/// Scale, rotation and translation of one object for the current space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModellingTransform {
    pub scale: Matrix4,
    pub rotate: Matrix4,
    pub translate: Matrix4,
}

impl ModellingTransform {
    /// Scale, then rotate, then translate.
    pub fn model(&self) -> Matrix4 {
        self.scale * self.rotate * self.translate
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub shader: ShaderKind,
    pub material: MaterialId,
    pub texture: TextureId,
    pub mesh: MeshId,
    /// Flat position, ported every frame.
    pub translation: Vec4,
    pub rotation_axis: Vec3,
    pub rotation_angle: f32,
    pub scale: Vec3,
    /// Scale used instead of `scale` in spherical space.
    pub sph_scale: Vec3,
    pub draw_in_spherical_space: bool,
}

impl Object {
    pub fn new(shader: ShaderKind, material: MaterialId, texture: TextureId, mesh: MeshId) -> Self {
        Self {
            shader,
            material,
            texture,
            mesh,
            translation: Vec4::W,
            rotation_axis: Vec3::Z,
            rotation_angle: 0.0,
            scale: Vec3::ONE,
            sph_scale: Vec3::ONE,
            draw_in_spherical_space: true,
        }
    }

    pub fn is_visible(&self, k: Curvature) -> bool {
        !k.is_spherical() || self.draw_in_spherical_space
    }

    pub fn modelling_transform(&self, k: Curvature) -> ModellingTransform {
        let scale = if k.is_spherical() { self.sph_scale } else { self.scale };
        ModellingTransform {
            scale: scale_matrix(scale),
            rotate: rotation_matrix(self.rotation_angle, self.rotation_axis),
            translate: k.translate_matrix(k.port_point(self.translation.truncate())),
        }
    }

    /// Per-step animation hook over `[tstart, tend)`. Objects are static.
    pub fn animate(&mut self, _tstart: f32, _tend: f32) {}
}

/// Everything the shaders need that is shared by all objects of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub curvature: Curvature,
    pub view: Matrix4,
    pub projection: Matrix4,
    pub view_projection: Matrix4,
    /// Ported eye position.
    pub eye: Vec4,
    pub lights: Vec<LightUniform>,
}

/// Per-object uniform block.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub scale: [[f32; 4]; 4],
    pub rotate: [[f32; 4]; 4],
    pub translate: [[f32; 4]; 4],
    pub view_projection: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub curvature: f32,
    pub n_lights: u32,
    pub _padding: [f32; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub shader: ShaderKind,
    pub mesh: MeshId,
    pub texture: TextureId,
    pub material: MaterialId,
    pub transform: ModellingTransform,
    pub uniforms: ObjectUniforms,
}

/// Output of [`Scene::render`]: shared state plus one call per visible object.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: RenderState,
    pub draws: Vec<DrawCall>,
}

/// Yellow/blue checkerboard with one texel per square.
pub fn checkerboard(width: u32, height: u32) -> RgbaImage {
    let yellow = Rgba([255, 255, 0, 255]);
    let blue = Rgba([0, 0, 255, 255]);
    RgbaImage::from_fn(width, height, |x, y| if (x & 1) ^ (y & 1) == 1 { yellow } else { blue })
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<Light>,
    meshes: Vec<Mesh>,
    textures: Vec<RgbaImage>,
    materials: Vec<Material>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn add_texture(&mut self, texture: RgbaImage) -> TextureId {
        tracing::debug!(width = texture.width(), height = texture.height(), "adding texture");
        self.textures.push(texture);
        TextureId(self.textures.len() - 1)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_object(&mut self, object: Object) {
        tracing::debug!(translation = ?object.translation, mesh = object.mesh.0, "adding object");
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn texture(&self, id: TextureId) -> Option<&RgbaImage> {
        self.textures.get(id.0)
    }

    pub fn textures(&self) -> &[RgbaImage] {
        &self.textures
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// A grid of planes with a 3x3 block of spheres and three lights.
    #[allow(clippy::approx_constant)]
    pub fn demo() -> Self {
        let mut scene = Self::new();

        let material = scene.add_material(Material {
            kd: Vec3::new(0.5, 0.1, 0.1),
            ks: Vec3::new(0.5, 0.1, 0.1),
            ka: Vec3::new(0.5, 0.1, 0.1),
            shininess: 100.0,
        });
        let texture_4x4 = scene.add_texture(checkerboard(4, 4));
        let texture_40x40 = scene.add_texture(checkerboard(40, 40));
        let sphere = scene.add_mesh(Mesh::with_default_level(&Sphere));
        let plane = scene.add_mesh(Mesh::with_default_level(&Plane));

        for y in -3..=3 {
            let height = y as f32;

            let mut horizontal = Object::new(ShaderKind::Geom, material, texture_40x40, plane);
            horizontal.translation = Vec4::new(0.0, height, 0.0, 1.0);
            horizontal.scale = Vec3::splat(6.0);
            horizontal.sph_scale = Vec3::splat(3.14);
            horizontal.draw_in_spherical_space = y == 0;
            scene.add_object(horizontal);

            let mut vertical = Object::new(ShaderKind::Geom, material, texture_40x40, plane);
            vertical.rotation_axis = Vec3::Z;
            vertical.rotation_angle = FRAC_PI_2;
            vertical.translation = Vec4::new(height, 0.0, 0.0, 1.0);
            vertical.scale = Vec3::splat(6.0);
            vertical.draw_in_spherical_space = false;
            scene.add_object(vertical);
        }

        for i in -1..=1 {
            for j in -1..=1 {
                let mut ball = Object::new(ShaderKind::Geom, material, texture_4x4, sphere);
                ball.translation = Vec4::new(i as f32 * 1.57, 0.0, j as f32 * 1.57, 1.0);
                ball.scale = Vec3::splat(0.3);
                ball.sph_scale = Vec3::splat(0.3);
                scene.add_object(ball);
            }
        }

        for position in [Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, 0.0, 2.0)] {
            scene.add_light(Light {
                la: Vec3::splat(1.5),
                le: Vec3::splat(3.0),
                position: position.extend(1.0),
            });
        }

        tracing::debug!(objects = scene.objects.len(), lights = scene.lights.len(), "demo scene built");
        scene
    }

    pub fn animate(&mut self, tstart: f32, tend: f32) {
        for object in &mut self.objects {
            object.animate(tstart, tend);
        }
    }

    /// Frame-wide uniforms for `camera` under `k`.
    pub fn render_state(&self, camera: &Camera, k: Curvature) -> RenderState {
        let view = camera.view(k);
        let projection = camera.projection(k);
        let lights = self
            .lights
            .iter()
            .map(|light| LightUniform {
                la: light.la.extend(0.0).to_array(),
                le: light.le.extend(0.0).to_array(),
                position: k.port_point(light.position.truncate()).to_array(),
            })
            .collect();

        RenderState {
            curvature: k,
            view,
            projection,
            view_projection: view * projection,
            eye: camera.eye(k),
            lights,
        }
    }

    /// Builds the draw list for one frame. Everything in it is computed with
    /// the single curvature snapshot `k`.
    pub fn render(&self, camera: &Camera, k: Curvature) -> Frame {
        let state = self.render_state(camera, k);
        tracing::trace!(target: "scene", view = ?state.view, projection = ?state.projection, "frame matrices");

        let draws = self
            .objects
            .iter()
            .filter(|object| object.is_visible(k))
            .map(|object| {
                let transform = object.modelling_transform(k);
                DrawCall {
                    shader: object.shader,
                    mesh: object.mesh,
                    texture: object.texture,
                    material: object.material,
                    uniforms: ObjectUniforms {
                        scale: transform.scale.to_rows_array(),
                        rotate: transform.rotate.to_rows_array(),
                        translate: transform.translate.to_rows_array(),
                        view_projection: state.view_projection.to_rows_array(),
                        eye: state.eye.to_array(),
                        curvature: k.value(),
                        n_lights: state.lights.len() as u32,
                        _padding: [0.0; 2],
                    },
                    transform,
                }
            })
            .collect();

        Frame { state, draws }
    }
}
