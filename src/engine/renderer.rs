use anyhow::{Context, Result};
use kappa::scene::{Frame, Scene, ShaderKind};

/// Headless stand-in for the GPU backend. Walks the draw list the way a
/// real pass would, resolving every referenced resource, and keeps counters.
#[derive(Debug, Default)]
pub struct Renderer {
    frame_count: u64,
    draw_count: u64,
    vertex_count: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        tracing::trace!(frame = self.frame_count, "begin frame");
    }

    pub fn submit(&mut self, scene: &Scene, frame: &Frame) -> Result<()> {
        for draw in &frame.draws {
            let mesh = scene
                .mesh(draw.mesh)
                .with_context(|| format!("draw references missing mesh {:?}", draw.mesh))?;
            scene
                .texture(draw.texture)
                .with_context(|| format!("draw references missing texture {:?}", draw.texture))?;
            scene
                .material(draw.material)
                .with_context(|| format!("draw references missing material {:?}", draw.material))?;

            match draw.shader {
                ShaderKind::Geom => {
                    for strip in (0..mesh.strips()).filter_map(|i| mesh.strip(i)) {
                        self.vertex_count += strip.len() as u64;
                    }
                }
            }
            self.draw_count += 1;
        }

        tracing::trace!(
            frame = self.frame_count,
            draws = frame.draws.len(),
            curvature = frame.state.curvature.value(),
            "submitted frame"
        );
        Ok(())
    }

    pub fn end_frame(&mut self) {
        self.frame_count += 1;
        tracing::trace!(frame = self.frame_count, "end frame");
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    pub fn vertex_count(&self) -> u64 {
        self.vertex_count
    }
}
