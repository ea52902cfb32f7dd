pub mod core;
pub mod input;
pub mod renderer;
pub mod resources;

use anyhow::Result;
use glam::Vec4;
use self::core::{sub_steps, EngineConfig, FixedTimestep};
use self::input::{Action, InputScript};
use kappa::scene::Scene;
use kappa::{Camera, CurvatureState, Direction};
use self::renderer::Renderer;

pub struct EngineApp {
    config: EngineConfig,
    curvature: CurvatureState,
    scene: Scene,
    camera: Camera,
    renderer: Renderer,
    timestep: FixedTimestep,
    input: InputScript,
    held: Direction,
    time: f32,
    wraps: u32,
}

impl EngineApp {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let scene = Scene::demo();
        if let Some(dir) = &config.texture_dir {
            let written = resources::export_textures(&scene, dir)?;
            tracing::info!(target: "engine", count = written.len(), dir = %dir.display(), "textures exported");
        }

        let mut camera = Camera::new(config.projection);
        camera.update_aspect_ratio(config.window_width, config.window_height);

        Ok(Self {
            curvature: CurvatureState::new(config.curvature),
            timestep: FixedTimestep::from_fps(config.target_fps),
            input: InputScript::new(config.input.clone()),
            renderer: Renderer::new(),
            held: Direction::None,
            time: 0.0,
            wraps: 0,
            scene,
            camera,
            config,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        tracing::info!(
            target: "engine",
            app = %self.config.app_name,
            curvature = %self.curvature.get(),
            frames = self.config.frames,
            fps = self.timestep.timing().fps,
            "Engine starting"
        );

        let frame_duration = self.timestep.timing().delta_seconds;
        for frame in 0..self.config.frames {
            self.handle_input(frame);

            self.timestep.accumulate(frame_duration);
            while self.timestep.should_step() {
                let tstart = self.time;
                let tend = tstart + frame_duration;
                self.on_time_elapsed(tstart, tend);
                self.time = tend;
            }

            self.render()?;
        }

        let k = self.curvature.get();
        let eye = self.camera.eye(k);
        tracing::info!(
            target: "engine",
            frames = self.renderer.frame_count(),
            draws = self.renderer.draw_count(),
            vertices = self.renderer.vertex_count(),
            wraps = self.wraps,
            script_finished = self.input.is_finished(),
            from_origin = k.distance(Vec4::W, eye),
            "Engine shutdown complete"
        );
        Ok(())
    }

    /// Applies scripted events between frames, so a curvature switch never
    /// lands in the middle of one.
    fn handle_input(&mut self, frame: u32) {
        for event in self.input.drain_until(frame) {
            tracing::debug!(target: "engine", frame, action = ?event.action, "input");
            match event.action {
                Action::Move(direction) => self.held = direction,
                Action::Pan(dx, dy) => self.camera.pan(dx, dy),
                Action::SetCurvature(k) => self.curvature.set(k),
            }
        }
    }

    fn on_time_elapsed(&mut self, tstart: f32, tend: f32) {
        let k = self.curvature.frame();
        for (t, dt) in sub_steps(tstart, tend, self.config.sub_step) {
            self.scene.animate(t, t + dt);
            if self.camera.move_by(k, dt, self.held) {
                self.wraps += 1;
                tracing::info!(target: "engine", t, position = ?self.camera.position(), "camera wrapped through the antipode");
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let k = self.curvature.frame();
        let frame = self.scene.render(&self.camera, k);

        self.renderer.begin_frame();
        self.renderer.submit(&self.scene, &frame)?;
        self.renderer.end_frame();
        Ok(())
    }
}
