use super::input::InputEvent;
use anyhow::{ensure, Context, Result};
use kappa::{Curvature, Projection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub app_name: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    /// Largest simulation step inside one frame, in seconds.
    pub sub_step: f32,
    /// Frames to simulate before shutting down.
    pub frames: u32,
    pub curvature: Curvature,
    /// Field of view and near/far planes. `aspect` is recomputed from the
    /// window size.
    pub projection: Projection,
    /// When set, the scene textures are written here as PNG files.
    pub texture_dir: Option<PathBuf>,
    pub input: Vec<InputEvent>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "Kappa View".to_string(),
            window_width: 1200,
            window_height: 800,
            target_fps: 60,
            sub_step: 0.1,
            frames: 120,
            curvature: Curvature::EUCLIDEAN,
            projection: Projection::default(),
            texture_dir: None,
            input: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = ron::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        tracing::info!(target: "engine", path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.window_width > 0 && self.window_height > 0, "window size must be non-zero");
        ensure!(self.sub_step > 0.0, "sub_step must be positive, got {}", self.sub_step);
        let p = &self.projection;
        ensure!(p.near > 0.0, "near plane must be positive");
        ensure!(p.far > p.near && p.far_spherical > p.near, "far planes must lie beyond the near plane");
        ensure!(
            p.far_spherical < std::f32::consts::PI,
            "spherical far plane must stay below pi, got {}",
            p.far_spherical
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FrameTiming {
    pub delta_seconds: f32,
    pub fps: f32,
}

pub struct FixedTimestep {
    frame_duration: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn from_fps(fps: u32) -> Self {
        let frame_duration = 1.0 / fps.max(1) as f32;
        Self {
            frame_duration,
            accumulator: 0.0,
        }
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.frame_duration {
            self.accumulator -= self.frame_duration;
            true
        } else {
            false
        }
    }

    pub fn timing(&self) -> FrameTiming {
        FrameTiming {
            delta_seconds: self.frame_duration,
            fps: 1.0 / self.frame_duration,
        }
    }
}

/// Splits `[tstart, tend)` into steps of at most `dt`; the last one is
/// shortened to land exactly on `tend`. Yields `(t, Dt)`.
pub fn sub_steps(tstart: f32, tend: f32, dt: f32) -> SubSteps {
    SubSteps { t: tstart, tend, dt }
}

pub struct SubSteps {
    t: f32,
    tend: f32,
    dt: f32,
}

impl Iterator for SubSteps {
    type Item = (f32, f32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.t >= self.tend || self.dt <= 0.0 {
            return None;
        }
        let t = self.t;
        let step = self.dt.min(self.tend - t);
        self.t += step;
        Some((t, step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_steps_cover_interval() {
        let steps: Vec<(f32, f32)> = sub_steps(0.0, 0.25, 0.1).collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], (0.0, 0.1));
        assert!((steps[2].1 - 0.05).abs() < 1e-6);

        let total: f32 = steps.iter().map(|(_, dt)| dt).sum();
        assert!((total - 0.25).abs() < 1e-6);
    }

    #[test]
    fn short_frame_is_one_step() {
        let steps: Vec<(f32, f32)> = sub_steps(1.0, 1.0 + 1.0 / 60.0, 0.1).collect();
        assert_eq!(steps.len(), 1);
        assert!((steps[0].1 - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(sub_steps(2.0, 2.0, 0.1).count(), 0);
    }

    #[test]
    fn fixed_timestep_releases_whole_frames() {
        let mut timestep = FixedTimestep::from_fps(50);
        timestep.accumulate(0.03);
        assert!(timestep.should_step());
        assert!(!timestep.should_step());
        timestep.accumulate(0.015);
        assert!(timestep.should_step());
        assert!((timestep.timing().fps - 50.0).abs() < 1e-3);
    }

    #[test]
    fn config_round_trips_through_ron() {
        let text = r#"(
            app_name: "test",
            frames: 3,
            curvature: "spherical",
            projection: (far_spherical: 3.0),
        )"#;
        let config: EngineConfig = ron::from_str(text).unwrap();
        assert_eq!(config.app_name, "test");
        assert_eq!(config.frames, 3);
        assert_eq!(config.curvature, Curvature::SPHERICAL);
        assert_eq!(config.projection.far_spherical, 3.0);
        assert_eq!(config.projection.far, 10.0);
        assert_eq!(config.sub_step, 0.1);
        config.validate().unwrap();
    }

    #[test]
    fn invalid_far_plane_is_rejected() {
        let mut config = EngineConfig::default();
        config.projection.far_spherical = std::f32::consts::PI;
        assert!(config.validate().is_err());
        config.projection.far_spherical = 3.0;
        config.sub_step = 0.0;
        assert!(config.validate().is_err());
    }
}
