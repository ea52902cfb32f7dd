use anyhow::{Context, Result};
use kappa::scene::Scene;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes every texture of `scene` to `dir` as `texture_<id>.png`.
pub fn export_textures(scene: &Scene, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(scene.textures().len());
    for (id, texture) in scene.textures().iter().enumerate() {
        let path = dir.join(format!("texture_{id}.png"));
        texture
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), width = texture.width(), height = texture.height(), "exported texture");
        written.push(path);
    }
    Ok(written)
}
