use std::{
    io::Cursor,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use eframe::egui;

use crate::{
    image_utils::{decode_png, fit_for_texture, to_color_image, MAX_TEXTURE_SIDE},
    metadata::ImageMetadata,
};

/// Pixels and metadata of the image on screen, decoded from a single read.
pub struct LoadedImage {
    pub path: PathBuf,
    pub color_image: egui::ColorImage,
    pub metadata: ImageMetadata,
    pub load_duration: Duration,
}

impl LoadedImage {
    pub fn image_size(&self) -> egui::Vec2 {
        egui::vec2(self.color_image.size[0] as f32, self.color_image.size[1] as f32)
    }

    pub fn metadata_lines(&self) -> Vec<String> {
        self.metadata.formatted().lines().map(str::to_string).collect()
    }

    /// `position/total  path  (load time)` for the status bar.
    pub fn status_line(&self, position: usize, total: usize) -> String {
        format!(
            "{position}/{total}  {}  ({} ms)",
            self.path.display(),
            self.load_duration.as_millis()
        )
    }
}

pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let start = Instant::now();
    let bytes = std::fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    let metadata = ImageMetadata::from_reader(path, Cursor::new(&bytes))?;
    let image = decode_png(&bytes).with_context(|| format!("Unable to decode {}", path.display()))?;
    drop(bytes);

    let image = fit_for_texture(image, MAX_TEXTURE_SIDE);
    let color_image = to_color_image(&image);
    let load_duration = start.elapsed();
    tracing::debug!("Loaded {} in {:?}", path.display(), load_duration);

    Ok(LoadedImage {
        path: path.to_path_buf(),
        color_image,
        metadata,
        load_duration,
    })
}
