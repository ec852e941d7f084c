use anyhow::{Context, Result};
use eframe::egui;
use image::{imageops::FilterType, DynamicImage, ImageFormat};

/// Longest side uploaded as a texture; larger images are downscaled first.
pub const MAX_TEXTURE_SIDE: u32 = 4096;

pub fn decode_png(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png).context("Unable to decode PNG data")
}

pub fn fit_for_texture(image: DynamicImage, max_side: u32) -> DynamicImage {
    if image.width() <= max_side && image.height() <= max_side {
        return image;
    }
    image.resize(max_side, max_side, FilterType::Triangle)
}

pub fn to_color_image(img: &DynamicImage) -> egui::ColorImage {
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    egui::ColorImage::from_rgba_unmultiplied(size, &pixels)
}
