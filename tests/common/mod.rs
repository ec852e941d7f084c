#![allow(dead_code)]

use image::{DynamicImage, Rgba, RgbaImage};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::{tempdir, TempDir};

/// Temporary directory together with its canonical path, so comparisons with
/// paths produced by the file manager hold on every platform.
pub fn scratch_dir() -> (TempDir, PathBuf) {
    let temp = tempdir().expect("tempdir");
    let root = fs::canonicalize(temp.path()).expect("canonicalize tempdir");
    (temp, root)
}

pub fn png_bytes(texts: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, 2, 1);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    for (keyword, text) in texts {
        encoder
            .add_text_chunk(keyword.to_string(), text.to_string())
            .expect("text chunk");
    }
    let mut writer = encoder.write_header().expect("png header");
    writer
        .write_image_data(&[255, 0, 0, 255, 0, 0, 255, 255])
        .expect("png data");
    writer.finish().expect("png finish");
    buf
}

pub fn write_png(path: impl AsRef<Path>, texts: &[(&str, &str)]) -> PathBuf {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, png_bytes(texts)).expect("write png");
    path.to_path_buf()
}

/// Writes empty-text PNGs named `names` under `root`.
pub fn populate(root: &Path, names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|name| write_png(root.join(name), &[])).collect()
}

pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    let pixel = Rgba(color);
    let buffer = RgbaImage::from_pixel(width, height, pixel);
    DynamicImage::ImageRgba8(buffer)
}
