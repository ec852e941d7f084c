use pngviewer::image_utils::*;

mod common;
use common::{png_bytes, solid_image};

#[test]
fn to_color_image_matches_input_dimensions() {
    let img = solid_image(3, 5, [10, 20, 30, 255]);
    let color = to_color_image(&img);
    assert_eq!(color.size, [3, 5]);
    assert_eq!(color.pixels.len(), (img.width() * img.height()) as usize);
    assert_eq!(color.pixels[0].r(), 10);
    assert_eq!(color.pixels[0].g(), 20);
    assert_eq!(color.pixels[0].b(), 30);
}

#[test]
fn fit_for_texture_only_shrinks_oversized_images() {
    let small = fit_for_texture(solid_image(8, 4, [0, 0, 0, 255]), 16);
    assert_eq!((small.width(), small.height()), (8, 4));

    let large = fit_for_texture(solid_image(40, 10, [0, 0, 0, 255]), 20);
    assert_eq!((large.width(), large.height()), (20, 5));
}

#[test]
fn decode_png_reads_pixels_and_rejects_garbage() {
    let image = decode_png(&png_bytes(&[])).unwrap();
    assert_eq!((image.width(), image.height()), (2, 1));
    assert!(decode_png(b"garbage").is_err());
}
