use pngviewer::app::loader::load_image;

mod common;
use common::{scratch_dir, write_png};

#[test]
fn load_image_returns_pixels_and_metadata_lines() {
    let (_tmp, root) = scratch_dir();
    let path = write_png(root.join("gen.png"), &[("parameters", "cat, hat")]);

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.path, path);
    assert_eq!(loaded.color_image.size, [2, 1]);
    assert_eq!(loaded.image_size(), eframe::egui::vec2(2.0, 1.0));
    assert_eq!(
        loaded.metadata_lines(),
        vec![
            "File name: gen.png",
            "Format: PNG",
            "Size: 2x1",
            "Mode: RGBA",
            "Parameters:",
            "    cat,",
            "    hat",
        ]
    );
}

#[test]
fn status_line_shows_position_path_and_load_time() {
    let (_tmp, root) = scratch_dir();
    let path = write_png(root.join("one.png"), &[]);

    let loaded = load_image(&path).unwrap();
    let status = loaded.status_line(2, 5);
    assert!(status.starts_with(&format!("2/5  {}  (", path.display())));
    assert!(status.ends_with(" ms)"));
}

#[test]
fn load_image_fails_for_non_png_content() {
    let (_tmp, root) = scratch_dir();
    let path = root.join("broken.png");
    std::fs::write(&path, b"nope").unwrap();
    assert!(load_image(&path).is_err());
}
