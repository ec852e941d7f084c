use pngviewer::metadata::*;
use std::io::Cursor;
use std::path::Path;

mod common;
use common::{png_bytes, scratch_dir, write_png};

const SAMPLE: &str = "masterpiece, best quality, (red hair, blue eyes:1.2), 1girl\nBREAK outdoors,, sky\nNegative prompt: lowres, bad hands\nSteps: 20, Sampler: Euler a";

#[test]
fn format_parameters_drops_negative_prompt_and_wraps_terms() {
    let formatted = format_parameters(SAMPLE);
    let expected = [
        "    masterpiece,",
        "    best quality,",
        "    (red hair, blue eyes:1.2),",
        "    1girl BREAK",
        "    ",
        "    outdoors,",
        "    sky",
    ]
    .join("\n");
    assert_eq!(formatted, expected);
    assert!(!formatted.contains("lowres"));
    assert!(!formatted.contains("Steps"));
}

#[test]
fn format_parameters_collapses_whitespace_and_comma_runs() {
    assert_eq!(format_parameters("a, ,,b"), "    a,\n    b");
    assert_eq!(format_parameters("  one\n\n two\tthree "), "    one two three");
}

#[test]
fn format_parameters_keeps_commas_inside_parentheses() {
    let formatted = format_parameters("(a, b), (c,d)");
    assert_eq!(formatted, "    (a, b),\n    (c,d)");
}

#[test]
fn format_parameters_is_idempotent_without_commas_or_parentheses() {
    for text in ["plain prompt text", "first BREAK second", "  spaced\n out  "] {
        let once = format_parameters(text);
        assert_eq!(format_parameters(&once), once);
    }
}

#[test]
fn from_reader_collects_header_and_text_chunks() {
    let bytes = png_bytes(&[("parameters", "a, b"), ("Software", "generator")]);
    let metadata = ImageMetadata::from_reader(Path::new("/x/sample.png"), Cursor::new(bytes)).unwrap();

    assert_eq!(metadata.format, "PNG");
    assert_eq!((metadata.width, metadata.height), (2, 1));
    assert_eq!(metadata.mode, "RGBA");
    assert_eq!(metadata.parameters(), Some("a, b"));
    assert_eq!(metadata.get("Software"), Some("generator"));
    assert_eq!(metadata.get("missing"), None);
    assert_eq!(metadata.file_name(), "sample.png");
}

#[test]
fn compressed_and_international_text_is_decoded() {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, 1, 1);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Sixteen);
        encoder
            .add_ztxt_chunk("parameters".to_string(), "zipped, prompt".to_string())
            .unwrap();
        encoder
            .add_itxt_chunk("Comment".to_string(), "日本語".to_string())
            .unwrap();
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0, 0]).unwrap();
        writer.finish().unwrap();
    }
    let metadata = ImageMetadata::from_reader(Path::new("gray.png"), Cursor::new(buf)).unwrap();
    assert_eq!(metadata.mode, "I;16");
    assert_eq!(metadata.parameters(), Some("zipped, prompt"));
    assert_eq!(metadata.get("Comment"), Some("日本語"));
}

#[test]
fn repeated_keyword_resolves_to_the_later_chunk() {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, 1, 1);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .add_text_chunk("parameters".to_string(), "latin, prompt".to_string())
            .unwrap();
        encoder
            .add_itxt_chunk("parameters".to_string(), "unicode, prompt".to_string())
            .unwrap();
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0]).unwrap();
        writer.finish().unwrap();
    }
    let metadata = ImageMetadata::from_reader(Path::new("both.png"), Cursor::new(buf)).unwrap();
    assert_eq!(metadata.parameters(), Some("unicode, prompt"));
}

#[test]
fn formatted_renders_header_and_parameters() {
    let (_tmp, root) = scratch_dir();
    let path = write_png(root.join("img.png"), &[("parameters", "a, b")]);
    let metadata = ImageMetadata::load(&path).unwrap();
    assert_eq!(
        metadata.formatted(),
        "File name: img.png\nFormat: PNG\nSize: 2x1\nMode: RGBA\nParameters:\n    a,\n    b"
    );
}

#[test]
fn formatted_without_parameters_lists_other_chunks() {
    let (_tmp, root) = scratch_dir();
    let path = write_png(root.join("img.png"), &[("Software", "tool")]);
    let text = ImageMetadata::load(&path).unwrap().formatted();
    assert!(text.ends_with("Parameters:\n    (none)\nOther chunks:\n    Software: 4 chars"));
}

#[test]
fn load_reports_missing_and_invalid_files() {
    let (_tmp, root) = scratch_dir();
    let missing = ImageMetadata::load(&root.join("missing.png")).unwrap_err();
    assert!(matches!(missing, MetadataError::Io { .. }));

    let bogus = root.join("bogus.png");
    std::fs::write(&bogus, b"not a png").unwrap();
    let invalid = ImageMetadata::load(&bogus).unwrap_err();
    assert!(matches!(invalid, MetadataError::Decoding { .. }));
}

#[test]
fn mode_names_follow_conventional_labels() {
    use png::{BitDepth, ColorType};
    assert_eq!(mode_name(ColorType::Grayscale, BitDepth::One), "1");
    assert_eq!(mode_name(ColorType::Grayscale, BitDepth::Eight), "L");
    assert_eq!(mode_name(ColorType::GrayscaleAlpha, BitDepth::Eight), "LA");
    assert_eq!(mode_name(ColorType::Rgb, BitDepth::Eight), "RGB");
    assert_eq!(mode_name(ColorType::Indexed, BitDepth::Four), "P");
}
