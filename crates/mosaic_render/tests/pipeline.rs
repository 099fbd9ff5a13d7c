//! File-level behaviour: decoding, metadata hints and output writing.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use image::{ImageFormat, RgbImage, RgbaImage};
use mosaic_render::{
    load_font, load_path, BackgroundSource, Channels, Compositor, ConfigError, FontSpec,
    MosaicError, MosaicOptions, MosaicRenderer, RecordingSurface, Rgb,
};
use png::chunk::ChunkType;

/// Writes a one-row RGB PNG that declares `background` in a `bKGD` chunk.
fn write_png_with_background(path: &Path, pixels: &[[u8; 3]], background: [u8; 3]) {
    let file = BufWriter::new(File::create(path).unwrap());
    let mut encoder = png::Encoder::new(file, pixels.len() as u32, 1);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header().unwrap();
    let bkgd: Vec<u8> = background.iter().flat_map(|&channel| [0, channel]).collect();
    writer.write_chunk(ChunkType(*b"bKGD"), &bkgd).unwrap();
    writer.write_image_data(&pixels.concat()).unwrap();
    writer.finish().unwrap();
}

fn write_rgb_png(path: &Path, image: &RgbImage) {
    image.save_with_format(path, ImageFormat::Png).unwrap();
}

#[test]
fn background_hint_is_read_from_png() {
    let dir = tempfile::tempdir().unwrap();
    let hinted = dir.path().join("hinted.png");
    write_png_with_background(&hinted, &[[0, 0, 255], [10, 20, 30], [0, 0, 255]], [0, 0, 255]);

    let source = load_path(&hinted).unwrap();
    assert_eq!(source.grid.channels(), Channels::Rgb);
    assert_eq!(source.metadata.background, Some(Rgb::new(0, 0, 255)));

    let compositor = Compositor::new(&MosaicOptions::default()).unwrap();
    let geometry = compositor.geometry(3, 1);
    let mut surface = RecordingSurface::new(geometry.width, geometry.height);
    let summary = compositor.compose(&mut surface, &source, "z").unwrap();

    assert_eq!(summary.background_source, BackgroundSource::Metadata);
    assert_eq!(summary.glyphs_drawn, 1);
    assert_eq!(surface.glyphs().next().unwrap().color, Rgb::new(10, 20, 30));
}

#[test]
fn rgba_png_loads_with_alpha_channel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alpha.png");
    RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 128]))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();

    let source = load_path(&path).unwrap();
    assert_eq!(source.grid.channels(), Channels::Rgba);
    assert_eq!(source.metadata.background, None);
}

#[test]
fn invalid_input_fails_to_decode_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.png");
    let output = dir.path().join("out.png");
    fs::write(&input, b"\x89PNG but not really").unwrap();

    let err = MosaicRenderer
        .render_to_file(&input, "text", &output, &MosaicOptions::default(), |_| {})
        .unwrap_err();
    assert!(matches!(err, MosaicError::Decode(_)));
    assert!(!output.exists());
}

#[test]
fn empty_text_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    write_rgb_png(&input, &RgbImage::new(1, 1));

    let err = MosaicRenderer.render_path(&input, "", &MosaicOptions::default()).unwrap_err();
    assert!(matches!(err, MosaicError::Config(ConfigError::EmptyText)));
}

#[test]
fn renders_to_file_with_system_font() {
    if load_font(&FontSpec::default()).is_err() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let mut image = RgbImage::from_pixel(2, 1, image::Rgb([255, 255, 255]));
    image.put_pixel(0, 0, image::Rgb([255, 0, 0]));
    write_rgb_png(&input, &image);

    let options = MosaicOptions { text_size: 10, adjust: Some(1.0), ..Default::default() };
    let mut rows = 0;
    let summary = MosaicRenderer
        .render_to_file(&input, "X", &output, &options, |_| rows += 1)
        .unwrap();

    assert_eq!(rows, 1);
    assert_eq!(summary.glyphs_drawn, 1);
    let written = image::open(&output).unwrap().into_rgb8();
    assert_eq!(written.dimensions(), (20, 10));
    // The white pixel's cell only ever sees background.
    for y in 0..10 {
        for x in 15..20 {
            assert_eq!(written.get_pixel(x, y).0, [255, 255, 255]);
        }
    }
}

#[test]
fn tiny_ratios_fail_at_encode_time() {
    if load_font(&FontSpec::default()).is_err() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_rgb_png(&input, &RgbImage::new(1, 1));

    let options = MosaicOptions { text_size: 1, adjust: Some(0.5), ..Default::default() };
    let err = MosaicRenderer.render_to_file(&input, "a", &output, &options, |_| {}).unwrap_err();
    assert!(err.is_encode());
    assert!(!output.exists());
}

#[test]
fn oversized_canvas_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_rgb_png(&input, &RgbImage::new(1, 1));

    let options =
        MosaicOptions { text_size: 4_000_000_000, adjust: Some(1.0), ..Default::default() };
    let err = MosaicRenderer.render_to_file(&input, "a", &output, &options, |_| {}).unwrap_err();
    assert!(matches!(err, MosaicError::CanvasTooLarge { .. }));
    assert!(!output.exists());
}
