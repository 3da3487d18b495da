//! Integration tests for the complete sampling pipeline
//!
//! These tests validate the end-to-end workflow including:
//! - Upload validation and image decoding
//! - Pointer mapping through a letterboxed container
//! - Region averaging
//! - Lab conversion and ΔE2000 against a standard
//! - Settings files and stored records

use std::fs::File;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use pick_colors::constants::upload::MAX_FILE_SIZE_BYTES;
use pick_colors::geometry::magnifier_view;
use pick_colors::image_loader::{load_image, validate_upload};
use pick_colors::{
    analyze_point, rgb_to_lab, AnalysisError, CaptureLog, ColorConverter, ContainerSize,
    DeltaECategory, Illuminant, ImageCoordinateMapper, ImageSize, PixelCoord, Point, RgbColor,
    SampleSize, SamplerSettings, StandardLibrary,
};

const RED: RgbColor = RgbColor::new(255, 0, 0);
const GREEN: RgbColor = RgbColor::new(0, 255, 0);
const BLUE: RgbColor = RgbColor::new(0, 0, 255);
const WHITE: RgbColor = RgbColor::new(255, 255, 255);

/// 40x20 image split in quadrants: red | green over blue | white
fn write_quadrants(dir: &TempDir) -> PathBuf {
    let image = RgbaImage::from_fn(40, 20, |x, y| {
        let rgb = match (x < 20, y < 10) {
            (true, true) => RED,
            (false, true) => GREEN,
            (true, false) => BLUE,
            (false, false) => WHITE,
        };
        Rgba([rgb.r, rgb.g, rgb.b, 255])
    });
    let path = dir.path().join("quadrants.png");
    image.save(&path).unwrap();
    path
}

fn square_container_mapper(natural: ImageSize) -> ImageCoordinateMapper {
    // 40x20 renders as 400x200 with 100-unit bands above and below
    ImageCoordinateMapper::new(natural, ContainerSize::new(400.0, 400.0)).unwrap()
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_load_missing_file() {
    let err = load_image(Path::new("nonexistent_file.png")).unwrap_err();
    match err {
        AnalysisError::ImageLoadError { .. } => {}
        _ => panic!("Expected ImageLoadError, got: {:?}", err),
    }
}

#[test]
fn test_oversized_upload_is_rejected_before_decoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("huge.png");
    File::create(&path)
        .unwrap()
        .set_len(MAX_FILE_SIZE_BYTES + 1)
        .unwrap();

    let err = validate_upload(&path).unwrap_err();
    assert!(matches!(err, AnalysisError::FileTooLarge { .. }));
    assert!(err.user_message().contains("10MB"));
    assert!(!err.is_recoverable());
}

#[test]
fn test_non_image_upload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();
    assert!(matches!(
        load_image(&path),
        Err(AnalysisError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_degenerate_container_is_recoverable() {
    let err: AnalysisError =
        ImageCoordinateMapper::new(ImageSize::new(40, 20), ContainerSize::new(0.0, 300.0))
            .unwrap_err()
            .into();
    assert!(err.is_recoverable());
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn test_sample_each_quadrant() {
    let dir = TempDir::new().unwrap();
    let surface = load_image(&write_quadrants(&dir)).unwrap();
    let mapper = square_container_mapper(surface.size());
    let settings = SamplerSettings::default();

    let cases = [
        (Point::new(100.0, 150.0), PixelCoord::new(10, 5), RED),
        (Point::new(300.0, 150.0), PixelCoord::new(30, 5), GREEN),
        (Point::new(100.0, 250.0), PixelCoord::new(10, 15), BLUE),
        (Point::new(300.0, 250.0), PixelCoord::new(30, 15), WHITE),
    ];
    for (pointer, pixel, rgb) in cases {
        let reading = analyze_point(&surface, &mapper, pointer, &settings, None).unwrap();
        assert_eq!(reading.source_pixel, pixel);
        assert_eq!(reading.rgb, rgb);
        assert_eq!(reading.lab, rgb_to_lab(rgb, Illuminant::D65));
    }
}

#[test]
fn test_sample_at_quadrant_corner_averages_window() {
    let dir = TempDir::new().unwrap();
    let surface = load_image(&write_quadrants(&dir)).unwrap();
    let mapper = square_container_mapper(surface.size());

    // Window 18..23 x 8..13: 4 red, 6 green, 6 blue, 9 white
    let reading = analyze_point(
        &surface,
        &mapper,
        mapper.rendered_center(),
        &SamplerSettings::default(),
        None,
    )
    .unwrap();
    assert_eq!(reading.source_pixel, PixelCoord::new(20, 10));
    assert_eq!(reading.rgb, RgbColor::new(133, 153, 153));
}

#[test]
fn test_pointer_over_letterbox_band_samples_nearest_edge() {
    let dir = TempDir::new().unwrap();
    let surface = load_image(&write_quadrants(&dir)).unwrap();
    let mapper = square_container_mapper(surface.size());

    let reading = analyze_point(
        &surface,
        &mapper,
        Point::new(300.0, 20.0),
        &SamplerSettings::default(),
        None,
    )
    .unwrap();
    assert_eq!(reading.source_pixel, PixelCoord::new(30, 0));
    assert_eq!(reading.rgb, GREEN);
    assert_eq!(mapper.clamp_pointer(Point::new(300.0, 20.0)), Point::new(300.0, 100.0));
}

#[test]
fn test_compare_against_standard() {
    let dir = TempDir::new().unwrap();
    let surface = load_image(&write_quadrants(&dir)).unwrap();
    let mapper = square_container_mapper(surface.size());
    let settings = SamplerSettings::default();

    let exact = analyze_point(&surface, &mapper, Point::new(100.0, 150.0), &settings, Some(RED))
        .unwrap();
    assert_eq!(exact.delta_e, Some(0.0));
    assert_eq!(exact.category(), Some(DeltaECategory::Imperceptible));

    let far = analyze_point(&surface, &mapper, Point::new(300.0, 250.0), &settings, Some(RED))
        .unwrap();
    let expected = ColorConverter::default().compare(WHITE, RED);
    assert_eq!(far.delta_e, Some(expected));
    assert!(expected > 10.0);
}

#[test]
fn test_settings_file_controls_sampling() {
    let dir = TempDir::new().unwrap();
    let surface = load_image(&write_quadrants(&dir)).unwrap();
    let mapper = square_container_mapper(surface.size());

    let settings_path = dir.path().join("settings.json");
    std::fs::write(&settings_path, r#"{"illuminant":"F2","sampleSize":1}"#).unwrap();
    let settings = SamplerSettings::from_json_file(&settings_path).unwrap();
    assert_eq!(settings.sample_size, SampleSize::new(1).unwrap());

    // A 1x1 window at the shared corner sees only the white pixel
    let reading =
        analyze_point(&surface, &mapper, mapper.rendered_center(), &settings, None).unwrap();
    assert_eq!(reading.rgb, WHITE);
    assert_eq!(reading.illuminant, Illuminant::F2);
    assert_eq!(reading.lab, rgb_to_lab(WHITE, Illuminant::F2));
}

#[test]
fn test_magnifier_follows_picker() {
    let mapper = square_container_mapper(ImageSize::new(40, 20));
    let picker = mapper.clamp_pointer(Point::new(200.0, 200.0));
    let view = magnifier_view(&mapper, picker, 150.0, SampleSize::default());

    // 15 source pixels across, centered on source (20, 10)
    assert_eq!(view.source.width, 15.0);
    assert_eq!(view.source.x, 12.5);
    assert_eq!(view.source.y, 2.5);
    assert_eq!(view.placement, Point::new(260.0, 140.0));
}

// ============================================================================
// Records Tests
// ============================================================================

#[test]
fn test_capture_history_follows_illuminant() {
    let mut library = StandardLibrary::new();
    let id = library.add(RED).id;
    library.toggle_select(id);

    let mut log = CaptureLog::new();
    log.capture(RgbColor::new(240, 20, 10), library.selected());
    log.capture(WHITE, None);

    let d65 = log.readings(&ColorConverter::new(Illuminant::D65));
    let tungsten = log.readings(&ColorConverter::new(Illuminant::A));

    // Newest first
    assert_eq!(d65[0].rgb, WHITE);
    assert_eq!(d65[1].standard_used, Some(RED));
    assert!(d65[1].delta_e.is_some());
    assert_ne!(d65[0].lab, tungsten[0].lab);

    // Persist and reload: readings are reproduced from raw RGB alone
    let json = serde_json::to_string(&log).unwrap();
    let restored: CaptureLog = serde_json::from_str(&json).unwrap();
    let again = restored.readings(&ColorConverter::new(Illuminant::A));
    assert_eq!(again.len(), 2);
    assert_eq!(again[1].delta_e, tungsten[1].delta_e);
}
