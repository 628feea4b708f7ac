//! End-to-end test: build a font sheet on disk, compose text, read it back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use pixel_assets::compose::{self, output_path};
use pixel_assets::config::CompositorConfig;
use pixel_assets::preview::{HeadlessViewer, Viewer};
use pixel_assets::{AssetError, DuplicatePolicy};
use test_log::test;

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const GLYPH_WIDTH: u32 = 16;
const GLYPH_HEIGHT: u32 = 16;

/// Records what it was shown and whether the output already existed then.
struct RecordingViewer {
    watch: PathBuf,
    shown: Vec<(String, u32, u32, bool)>,
}

impl Viewer for RecordingViewer {
    fn show(&mut self, title: &str, image: &DynamicImage) -> Result<()> {
        self.shown
            .push((title.to_owned(), image.width(), image.height(), self.watch.exists()));
        Ok(())
    }
}

/// Writes a sheet whose red channel is the glyph column, plus its charset file.
fn write_fixture(dir: &Path, charset: &str) -> CompositorConfig {
    let columns = charset.chars().count() as u32;
    let sheet = RgbaImage::from_fn(columns * GLYPH_WIDTH, GLYPH_HEIGHT, |x, y| {
        let alpha = if (x + y) % 2 == 0 { 255 } else { 0 };
        Rgba([(x / GLYPH_WIDTH) as u8, (x % GLYPH_WIDTH) as u8, y as u8, alpha])
    });
    let sheet_path = dir.join("font0.png");
    sheet.save(&sheet_path).unwrap();

    let charset_path = dir.join("font0.txt");
    fs::write(&charset_path, format!("{charset}\n")).unwrap();

    CompositorConfig {
        sheet_path,
        charset_path,
        output_dir: dir.to_path_buf(),
        ..CompositorConfig::default()
    }
}

#[test]
fn composes_start_and_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), ALPHABET);
    let expected_path = dir.path().join("START.png");

    let mut viewer = RecordingViewer {
        watch: expected_path.clone(),
        shown: Vec::new(),
    };
    let written = compose::run(&config, &mut viewer).unwrap();

    assert_eq!(written, expected_path);
    // Shown once, before the file was written.
    assert_eq!(viewer.shown, vec![("START".to_owned(), 80, 16, false)]);

    let out = image::open(&written).unwrap();
    assert_eq!(out.dimensions(), (80, 16));
    assert_eq!(out.color(), image::ColorType::Rgba8);

    for (slot, column) in [18u8, 19, 0, 17, 19].into_iter().enumerate() {
        for x in 0..GLYPH_WIDTH {
            for y in 0..GLYPH_HEIGHT {
                let px = out.get_pixel(slot as u32 * GLYPH_WIDTH + x, y);
                let alpha = if (x + y) % 2 == 0 { 255 } else { 0 };
                assert_eq!(px, Rgba([column, x as u8, y as u8, alpha]));
            }
        }
    }
}

#[test]
fn written_png_round_trips_losslessly() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_fixture(dir.path(), ALPHABET);
    config.text = "ZAP".to_string();

    let sheet = pixel_assets::FontSheet::open(
        &config.sheet_path,
        &config.charset_path,
        config.glyph_width,
        config.duplicates,
    )
    .unwrap();
    let in_memory = sheet.compose(&config.text).unwrap();

    let written = compose::run(&config, &mut HeadlessViewer::new()).unwrap();
    let reread = image::open(written).unwrap();
    assert_eq!(reread, in_memory);
}

#[test]
fn unknown_character_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_fixture(dir.path(), ALPHABET);
    config.text = "GO!".to_string();

    let mut viewer = HeadlessViewer::new();
    let err = compose::run(&config, &mut viewer).unwrap_err();

    match err.downcast_ref::<AssetError>() {
        Some(AssetError::UnknownCharacter { ch, position, .. }) => {
            assert_eq!((*ch, *position), ('!', 2));
        }
        other => panic!("unexpected error: {other:?} ({err:#})"),
    }
    assert_eq!(viewer.shown(), 0);
    assert!(!output_path(dir.path(), "GO!").exists());
}

#[test]
fn mismatched_charset_is_a_structural_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), "ABC");
    // Charset now claims more glyphs than the sheet holds.
    fs::write(&config.charset_path, "ABCD").unwrap();

    let err = compose::run(&config, &mut HeadlessViewer::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AssetError>(),
        Some(AssetError::SheetTooNarrow { .. })
    ));
}

#[test]
fn missing_sheet_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = CompositorConfig {
        sheet_path: dir.path().join("nope.png"),
        charset_path: dir.path().join("nope.txt"),
        output_dir: dir.path().to_path_buf(),
        ..CompositorConfig::default()
    };
    let err = compose::run(&config, &mut HeadlessViewer::new()).unwrap_err();
    assert!(format!("{err:#}").contains("nope.png"));
}

#[test]
fn duplicate_policy_flows_through_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_fixture(dir.path(), "ABA");
    config.text = "A".to_string();

    let last = image::open(compose::run(&config, &mut HeadlessViewer::new()).unwrap()).unwrap();
    assert_eq!(last.get_pixel(0, 0)[0], 2);

    config.duplicates = DuplicatePolicy::FirstWins;
    let first = image::open(compose::run(&config, &mut HeadlessViewer::new()).unwrap()).unwrap();
    assert_eq!(first.get_pixel(0, 0)[0], 0);

    config.duplicates = DuplicatePolicy::Reject;
    let err = compose::run(&config, &mut HeadlessViewer::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AssetError>(),
        Some(AssetError::DuplicateCharacter { ch: 'A', first: 0, second: 2 })
    ));
}
