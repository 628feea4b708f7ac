// src/compose.rs

//! The glyph compositor procedure: load sheet, compose text, show, save.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::buffer::{describe, save_png};
use crate::config::CompositorConfig;
use crate::font_sheet::FontSheet;
use crate::preview::Viewer;

/// `<output_dir>/<text>.png`
pub fn output_path(output_dir: &Path, text: &str) -> PathBuf {
    output_dir.join(format!("{text}.png"))
}

/// Renders `config.text` with the configured font sheet and writes it out.
///
/// The viewer sees the image before anything is written. Returns the path of
/// the written file.
pub fn run(config: &CompositorConfig, viewer: &mut dyn Viewer) -> Result<PathBuf> {
    let sheet = FontSheet::open(
        &config.sheet_path,
        &config.charset_path,
        config.glyph_width,
        config.duplicates,
    )
    .with_context(|| {
        format!(
            "Failed to load font sheet {} with character set {}",
            config.sheet_path.display(),
            config.charset_path.display()
        )
    })?;

    let rendered = sheet
        .compose(&config.text)
        .with_context(|| format!("Failed to compose {:?}", config.text))?;
    info!("Composed {:?}: {}", config.text, describe(&rendered));

    viewer
        .show(&config.text, &rendered)
        .context("Failed to display composed text")?;

    let path = output_path(&config.output_dir, &config.text);
    save_png(&rendered, &path).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
