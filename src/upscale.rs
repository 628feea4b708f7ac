// src/upscale.rs

//! The upscaler procedure: load, scale, show, save.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::buffer::describe;
use crate::config::UpscalerConfig;
use crate::preview::Viewer;
use crate::resample::upscale_nearest;

/// Upscales `config.input_path` and writes the result to `config.output_path`.
///
/// The output format follows the output path's extension.
pub fn run(config: &UpscalerConfig, viewer: &mut dyn Viewer) -> Result<PathBuf> {
    let source = image::open(&config.input_path)
        .with_context(|| format!("Failed to load image: {}", config.input_path.display()))?;
    info!(
        "Loaded {}: {}",
        config.input_path.display(),
        describe(&source)
    );

    let scaled = upscale_nearest(&source, config.scale)
        .with_context(|| format!("Failed to upscale by {}", config.scale))?;
    info!("Upscaled x{}: {}", config.scale, describe(&scaled));

    let title = config.output_path.display().to_string();
    viewer
        .show(&title, &scaled)
        .context("Failed to display upscaled image")?;

    scaled
        .save(&config.output_path)
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    info!("Wrote {}", config.output_path.display());
    Ok(config.output_path.clone())
}
