// src/bin/upscale.rs

//! Enlarges the configured image with nearest-neighbour sampling.

use std::path::Path;

use anyhow::Context;
use log::info;
use pixel_assets::{
    config::{Config, CONFIG_FILE_NAME},
    preview::viewer_for,
    upscale,
};

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting upscale...");

    let config = Config::load_or_default(Path::new(CONFIG_FILE_NAME))
        .context("Failed to load configuration")?;
    let mut viewer = viewer_for(&config.display);

    let written = upscale::run(&config.upscaler, viewer.as_mut())?;

    info!("upscale wrote {}", written.display());
    Ok(())
}
