// src/bin/compose_text.rs

//! Renders the configured text with a fixed-width bitmap font sheet.

use std::path::Path;

use anyhow::Context;
use log::info;
use pixel_assets::{
    compose,
    config::{Config, CONFIG_FILE_NAME},
    preview::viewer_for,
};

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting compose-text...");

    let config = Config::load_or_default(Path::new(CONFIG_FILE_NAME))
        .context("Failed to load configuration")?;
    let mut viewer = viewer_for(&config.display);

    let written = compose::run(&config.compositor, viewer.as_mut())?;

    info!("compose-text wrote {}", written.display());
    Ok(())
}
