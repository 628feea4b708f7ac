// src/config.rs

//! Defines the configuration structures for the `pixel-assets` tools.
//!
//! Every value here used to be a literal baked into the tools. The defaults
//! reproduce those literals exactly, so running a binary with no config file
//! behaves as before. An optional JSON file can override any subset of fields.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::charset::DuplicatePolicy;

/// Name of the optional config file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pixel-assets.json";

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)] // Apply default values for the entire struct if a field is missing.
pub struct Config {
    /// Glyph compositor settings.
    pub compositor: CompositorConfig,
    /// Nearest-neighbour upscaler settings.
    pub upscaler: UpscalerConfig,
    /// Preview window settings shared by both tools.
    pub display: DisplayConfig,
}

impl Config {
    /// Reads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_json(&text)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?;
                info!("Configuration loaded from {}", path.display());
                debug!("{:?}", config);
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No {} found; using default configuration", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read config file {}", path.display())),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

// --- Compositor Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompositorConfig {
    /// Font sheet image. Any format the `image` crate decodes, alpha included.
    pub sheet_path: PathBuf,
    /// UTF-8 file listing the sheet's characters left to right.
    pub charset_path: PathBuf,
    /// Width of one glyph column in pixels.
    pub glyph_width: u32,
    /// Text to render. The output file is named `<text>.png`.
    pub text: String,
    /// Directory the rendered image is written to.
    pub output_dir: PathBuf,
    /// Resolution for characters listed more than once in the character set.
    pub duplicates: DuplicatePolicy,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        CompositorConfig {
            sheet_path: PathBuf::from("font0.png"),
            charset_path: PathBuf::from("font0.txt"),
            glyph_width: 16,
            text: "START".to_string(),
            output_dir: PathBuf::from("."),
            duplicates: DuplicatePolicy::LastWins,
        }
    }
}

// --- Upscaler Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UpscalerConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Integer factor applied to both dimensions.
    pub scale: u32,
}

impl Default for UpscalerConfig {
    fn default() -> Self {
        UpscalerConfig {
            input_path: PathBuf::from("start.png"),
            output_path: PathBuf::from("start_x3.png"),
            scale: 3,
        }
    }
}

// --- Display Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show each result in a window and wait for it to be closed before saving.
    /// When false, or when no window system is available, results are only logged.
    pub enabled: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { enabled: true }
    }
}
