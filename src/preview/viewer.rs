// src/preview/viewer.rs
//! Viewer trait - the display step of both tools.

use anyhow::Result;
use image::DynamicImage;

/// Presents an image to the user.
///
/// Implementations may block until the user dismisses the image; callers
/// persist their output only after `show` returns.
pub trait Viewer {
    /// Shows `image` under `title`.
    fn show(&mut self, title: &str, image: &DynamicImage) -> Result<()>;
}
