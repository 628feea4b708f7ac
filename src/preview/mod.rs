// src/preview/mod.rs
//! Showing a result to the user before it is written out.
//!
//! - Viewer: the capability both tools call after transforming an image
//! - HeadlessViewer: logs and returns, for tests and machines without a display
//! - X11Viewer: blocking preview window (feature `x11-viewer`)

pub mod headless;
pub mod viewer;
#[cfg(feature = "x11-viewer")]
pub mod x11_window;

pub use headless::HeadlessViewer;
pub use viewer::Viewer;
#[cfg(feature = "x11-viewer")]
pub use x11_window::X11Viewer;

use crate::config::DisplayConfig;
use log::{info, warn};

/// Picks the viewer for this run.
///
/// Falls back to `HeadlessViewer` when the display is disabled or no window
/// system can be reached, so a missing display never stops a result from
/// being saved.
pub fn viewer_for(config: &DisplayConfig) -> Box<dyn Viewer> {
    if !config.enabled {
        info!("Display disabled in configuration; results will only be logged");
        return Box::new(HeadlessViewer::new());
    }
    windowed_viewer().unwrap_or_else(|| Box::new(HeadlessViewer::new()))
}

#[cfg(feature = "x11-viewer")]
fn windowed_viewer() -> Option<Box<dyn Viewer>> {
    match X11Viewer::new() {
        Ok(viewer) => Some(Box::new(viewer)),
        Err(e) => {
            warn!("Cannot open preview window ({:#}); continuing headless", e);
            None
        }
    }
}

#[cfg(not(feature = "x11-viewer"))]
fn windowed_viewer() -> Option<Box<dyn Viewer>> {
    warn!("Built without the x11-viewer feature; continuing headless");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};
    use test_log::test;

    #[test]
    fn disabled_display_is_headless_and_does_not_block() {
        let mut viewer = viewer_for(&DisplayConfig { enabled: false });
        let image = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        viewer.show("test", &image).unwrap();
    }

    #[test]
    fn preview_window_is_a_default_feature() {
        let manifest = include_str!("../../Cargo.toml");
        let default_line = manifest
            .lines()
            .find(|line| line.starts_with("default ="))
            .unwrap();
        assert!(default_line.contains("\"x11-viewer\""), "{default_line}");
    }
}
