//! Headless viewer implementation.

use crate::buffer::describe;
use crate::preview::viewer::Viewer;
use anyhow::Result;
use image::DynamicImage;
use log::info;

/// Logs what would have been shown and returns immediately.
#[derive(Debug, Default)]
pub struct HeadlessViewer {
    shown: usize,
}

impl HeadlessViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of images passed to `show` so far.
    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl Viewer for HeadlessViewer {
    fn show(&mut self, title: &str, image: &DynamicImage) -> Result<()> {
        self.shown += 1;
        info!("HeadlessViewer: '{}' {}", title, describe(image));
        Ok(())
    }
}
