// src/buffer.rs

//! Pixel-format dispatch for `DynamicImage`.
//!
//! The transforms in this crate are written once against a typed
//! `ImageBuffer<P, _>`; `map_buffer!` runs such a transform on whatever
//! variant a decoded image holds and wraps the result in the same variant, so
//! channel count and bit depth survive the round trip.

use std::path::Path;

use image::{DynamicImage, ImageFormat, Pixel};
use log::info;

use crate::error::Result;

/// Evaluates `$body` with `$buf` bound to the typed buffer inside `$image`
/// (a `&DynamicImage`) and rewraps the resulting buffer in the same variant.
///
/// Variants this crate does not know about are converted to RGBA8 first.
macro_rules! map_buffer {
    ($image:expr, |$buf:ident| $body:expr) => {
        match $image {
            ::image::DynamicImage::ImageLuma8($buf) => ::image::DynamicImage::ImageLuma8($body),
            ::image::DynamicImage::ImageLumaA8($buf) => ::image::DynamicImage::ImageLumaA8($body),
            ::image::DynamicImage::ImageRgb8($buf) => ::image::DynamicImage::ImageRgb8($body),
            ::image::DynamicImage::ImageRgba8($buf) => ::image::DynamicImage::ImageRgba8($body),
            ::image::DynamicImage::ImageLuma16($buf) => ::image::DynamicImage::ImageLuma16($body),
            ::image::DynamicImage::ImageLumaA16($buf) => {
                ::image::DynamicImage::ImageLumaA16($body)
            }
            ::image::DynamicImage::ImageRgb16($buf) => ::image::DynamicImage::ImageRgb16($body),
            ::image::DynamicImage::ImageRgba16($buf) => ::image::DynamicImage::ImageRgba16($body),
            ::image::DynamicImage::ImageRgb32F($buf) => ::image::DynamicImage::ImageRgb32F($body),
            ::image::DynamicImage::ImageRgba32F($buf) => {
                ::image::DynamicImage::ImageRgba32F($body)
            }
            other => {
                ::log::warn!(
                    "Unrecognised pixel format {:?}; converting to RGBA8",
                    other.color()
                );
                let converted = other.to_rgba8();
                let $buf = &converted;
                ::image::DynamicImage::ImageRgba8($body)
            }
        }
    };
}

pub(crate) use map_buffer;

/// Byte length of a `width` x `height` buffer, or `None` when it cannot be
/// addressed. `ImageBuffer::new` panics in that case, so callers check first.
pub fn buffer_len(width: u32, height: u32, bytes_per_pixel: usize) -> Option<usize> {
    usize::try_from(u64::from(width).checked_mul(u64::from(height))?)
        .ok()?
        .checked_mul(bytes_per_pixel)
}

/// Bytes per pixel of a typed buffer's pixel `P`.
pub fn pixel_bytes<P: Pixel>() -> usize {
    usize::from(P::CHANNEL_COUNT) * std::mem::size_of::<P::Subpixel>()
}

/// Short human-readable description used in log lines, e.g. `80x16 Rgba8`.
pub fn describe(image: &DynamicImage) -> String {
    format!("{}x{} {:?}", image.width(), image.height(), image.color())
}

/// Writes `image` as PNG regardless of the path's extension.
pub fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    info!("Wrote {} ({})", path.display(), describe(image));
    Ok(())
}
