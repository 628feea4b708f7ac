// src/resample.rs

//! Integer nearest-neighbour upscaling.

use image::{DynamicImage, ImageBuffer, Pixel};
use log::debug;

use crate::buffer::{buffer_len, describe, map_buffer};
use crate::error::{AssetError, Result};

/// Scales both dimensions of `image` by `factor`.
///
/// Output pixel `(x, y)` is source pixel `(x / factor, y / factor)`, so every
/// source pixel becomes a `factor` x `factor` block. No blending takes place and
/// the pixel format is unchanged.
pub fn upscale_nearest(image: &DynamicImage, factor: u32) -> Result<DynamicImage> {
    if factor == 0 {
        return Err(AssetError::ZeroScaleFactor);
    }
    let (width, height) = (image.width(), image.height());
    let overflow = || AssetError::DimensionOverflow {
        width,
        height,
        factor,
    };
    let out_width = width.checked_mul(factor).ok_or_else(overflow)?;
    let out_height = height.checked_mul(factor).ok_or_else(overflow)?;
    let bytes_per_pixel = usize::from(image.color().bytes_per_pixel());
    buffer_len(out_width, out_height, bytes_per_pixel).ok_or_else(overflow)?;

    let scaled = map_buffer!(image, |src| replicate(src, factor, out_width, out_height));
    debug!(
        "Upscaled {} by {} to {}",
        describe(image),
        factor,
        describe(&scaled)
    );
    Ok(scaled)
}

fn replicate<P>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
    factor: u32,
    out_width: u32,
    out_height: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
{
    ImageBuffer::from_fn(out_width, out_height, |x, y| {
        *src.get_pixel(x / factor, y / factor)
    })
}
