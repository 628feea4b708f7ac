// src/font_sheet.rs

//! Fixed-width bitmap font sheets.
//!
//! A `FontSheet` is a single image holding every glyph of a font side by side,
//! each `glyph_width` pixels wide and as tall as the sheet. Composing text is
//! a matter of copying the right columns into a new image in text order.

use std::path::Path;

use image::{imageops, DynamicImage, GenericImage, ImageBuffer, Pixel};
use log::{debug, info, trace, warn};

use crate::buffer::{buffer_len, describe, map_buffer, pixel_bytes};
use crate::charset::{read_charset, CharIndexMap, DuplicatePolicy};
use crate::error::{AssetError, Result};

#[derive(Debug, Clone)]
pub struct FontSheet {
    image: DynamicImage,
    charset: CharIndexMap,
    glyph_width: u32,
}

impl FontSheet {
    /// Wraps a decoded sheet image.
    ///
    /// Fails with `SheetTooNarrow` when the character set describes more
    /// columns than the image has. A wider sheet is accepted with a warning.
    pub fn new(image: DynamicImage, charset: CharIndexMap, glyph_width: u32) -> Result<Self> {
        if glyph_width == 0 {
            return Err(AssetError::ZeroGlyphWidth);
        }

        let required = u64::from(charset.len()) * u64::from(glyph_width);
        let sheet_width = image.width();
        if required > u64::from(sheet_width) {
            return Err(AssetError::SheetTooNarrow {
                sheet_width,
                glyph_count: charset.len(),
                glyph_width,
                required,
            });
        }
        if required < u64::from(sheet_width) {
            warn!(
                "Font sheet is {}px wide but the character set only covers {}px; trailing columns are unused",
                sheet_width, required
            );
        }

        Ok(Self {
            image,
            charset,
            glyph_width,
        })
    }

    /// Loads a sheet image and its character-set file.
    pub fn open(
        sheet_path: impl AsRef<Path>,
        charset_path: impl AsRef<Path>,
        glyph_width: u32,
        policy: DuplicatePolicy,
    ) -> Result<Self> {
        let sheet_path = sheet_path.as_ref();
        let charset_path = charset_path.as_ref();

        let image = image::open(sheet_path)?;
        info!(
            "Loaded font sheet {}: {}",
            sheet_path.display(),
            describe(&image)
        );

        let charset_text = read_charset(charset_path)?;
        let charset = CharIndexMap::build(&charset_text, policy)?;
        info!(
            "Loaded character set {}: {} characters",
            charset_path.display(),
            charset.len()
        );
        debug!("Character set: {:?}", charset_text);

        Self::new(image, charset, glyph_width)
    }

    pub fn glyph_width(&self) -> u32 {
        self.glyph_width
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn charset(&self) -> &CharIndexMap {
        &self.charset
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// The sub-image for a single character.
    pub fn glyph(&self, ch: char) -> Result<DynamicImage> {
        let mut text = [0u8; 4];
        self.compose(ch.encode_utf8(&mut text))
    }

    /// Renders `text` by concatenating its glyphs left to right.
    ///
    /// The result is `text.chars().count() * glyph_width` wide, as tall as the
    /// sheet, and keeps the sheet's pixel format.
    pub fn compose(&self, text: &str) -> Result<DynamicImage> {
        if text.is_empty() {
            return Err(AssetError::EmptyText);
        }
        let columns = self.charset.columns_for(text)?;
        trace!("Columns for {:?}: {:?}", text, columns);

        let glyph_width = self.glyph_width;
        let composed = map_buffer!(&self.image, |sheet| concat_columns(
            sheet,
            &columns,
            glyph_width
        )?);

        debug!("Composed {:?}: {}", text, describe(&composed));
        Ok(composed)
    }
}

/// Copies glyph column `columns[n]` of `sheet` into slot `n` of a new buffer.
fn concat_columns<P>(
    sheet: &ImageBuffer<P, Vec<P::Subpixel>>,
    columns: &[u32],
    glyph_width: u32,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>>
where
    P: Pixel + 'static,
{
    let height = sheet.height();
    let too_wide = || AssetError::ComposedTooWide {
        glyphs: columns.len(),
        glyph_width,
        height,
    };
    let width = u32::try_from(columns.len())
        .ok()
        .and_then(|slots| slots.checked_mul(glyph_width))
        .ok_or_else(too_wide)?;
    buffer_len(width, height, pixel_bytes::<P>()).ok_or_else(too_wide)?;

    let mut out = ImageBuffer::new(width, height);
    for (slot, &column) in (0u32..).zip(columns) {
        let glyph = imageops::crop_imm(sheet, column * glyph_width, 0, glyph_width, height);
        out.copy_from(&glyph.to_image(), slot * glyph_width, 0)?;
    }
    Ok(out)
}
