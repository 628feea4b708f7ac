// src/error.rs

//! Error type shared by the charset, font sheet and resampling modules.
//!
//! Binaries and the `run` procedures wrap these in `anyhow::Error` with
//! file/step context; library functions return `AssetError` directly so
//! callers (and tests) can match on the variant.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("character {ch:?} at position {position} of {text:?} is not in the font character set")]
    UnknownCharacter {
        ch: char,
        position: usize,
        text: String,
    },
    #[error("character {ch:?} appears twice in the character set (columns {first} and {second})")]
    DuplicateCharacter { ch: char, first: u32, second: u32 },
    #[error(
        "font sheet is {sheet_width}px wide but {glyph_count} glyphs of {glyph_width}px need {required}px"
    )]
    SheetTooNarrow {
        sheet_width: u32,
        glyph_count: u32,
        glyph_width: u32,
        required: u64,
    },
    #[error("glyph width must be at least one pixel")]
    ZeroGlyphWidth,
    #[error("cannot compose an image from empty text")]
    EmptyText,
    #[error("scale factor must be at least 1")]
    ZeroScaleFactor,
    #[error("{width}x{height} scaled by {factor} does not fit in memory")]
    DimensionOverflow { width: u32, height: u32, factor: u32 },
    #[error("{glyphs} glyphs of {glyph_width}x{height}px do not fit in one image")]
    ComposedTooWide {
        glyphs: usize,
        glyph_width: u32,
        height: u32,
    },
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = AssetError> = std::result::Result<T, E>;
