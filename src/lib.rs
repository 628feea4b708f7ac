// src/lib.rs

//! Small pixel-art asset tools.
//!
//! - `compose-text` slices a fixed-width bitmap font sheet and renders a
//!   string by concatenating its glyphs.
//! - `upscale` enlarges an image by an integer factor with nearest-neighbour
//!   sampling.
//!
//! Both show their result through a [`preview::Viewer`] before writing it.

pub mod buffer;
pub mod charset;
pub mod compose;
pub mod config;
pub mod error;
pub mod font_sheet;
pub mod preview;
pub mod resample;
pub mod upscale;

pub use charset::{CharIndexMap, DuplicatePolicy};
pub use config::Config;
pub use error::AssetError;
pub use font_sheet::FontSheet;
pub use resample::upscale_nearest;
