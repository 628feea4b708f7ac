// src/charset.rs

//! Maps characters to their column in a fixed-width font sheet.
//!
//! The character-set string lists every glyph of the sheet left to right, so
//! the n-th code point of the string lives in column n. Columns are counted in
//! code points, not bytes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{AssetError, Result};

/// What to do when a character occurs more than once in the character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The last occurrence owns the character.
    #[default]
    LastWins,
    /// The first occurrence owns the character.
    FirstWins,
    /// Duplicates are a configuration error.
    Reject,
}

/// Character to zero-based sheet column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharIndexMap {
    columns: HashMap<char, u32>,
    // Number of code points in the character-set string, duplicates included.
    len: u32,
}

impl CharIndexMap {
    /// Builds the map by enumerating `charset` left to right.
    pub fn build(charset: &str, policy: DuplicatePolicy) -> Result<Self> {
        let mut columns = HashMap::with_capacity(charset.len());
        let mut len: u32 = 0;

        for (column, ch) in (0u32..).zip(charset.chars()) {
            len = column + 1;
            match columns.get(&ch).copied() {
                None => {
                    columns.insert(ch, column);
                }
                Some(first) => match policy {
                    DuplicatePolicy::LastWins => {
                        warn!(
                            "Character {:?} repeated at column {} (previously {}); using the later column",
                            ch, column, first
                        );
                        columns.insert(ch, column);
                    }
                    DuplicatePolicy::FirstWins => {
                        warn!(
                            "Character {:?} repeated at column {} (previously {}); keeping the earlier column",
                            ch, column, first
                        );
                    }
                    DuplicatePolicy::Reject => {
                        return Err(AssetError::DuplicateCharacter {
                            ch,
                            first,
                            second: column,
                        });
                    }
                },
            }
        }

        debug!(
            "Built character map: {} columns, {} distinct characters",
            len,
            columns.len()
        );
        Ok(Self { columns, len })
    }

    /// Number of sheet columns the character set describes.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, ch: char) -> bool {
        self.columns.contains_key(&ch)
    }

    /// Column of `ch`, or `None` if the sheet has no glyph for it.
    pub fn get(&self, ch: char) -> Option<u32> {
        self.columns.get(&ch).copied()
    }

    /// Column of `ch`. `position` and `text` only feed the error message.
    pub fn index_of(&self, ch: char, position: usize, text: &str) -> Result<u32> {
        self.get(ch).ok_or_else(|| AssetError::UnknownCharacter {
            ch,
            position,
            text: text.to_owned(),
        })
    }

    /// Columns for every character of `text`, in order.
    pub fn columns_for(&self, text: &str) -> Result<Vec<u32>> {
        text.chars()
            .enumerate()
            .map(|(position, ch)| self.index_of(ch, position, text))
            .collect()
    }
}

/// Reads a character-set file.
///
/// The whole file is the character set, except that one trailing line
/// terminator (`\n` or `\r\n`) is dropped.
pub fn read_charset(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut text = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}
