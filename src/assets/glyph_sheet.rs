/*!
 * Glyph Sheets
 * Rectangular grids of glyph cells loaded from plain text files
 */

use super::AssetLoader;
use crate::core::AssetError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSheet {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl GlyphSheet {
    /// Parse rows of equal width. Trailing blank lines are ignored.
    pub fn parse(key: &str, text: &str) -> Result<Self, AssetError> {
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let Some(first) = rows.first() else {
            return Err(AssetError::Malformed {
                key: key.to_string(),
                reason: "sheet has no rows".into(),
            });
        };

        let width = first.chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(AssetError::Malformed {
                    key: key.to_string(),
                    reason: format!("row {} is {} wide, expected {}", index + 1, row_width, width),
                });
            }
            cells.extend(row.chars());
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Glyph at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1))
    }
}

/// Loads `GlyphSheet`s from files under a root directory
#[derive(Debug, Clone)]
pub struct GlyphSheetLoader {
    root: PathBuf,
}

impl GlyphSheetLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl AssetLoader<GlyphSheet> for GlyphSheetLoader {
    fn load(&self, key: &str) -> Result<GlyphSheet, AssetError> {
        let path = self.root.join(key);
        let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetError::NotFound {
                key: key.to_string(),
            },
            _ => AssetError::Io {
                key: key.to_string(),
                reason: e.to_string(),
            },
        })?;
        GlyphSheet::parse(key, &text)
    }
}
