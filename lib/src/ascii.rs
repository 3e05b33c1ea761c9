use crate::error::{AsciiError, Result};
use crate::luminance::LuminanceModel;
use crate::pixels::PixelGrid;
use crate::ramp::Ramp;
use rayon::prelude::*;
use std::io::Write;

/// Line terminator used by the text renderer
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Rows of ramp characters, one per source pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiGrid {
    rows: Vec<Vec<char>>,
}

impl AsciiGrid {
    /// Build a grid from explicit rows
    ///
    /// # Errors
    /// Returns [`AsciiError::RaggedGrid`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<char>>) -> Result<Self> {
        let expected = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(AsciiError::RaggedGrid {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// True when there is no character to draw
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }
}

/// Map every pixel to a ramp character
///
/// # Arguments
/// * `pixels` - Sampled source colors
/// * `ramp` - Characters from darkest to lightest
/// * `model` - Luminance formula applied to each pixel
///
/// # Returns
/// A grid with exactly the shape of `pixels`, rows processed in parallel
pub fn build_ascii_grid(pixels: &PixelGrid, ramp: &Ramp, model: LuminanceModel) -> AsciiGrid {
    let rows = pixels
        .rows()
        .par_iter()
        .map(|row| {
            row.iter()
                .map(|&rgb| ramp.glyph_for(model.luminance(rgb)))
                .collect()
        })
        .collect();
    AsciiGrid { rows }
}

/// One string per grid row, without terminators
///
/// # Arguments
/// * `grid` - Characters to join
///
/// # Returns
/// `grid.height()` strings of `grid.width()` characters each
pub fn render_text(grid: &AsciiGrid) -> Vec<String> {
    grid.rows.iter().map(|row| row.iter().collect()).collect()
}

/// Write the grid as text, every row followed by [`LINE_SEPARATOR`]
///
/// # Arguments
/// * `grid` - Characters to write
/// * `out` - Destination, flushed once every row is written
///
/// # Errors
/// Propagates any error from `out`.
pub fn write_text<W: Write>(grid: &AsciiGrid, mut out: W) -> Result<()> {
    for line in render_text(grid) {
        out.write_all(line.as_bytes())?;
        out.write_all(LINE_SEPARATOR.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
