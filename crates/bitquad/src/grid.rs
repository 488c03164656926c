//! Grid layout for permutation cells
//!
//! Cells fill a `col_count x col_count` square centered on the origin. The
//! first cell sits in the top-left slot and rows fill downward, so with fewer
//! cells than slots the empty slots are at the bottom right.

use crate::codec::FlagCount;
use crate::config::GridConfig;
use crate::error::{BitquadError, Result};

/// Vertices emitted per quad (two triangles).
pub const VERTICES_PER_QUAD: usize = 6;

/// Cell geometry for one grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Number of cells, `2^n`
    pub cell_count: usize,
    /// Columns, also the side of the square slot grid
    pub col_count: usize,
    /// Rows actually occupied, derived from `col_count`
    pub row_count: usize,
    /// Side length of one quad
    pub quad_size: f32,
    pub size: f32,
    pub padding: f32,
}

impl GridLayout {
    /// Lay out `2^n` cells in a square of `size` with `padding` between cells.
    pub fn new(n: FlagCount, size: f32, padding: f32) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(BitquadError::InvalidSize(size));
        }
        if !padding.is_finite() || padding < 0.0 {
            return Err(BitquadError::InvalidPadding(padding));
        }

        let cell_count = n.permutation_count();
        let col_count = cell_count.div_ceil(n.get().max(1));
        let row_count = cell_count.div_ceil(col_count);
        let quad_size = (size - (col_count + 1) as f32 * padding) / col_count as f32;

        if quad_size <= 0.0 {
            return Err(BitquadError::NoRoomForCells {
                size,
                padding,
                columns: col_count,
            });
        }

        Ok(Self {
            cell_count,
            col_count,
            row_count,
            quad_size,
            size,
            padding,
        })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self> {
        Self::new(config.flag_count, config.size, config.padding)
    }

    /// Row and column of a cell; row 0 is the bottom of the square.
    #[inline]
    pub fn cell_slot(&self, index: usize) -> (usize, usize) {
        let row = self.col_count - 1 - index / self.col_count;
        let col = index % self.col_count;
        (row, col)
    }

    /// Center of a cell.
    pub fn cell_center(&self, index: usize) -> [f32; 2] {
        let (row, col) = self.cell_slot(index);
        [self.axis_offset(col), self.axis_offset(row)]
    }

    fn axis_offset(&self, slot: usize) -> f32 {
        let slot = slot as f32;
        self.padding * (slot + 1.0) + slot * self.quad_size + 0.5 * self.quad_size
            - 0.5 * self.size
    }

    /// Axis-aligned bounds of a cell as `[min_x, min_y, max_x, max_y]`.
    pub fn cell_bounds(&self, index: usize) -> [f32; 4] {
        let [x, y] = self.cell_center(index);
        let s = self.quad_size * 0.5;
        [x - s, y - s, x + s, y + s]
    }

    /// Total vertices for every cell.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.cell_count * VERTICES_PER_QUAD
    }
}

/// Six CCW vertices of a square quad centered at `(x, y)`.
///
/// Order: top-left, bottom-left, bottom-right, bottom-right, top-right,
/// top-left.
pub fn quad(x: f32, y: f32, size: f32) -> [[f32; 3]; VERTICES_PER_QUAD] {
    let s = size * 0.5;
    [
        [x - s, y + s, 0.0],
        [x - s, y - s, 0.0],
        [x + s, y - s, 0.0],
        [x + s, y - s, 0.0],
        [x + s, y + s, 0.0],
        [x - s, y + s, 0.0],
    ]
}
