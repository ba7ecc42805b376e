#![forbid(unsafe_code)]

//! Grid geometry: cell index ↔ row/column ↔ pixel conversions.
//!
//! Every function here is pure and total. Inputs always come from a valid
//! board, so there are no error states; out-of-range pixels clamp to the
//! nearest edge cell.
//!
//! Cells are numbered row-major: `index = row * size + column`, with the
//! origin at the top-left of the board.

use serde::{Deserialize, Serialize};

/// Axis along which a line of tiles slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Tiles move up or down; the touched tile shares the empty slot's column.
    Vertical,
    /// Tiles move left or right; the touched tile shares the empty slot's row.
    Horizontal,
}

impl Axis {
    /// Component of a `(dx, dy)` pair along this axis.
    #[inline]
    #[must_use]
    pub fn component<T>(self, (dx, dy): (T, T)) -> T {
        match self {
            Self::Vertical => dy,
            Self::Horizontal => dx,
        }
    }

    /// Build a `(dx, dy)` displacement that is `amount` along this axis.
    #[inline]
    #[must_use]
    pub fn displacement(self, amount: i32) -> Offset {
        match self {
            Self::Vertical => Offset::new(0, amount),
            Self::Horizontal => Offset::new(amount, 0),
        }
    }
}

/// Pixel displacement of a tile from its laid-out rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    #[inline]
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Rectangle a tile occupies on the paint surface.
///
/// Edges follow the usual convention: left/top inclusive, right/bottom
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TileRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TileRect {
    #[inline]
    #[must_use]
    pub const fn new(left: i32, top: i32, size: i32) -> Self {
        Self {
            left,
            top,
            right: left + size,
            bottom: top + size,
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Conversions for an `size × size` board of `tile_size`-pixel tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tile_size: i32,
}

impl Grid {
    /// Create a grid. `tile_size` may be zero before the first layout pass.
    #[inline]
    #[must_use]
    pub const fn new(size: usize, tile_size: i32) -> Self {
        Self { size, tile_size }
    }

    /// Grid whose tiles fill the largest square that fits `width × height`.
    #[must_use]
    pub fn fit(size: usize, width: i32, height: i32) -> Self {
        let edge = width.min(height).max(0);
        let tile_size = if size == 0 { 0 } else { edge / size as i32 };
        Self::new(size, tile_size)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Number of cells (`size²`).
    #[inline]
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    #[must_use]
    pub const fn column(&self, index: usize) -> usize {
        index % self.size
    }

    #[inline]
    #[must_use]
    pub const fn row(&self, index: usize) -> usize {
        index / self.size
    }

    #[inline]
    #[must_use]
    pub const fn index_from_col_row(&self, col: usize, row: usize) -> usize {
        col + row * self.size
    }

    /// Cell under a pixel position. Positions past the far edge clamp to the
    /// last row/column; negative positions land in the first.
    #[must_use]
    pub fn index_from_pixel(&self, x: i32, y: i32) -> usize {
        let col = self.band(x);
        let row = self.band(y);
        self.index_from_col_row(col, row)
    }

    fn band(&self, v: i32) -> usize {
        (0..self.size)
            .find(|&c| v < (c as i32 + 1) * self.tile_size)
            .unwrap_or(self.size.saturating_sub(1))
    }

    #[inline]
    #[must_use]
    pub const fn tile_left(&self, index: usize) -> i32 {
        self.column(index) as i32 * self.tile_size
    }

    #[inline]
    #[must_use]
    pub const fn tile_top(&self, index: usize) -> i32 {
        self.row(index) as i32 * self.tile_size
    }

    /// Laid-out rectangle of a cell.
    #[inline]
    #[must_use]
    pub const fn tile_rect(&self, index: usize) -> TileRect {
        TileRect::new(self.tile_left(index), self.tile_top(index), self.tile_size)
    }

    /// Rectangle covering every cell.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> TileRect {
        TileRect::new(0, 0, self.size as i32 * self.tile_size)
    }

    /// Whether a pixel position falls on the board.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        self.tile_size > 0 && self.bounds().contains(x, y)
    }

    /// Whether two cells share a row.
    #[inline]
    #[must_use]
    pub const fn same_row(&self, a: usize, b: usize) -> bool {
        self.row(a) == self.row(b)
    }

    /// Whether two cells share a column.
    #[inline]
    #[must_use]
    pub const fn same_column(&self, a: usize, b: usize) -> bool {
        self.column(a) == self.column(b)
    }
}

// ---------------------------------------------------------------------------
// Measuring
// ---------------------------------------------------------------------------

/// Edge lengths the board should take given the space offered by the host.
///
/// With `exact` the host's dimensions are used verbatim. Otherwise the board
/// never grows past the source image and is forced square.
#[must_use]
pub fn measure_square(available: (i32, i32), bitmap: (u32, u32), exact: bool) -> (i32, i32) {
    if exact {
        return available;
    }
    let width = available.0.min(clamp_u32(bitmap.0));
    let height = available.1.min(clamp_u32(bitmap.1));
    let edge = width.min(height);
    (edge, edge)
}

fn clamp_u32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Image slicing
// ---------------------------------------------------------------------------

/// How the source image is mapped onto the tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// Crop the centred square of the image and divide it evenly.
    #[default]
    Crop,
    /// Divide the whole image, distorting its aspect ratio.
    Stretch,
}

/// Region of the source image, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Region of a `bitmap_width × bitmap_height` image shown by the tile whose
/// home cell is `tile` on a `size × size` board.
///
/// The image provider performs the actual cropping; this only decides where.
#[must_use]
pub fn source_rect(
    mode: ImageMode,
    bitmap_width: u32,
    bitmap_height: u32,
    size: usize,
    tile: usize,
) -> SourceRect {
    if size == 0 {
        return SourceRect::default();
    }
    let n = size as u32;
    let (left_pad, top_pad, tile_w, tile_h) = match mode {
        ImageMode::Crop => {
            let (left_pad, top_pad) = if bitmap_width > bitmap_height {
                ((bitmap_width - bitmap_height) / 2, 0)
            } else {
                (0, (bitmap_height - bitmap_width) / 2)
            };
            let edge = bitmap_width.min(bitmap_height) / n;
            (left_pad, top_pad, edge, edge)
        }
        ImageMode::Stretch => (0, 0, bitmap_width / n, bitmap_height / n),
    };
    let col = (tile % size) as u32;
    let row = (tile / size) as u32;
    SourceRect {
        x: col * tile_w + left_pad,
        y: row * tile_h + top_pad,
        width: tile_w,
        height: tile_h,
    }
}
