//! Shape module - the piece catalog and the 4x4 rotation
//!
//! Every piece is a 4x4 binary matrix (1 = filled). Templates are constants;
//! rotating returns a new matrix and never touches the template.

use arrayvec::ArrayVec;

use crate::types::{ShapeKind, SHAPE_SIZE};

/// Offset `(row, col)` of a filled sub-cell inside the 4x4 box
pub type CellOffset = (i8, i8);

/// Filled sub-cells of a shape; at most the whole box.
pub type FilledCells = ArrayVec<CellOffset, { SHAPE_SIZE * SHAPE_SIZE }>;

/// A 4x4 binary piece matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: [[u8; SHAPE_SIZE]; SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from a matrix.
    ///
    /// # Panics
    ///
    /// Panics if any value is not 0 or 1. Malformed shape data is a bug in the
    /// caller, not something to recover from.
    pub const fn new(rows: [[u8; SHAPE_SIZE]; SHAPE_SIZE]) -> Self {
        let mut r = 0;
        while r < SHAPE_SIZE {
            let mut c = 0;
            while c < SHAPE_SIZE {
                assert!(rows[r][c] <= 1, "shape cells must be 0 or 1");
                c += 1;
            }
            r += 1;
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[[u8; SHAPE_SIZE]; SHAPE_SIZE] {
        &self.rows
    }

    pub fn is_filled(&self, r: usize, c: usize) -> bool {
        r < SHAPE_SIZE && c < SHAPE_SIZE && self.rows[r][c] == 1
    }

    /// Quarter-turn clockwise through the fixed box: the value at `(r, c)`
    /// moves to `(c, 3 - r)`. No re-alignment to the top-left corner.
    pub fn rotated_cw(&self) -> Self {
        let mut out = [[0u8; SHAPE_SIZE]; SHAPE_SIZE];
        for (r, row) in self.rows.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                out[c][SHAPE_SIZE - 1 - r] = *v;
            }
        }
        Self { rows: out }
    }

    /// Offsets of every filled sub-cell, row-major
    pub fn filled(&self) -> FilledCells {
        let mut out = FilledCells::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                if *v == 1 {
                    out.push((r as i8, c as i8));
                }
            }
        }
        out
    }

    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|v| **v == 1).count()
    }

    /// Leftmost and rightmost filled columns, `None` for an empty matrix
    pub fn col_span(&self) -> Option<(usize, usize)> {
        let mut span: Option<(usize, usize)> = None;
        for row in &self.rows {
            for (c, v) in row.iter().enumerate() {
                if *v == 1 {
                    span = Some(match span {
                        Some((lo, hi)) => (lo.min(c), hi.max(c)),
                        None => (c, c),
                    });
                }
            }
        }
        span
    }

    /// Topmost and bottommost filled rows, `None` for an empty matrix
    pub fn row_span(&self) -> Option<(usize, usize)> {
        let mut span: Option<(usize, usize)> = None;
        for (r, row) in self.rows.iter().enumerate() {
            if row.contains(&1) {
                span = Some(match span {
                    Some((lo, _)) => (lo, r),
                    None => (r, r),
                });
            }
        }
        span
    }
}

const BAR: Shape = Shape::new([
    [1, 1, 1, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);

const SQUARE: Shape = Shape::new([
    [1, 1, 0, 0],
    [1, 1, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);

const S: Shape = Shape::new([
    [0, 1, 1, 0],
    [1, 1, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);

const Z: Shape = Shape::new([
    [1, 1, 0, 0],
    [0, 1, 1, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);

const T: Shape = Shape::new([
    [1, 1, 1, 0],
    [0, 1, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);

/// Catalog, indexed by `ShapeKind::index()`
pub const CATALOG: [Shape; 5] = [BAR, SQUARE, S, Z, T];

/// Spawn template for a kind
pub fn template(kind: ShapeKind) -> Shape {
    CATALOG[kind.index()]
}
