//! Rectangular-ish grids of cells.
//!
//! A `Grid` is used both for the live board and for target layouts. Rows
//! are stored as read and may differ in length; nothing here assumes the
//! grid is rectangular. The outer ring (first and last row, first and last
//! column of each row) is the fixed border, everything else is interior.

use std::fmt;

use super::cell::Cell;

/// Errors that can occur while building a grid from glyph rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("unknown glyph '{glyph}' at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

/// Why two grids could not be compared cell by cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShapeMismatch {
    #[error("board has {board} rows, target has {target}")]
    RowCount { board: usize, target: usize },

    #[error("row {row}: board has {board} columns, target has {target}")]
    RowLength {
        row: usize,
        board: usize,
        target: usize,
    },
}

/// Outcome of comparing a board against a target layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Every constrained target cell is satisfied.
    Match,
    /// First constrained cell (row-major) the board does not satisfy.
    Mismatch {
        row: usize,
        col: usize,
        expected: Cell,
        found: Cell,
    },
    /// Shapes differ; the comparison fails closed.
    ShapeMismatch(ShapeMismatch),
}

/// A grid of cells, stored row by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Creates a grid from already-classified rows.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Grid { rows }
    }

    /// Builds a grid from glyph strings, one string per row.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for (r, row) in rows.into_iter().enumerate() {
            let cells = row
                .as_ref()
                .chars()
                .enumerate()
                .map(|(c, glyph)| {
                    Cell::from_glyph(glyph).ok_or(GridError::UnknownGlyph { glyph, row: r, col: c })
                })
                .collect::<Result<Vec<_>, _>>()?;
            out.push(cells);
        }
        Ok(Grid { rows: out })
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns true if `(row, col)` lies inside the border ring.
    pub fn is_interior(&self, row: usize, col: usize) -> bool {
        if row == 0 || row + 1 >= self.rows.len() {
            return false;
        }
        col >= 1 && col + 1 < self.rows[row].len()
    }

    /// Iterates interior coordinates in row-major order: top to bottom,
    /// then left to right within each row.
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let last_row = self.rows.len().saturating_sub(1);
        (1..last_row).flat_map(move |r| {
            let last_col = self.rows[r].len().saturating_sub(1);
            (1..last_col).map(move |c| (r, c))
        })
    }

    /// Returns true if no interior cell is blank.
    pub fn is_full(&self) -> bool {
        self.interior().all(|(r, c)| !self.rows[r][c].is_blank())
    }

    /// Number of blank interior cells.
    pub fn open_slots(&self) -> usize {
        self.interior()
            .filter(|&(r, c)| self.rows[r][c].is_blank())
            .count()
    }

    /// Compares this board against `target`.
    ///
    /// A blank target cell is a wildcard and matches anything. Any other
    /// target cell must be reproduced exactly. The wildcard is one-sided:
    /// a blank board cell under a non-blank target is a mismatch.
    pub fn compare(&self, target: &Grid) -> Comparison {
        if self.rows.len() != target.rows.len() {
            return Comparison::ShapeMismatch(ShapeMismatch::RowCount {
                board: self.rows.len(),
                target: target.rows.len(),
            });
        }

        // Every row length is checked before any cell.
        for (r, (board_row, target_row)) in self.rows.iter().zip(&target.rows).enumerate() {
            if board_row.len() != target_row.len() {
                return Comparison::ShapeMismatch(ShapeMismatch::RowLength {
                    row: r,
                    board: board_row.len(),
                    target: target_row.len(),
                });
            }
        }

        for (r, (board_row, target_row)) in self.rows.iter().zip(&target.rows).enumerate() {
            for (c, (&found, &expected)) in board_row.iter().zip(target_row).enumerate() {
                if !expected.is_blank() && found != expected {
                    return Comparison::Mismatch {
                        row: r,
                        col: c,
                        expected,
                        found,
                    };
                }
            }
        }

        Comparison::Match
    }

    /// Returns true if the board satisfies every constrained target cell.
    /// Never panics; differing shapes simply return false.
    pub fn matches(&self, target: &Grid) -> bool {
        self.compare(target) == Comparison::Match
    }

    /// Renders each row with level-table glyphs.
    pub fn glyph_rows(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.glyph()).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.glyph_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}
