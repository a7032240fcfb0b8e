//! Text notation for boards and piece queues.
//!
//! Boards travel as a single whitespace-free token: rows separated by `/`,
//! one glyph per cell, `.` for blank.
//!
//! ```text
//! OOOOO/O┌.┐O/─┘O└─/O...O/OOOOO
//! ```
//!
//! Readers that only know sprite names can send the tile notation instead:
//! rows separated by `/`, sprite names separated by `,`.
//!
//! ```text
//! pc1,pc1,pc1/pc1,pc0,pc1/pc1,pc1,pc1
//! ```
//!
//! A lone `-` stands for an empty board or an empty piece queue.

use crate::board::{Cell, Grid, PieceQueue};

/// Errors that can occur while parsing board or piece notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("empty notation")]
    Empty,

    #[error("unknown glyph '{glyph}' at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },

    #[error("unknown piece glyph '{0}'")]
    UnknownPiece(char),
}

/// Parses a board from glyph notation.
pub fn parse_board(s: &str) -> Result<Grid, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::Empty);
    }
    if s == "-" {
        return Ok(Grid::default());
    }

    let mut rows = Vec::new();
    for (r, row) in s.split('/').enumerate() {
        let cells = row
            .chars()
            .enumerate()
            .map(|(c, glyph)| {
                Cell::from_glyph(glyph).ok_or(NotationError::UnknownGlyph { glyph, row: r, col: c })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(cells);
    }
    Ok(Grid::new(rows))
}

/// Encodes a board into glyph notation.
pub fn encode_board(grid: &Grid) -> String {
    if grid.is_empty() {
        return "-".to_string();
    }
    grid.rows()
        .iter()
        .map(|row| row.iter().map(|c| c.notation_char()).collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}

/// Parses a board from tile notation. Unrecognized sprite names become
/// `Cell::Unknown`, so this only fails on empty input.
pub fn parse_tiles(s: &str) -> Result<Grid, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::Empty);
    }
    if s == "-" {
        return Ok(Grid::default());
    }

    let rows = s
        .split('/')
        .map(|row| {
            row.split(',')
                .filter(|name| !name.is_empty())
                .map(|name| Cell::from_sprite(name.trim()))
                .collect()
        })
        .collect();
    Ok(Grid::new(rows))
}

/// Parses piece glyphs, in queue order. Pieces may be given as separate
/// tokens or run together in one.
pub fn parse_pieces<'a, I>(tokens: I) -> Result<PieceQueue, NotationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut pieces = Vec::new();
    for token in tokens {
        if token == "-" {
            continue;
        }
        for glyph in token.chars() {
            let cell = Cell::from_glyph(glyph).ok_or(NotationError::UnknownPiece(glyph))?;
            pieces.push(cell);
        }
    }
    Ok(PieceQueue::new(pieces))
}
