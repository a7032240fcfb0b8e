//! Board representation and per-turn level state.
//!
//! Contains cell symbols, grids (used for both the live board and target
//! layouts), and the level fields re-read every turn.

pub mod cell;
pub mod grid;
pub mod level;

pub use cell::{Cell, ALL_CELLS};
pub use grid::{Comparison, Grid, GridError, ShapeMismatch};
pub use level::{LevelState, PieceQueue, Route, MAX_PIECES};
