//! PPI protocol handling.
//!
//! This module implements parsing for the PPI (pipe placement interface)
//! line protocol: the board and piece notation a reader uses to describe
//! a turn, and the command parser for the main loop.

pub mod notation;
pub mod parser;

pub use notation::{encode_board, parse_board, parse_pieces, parse_tiles, NotationError};
pub use parser::{parse_command, Command};
