//! PPI command parser.
//!
//! Parses incoming PPI (pipe placement interface) commands from raw text
//! into structured `Command` variants that the main loop can dispatch on.

use tracing::warn;

use crate::board::{Grid, PieceQueue};

use super::notation::{parse_board, parse_pieces, parse_tiles};

/// A parsed reader-to-engine PPI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the PPI handshake.
    Ppi,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Forget everything observed so far.
    NewGame,

    /// The win screen's proceed affordance is showing.
    Proceed,

    /// Active level: `level <n>` or `level none`.
    Level { level: Option<u32> },

    /// Discards left: `discards <n>` or `discards ?` when unreadable.
    Discards { discards: Option<u32> },

    /// Piece queue, piece in hand first: `pieces <glyph>...`.
    Pieces { pieces: PieceQueue },

    /// Current board, from `board <glyphs>` or `tiles <sprites>`.
    Board { board: Grid },

    /// Decide this turn's action.
    Go,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "ppi" => Some(Command::Ppi),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "proceed" => Some(Command::Proceed),
        "go" => Some(Command::Go),

        "setoption" => parse_setoption(&tokens),
        "level" => parse_level(&tokens),
        "discards" => parse_discards(&tokens),
        "pieces" => parse_pieces_cmd(&tokens),
        "board" => parse_board_cmd(&tokens),
        "tiles" => parse_tiles_cmd(&tokens),

        other => {
            warn!(target: "pipefitter::protocol", "unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
///
/// Option ids are single words (`Route`, `Targets`). Everything after
/// `value` is the value, rejoined with single spaces so paths survive.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    let (name, rest) = match tokens {
        [_, "name", name, rest @ ..] if *name != "value" => (*name, rest),
        _ => {
            warn!(target: "pipefitter::protocol", "malformed setoption: expected 'setoption name <id> [value <x>]'");
            return None;
        }
    };
    let value = match rest {
        [] | ["value"] => None,
        ["value", value @ ..] => Some(value.join(" ")),
        _ => {
            warn!(target: "pipefitter::protocol", "malformed setoption: option id '{}' must be one word", name);
            return None;
        }
    };
    Some(Command::SetOption {
        name: name.to_string(),
        value,
    })
}

/// Parses `level <n>` or `level none`.
fn parse_level(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!(target: "pipefitter::protocol", "malformed level: expected 'level <n|none>'");
        return None;
    }
    if tokens[1] == "none" {
        return Some(Command::Level { level: None });
    }
    match tokens[1].parse::<u32>() {
        Ok(n) => Some(Command::Level { level: Some(n) }),
        Err(_) => {
            warn!(target: "pipefitter::protocol", "invalid level value: '{}'", tokens[1]);
            None
        }
    }
}

/// Parses `discards <n>` or `discards ?`.
fn parse_discards(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!(target: "pipefitter::protocol", "malformed discards: expected 'discards <n|?>'");
        return None;
    }
    if tokens[1] == "?" {
        return Some(Command::Discards { discards: None });
    }
    match tokens[1].parse::<u32>() {
        Ok(n) => Some(Command::Discards { discards: Some(n) }),
        Err(_) => {
            warn!(target: "pipefitter::protocol", "invalid discards value: '{}'", tokens[1]);
            None
        }
    }
}

/// Parses `pieces <glyph>...`; `pieces -` clears the queue.
fn parse_pieces_cmd(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!(target: "pipefitter::protocol", "malformed pieces: expected 'pieces <glyph>...' or 'pieces -'");
        return None;
    }
    match parse_pieces(tokens[1..].iter().copied()) {
        Ok(pieces) => Some(Command::Pieces { pieces }),
        Err(e) => {
            warn!(target: "pipefitter::protocol", "invalid pieces: {}", e);
            None
        }
    }
}

/// Parses `board <notation>`.
fn parse_board_cmd(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!(target: "pipefitter::protocol", "malformed board: expected 'board <row>/<row>/...'");
        return None;
    }
    match parse_board(tokens[1]) {
        Ok(board) => Some(Command::Board { board }),
        Err(e) => {
            warn!(target: "pipefitter::protocol", "invalid board: {}", e);
            None
        }
    }
}

/// Parses `tiles <sprite,sprite>/<...>`.
fn parse_tiles_cmd(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!(target: "pipefitter::protocol", "malformed tiles: expected 'tiles <sprite,...>/<sprite,...>'");
        return None;
    }
    match parse_tiles(tokens[1]) {
        Ok(board) => Some(Command::Board { board }),
        Err(e) => {
            warn!(target: "pipefitter::protocol", "invalid tiles: {}", e);
            None
        }
    }
}
