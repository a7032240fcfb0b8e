//! Actions the engine can choose and the diagnostics attached to them.

use std::fmt;

use crate::board::{Cell, ShapeMismatch};

/// The single action chosen for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Click through the win screen to the next level.
    Proceed,
    /// Start the flow; the board satisfies the target.
    SubmitSolution,
    /// Place the piece in hand at a board coordinate (border included).
    PlaceAt { row: usize, col: usize, piece: Cell },
    /// Throw the piece in hand away.
    Discard,
    /// Abandon and restart the level.
    Restart,
}

impl Action {
    /// Returns the protocol keyword for this action.
    pub const fn keyword(&self) -> &'static str {
        match self {
            Action::Proceed => "proceed",
            Action::SubmitSolution => "submit",
            Action::PlaceAt { .. } => "place",
            Action::Discard => "discard",
            Action::Restart => "restart",
        }
    }

    /// For placements, the coordinate relative to the playable area
    /// (border excluded), which is how the game addresses cells.
    pub fn playable(&self) -> Option<(usize, usize)> {
        match *self {
            Action::PlaceAt { row, col, .. } => Some((row.saturating_sub(1), col.saturating_sub(1))),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::PlaceAt { row, col, piece } => {
                write!(f, "place {} {} {}", row, col, piece.notation_char())
            }
            other => f.write_str(other.keyword()),
        }
    }
}

/// How loudly a diagnostic should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
}

/// Side-channel notes produced alongside a decision. None of these alter
/// control flow for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Board and target differ in shape; treated as not solved.
    ShapeMismatch(ShapeMismatch),
    /// The discard counter could not be read; restart is the fallback.
    UnknownDiscardCount,
    /// The queue was empty, so no placement was attempted.
    NoPiece,
    /// No discards left, so the piece went into a don't-care slot.
    ForcedPlacement,
    /// Restarting with every interior cell filled.
    BoardFull,
    /// Restarting with open cells but nowhere legal for the piece.
    Stuck,
}

impl Diagnostic {
    pub const fn severity(&self) -> Severity {
        match self {
            Diagnostic::ShapeMismatch(_) | Diagnostic::UnknownDiscardCount => Severity::Warn,
            _ => Severity::Info,
        }
    }

    /// Short hyphenated code, used as the first token on the wire.
    pub const fn code(&self) -> &'static str {
        match self {
            Diagnostic::ShapeMismatch(_) => "shape-mismatch",
            Diagnostic::UnknownDiscardCount => "unknown-discards",
            Diagnostic::NoPiece => "no-piece",
            Diagnostic::ForcedPlacement => "forced-placement",
            Diagnostic::BoardFull => "board-full",
            Diagnostic::Stuck => "stuck",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ShapeMismatch(shape) => write!(f, "board does not fit target: {}", shape),
            Diagnostic::UnknownDiscardCount => {
                f.write_str("could not determine discards left; falling back to restart")
            }
            Diagnostic::NoPiece => f.write_str("no piece in hand"),
            Diagnostic::ForcedPlacement => {
                f.write_str("0 discards left; placing piece in a don't-care slot")
            }
            Diagnostic::BoardFull => {
                f.write_str("board is full, no discards left, and the piece could not be placed")
            }
            Diagnostic::Stuck => {
                f.write_str("no discards left and no valid placement for the current piece")
            }
        }
    }
}

/// One action plus whatever was noticed on the way to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub diagnostics: Vec<Diagnostic>,
}

impl Decision {
    pub fn new(action: Action) -> Self {
        Decision {
            action,
            diagnostics: Vec::new(),
        }
    }

    /// Returns true if any diagnostic equals `d`.
    pub fn has(&self, d: Diagnostic) -> bool {
        self.diagnostics.contains(&d)
    }
}
