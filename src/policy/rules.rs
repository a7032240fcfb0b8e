//! The per-turn placement policy.
//!
//! `decide` is a pure function of the board, the target, the piece in
//! hand, and the discard counter. Rules are tried in a fixed order and the
//! first one that applies produces the turn's only action:
//!
//! 1. board satisfies target: submit
//! 2. a blank interior cell whose target is exactly the piece: place there
//! 3. zero discards and a blank interior cell the target leaves blank: place there
//! 4. discards left: discard
//! 5. otherwise: restart
//!
//! Scans run row-major, so among equally good cells the lowest row wins,
//! then the lowest column. The engine cannot undo a placement, so any
//! state that reaches rule 5 is treated as unrecoverable.

use crate::board::{Cell, Comparison, Grid};

use super::action::{Action, Decision, Diagnostic};

/// Chooses the action for one turn.
///
/// `piece` is the piece in hand, `discards` the remaining discard budget
/// (`None` when it could not be read). Malformed or mismatched grids never
/// panic; they are reported as diagnostics and treated as unsolved.
pub fn decide(board: &Grid, target: &Grid, piece: Option<Cell>, discards: Option<u32>) -> Decision {
    let mut decision = Decision::new(Action::Restart);

    if discards.is_none() {
        decision.diagnostics.push(Diagnostic::UnknownDiscardCount);
    }

    match board.compare(target) {
        Comparison::Match => {
            decision.action = Action::SubmitSolution;
            return decision;
        }
        Comparison::ShapeMismatch(shape) => {
            decision.diagnostics.push(Diagnostic::ShapeMismatch(shape));
        }
        Comparison::Mismatch { .. } => {}
    }

    // A blank "piece" is a reader artifact, not something that can be placed.
    match piece.filter(|p| !p.is_blank()) {
        Some(piece) => {
            if let Some((row, col)) = exact_slot(board, target, piece) {
                decision.action = Action::PlaceAt { row, col, piece };
                return decision;
            }
            if discards == Some(0) {
                if let Some((row, col)) = dont_care_slot(board, target) {
                    decision.diagnostics.push(Diagnostic::ForcedPlacement);
                    decision.action = Action::PlaceAt { row, col, piece };
                    return decision;
                }
            }
        }
        None => decision.diagnostics.push(Diagnostic::NoPiece),
    }

    match discards {
        Some(n) if n > 0 => decision.action = Action::Discard,
        // Zero or unreadable: nothing left to try.
        _ => {
            let reason = if board.is_full() {
                Diagnostic::BoardFull
            } else {
                Diagnostic::Stuck
            };
            decision.diagnostics.push(reason);
            decision.action = Action::Restart;
        }
    }
    decision
}

/// First blank interior cell whose target symbol is exactly `piece`.
pub fn exact_slot(board: &Grid, target: &Grid, piece: Cell) -> Option<(usize, usize)> {
    board.interior().find(|&(r, c)| {
        board.get(r, c) == Some(Cell::Blank) && target.get(r, c) == Some(piece)
    })
}

/// First blank interior cell the target also leaves blank.
pub fn dont_care_slot(board: &Grid, target: &Grid) -> Option<(usize, usize)> {
    board.interior().find(|&(r, c)| {
        board.get(r, c) == Some(Cell::Blank) && target.get(r, c) == Some(Cell::Blank)
    })
}
