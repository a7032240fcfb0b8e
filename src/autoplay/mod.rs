//! Collaborator interfaces and the turn scheduler.
//!
//! The engine never touches a live game. Whatever renders the board sits
//! behind `BoardReader` and `LevelStateReader`; whatever clicks sits behind
//! `ActionExecutor`. The `Scheduler` drives turns through these seams.

pub mod replay;
pub mod scheduler;

pub use replay::{Frame, RecordingExecutor, ReplayError, ScriptedView};
pub use scheduler::{Scheduler, StopHandle, StopReason, TurnOutcome};

use crate::board::{Grid, LevelState};
use crate::policy::{Action, Observation};

/// Produces the current board. May return an empty or ragged grid when the
/// view is unavailable; the engine degrades rather than failing.
pub trait BoardReader {
    fn read_board(&mut self) -> Grid;
}

/// Produces the per-turn level fields.
pub trait LevelStateReader {
    /// Whether the win screen's "proceed" affordance is showing. Checked
    /// first every turn, before any other read.
    fn proceed_available(&mut self) -> bool;

    fn read_level(&mut self) -> LevelState;
}

/// Performs an action in the game. Fire-and-forget: the engine does not
/// observe success, it simply re-reads state next turn.
pub trait ActionExecutor {
    fn execute(&mut self, action: Action);
}

/// Reads one observation from a view. On the win screen nothing else is
/// read, since board and level data are meaningless there.
pub fn observe<V>(view: &mut V) -> Observation
where
    V: BoardReader + LevelStateReader + ?Sized,
{
    if view.proceed_available() {
        return Observation::won();
    }
    let level = view.read_level();
    let board = view.read_board();
    Observation {
        proceed: false,
        level,
        board,
    }
}
