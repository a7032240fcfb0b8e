//! One full turn: win check, target resolution, then the placement policy.
//!
//! `plan_turn` is where the collaborator data meets the pure rules. It also
//! owns reporting: every diagnostic a decision carries is logged here, so
//! callers only need to act on the returned plan.

use tracing::{debug, info, warn};

use crate::board::{Grid, LevelState, Route};
use crate::targets::TargetTable;

use super::action::{Action, Decision, Severity};
use super::rules::decide;

/// Everything observed at the start of a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observation {
    /// Whether the "proceed to next level" affordance is showing.
    pub proceed: bool,
    pub level: LevelState,
    pub board: Grid,
}

impl Observation {
    /// An observation of the win screen. Nothing else on it is meaningful.
    pub fn won() -> Self {
        Observation {
            proceed: true,
            ..Default::default()
        }
    }
}

/// What the caller should do this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPlan {
    /// Perform this decision's action.
    Act(Decision),
    /// No level is active; do nothing and poll again.
    Idle,
}

impl TurnPlan {
    pub fn action(&self) -> Option<Action> {
        match self {
            TurnPlan::Act(d) => Some(d.action),
            TurnPlan::Idle => None,
        }
    }
}

/// Conditions that stop the autoplayer instead of producing an action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no target layout registered for level {level}; stopping")]
    MissingTarget { level: u32 },
}

/// Plans a single turn.
///
/// The win screen short-circuits everything. Without an active level the
/// plan is `Idle`. A level with no registered layout is an error; the
/// caller must stop rather than guess.
pub fn plan_turn(obs: &Observation, table: &TargetTable, route: Route) -> Result<TurnPlan, TurnError> {
    if obs.proceed {
        info!(target: "pipefitter::policy", "win detected, proceeding to next level");
        return Ok(TurnPlan::Act(Decision::new(Action::Proceed)));
    }

    let Some(level) = obs.level.level else {
        debug!(target: "pipefitter::policy", "no active level, skipping turn");
        return Ok(TurnPlan::Idle);
    };

    let target = table
        .resolve(level, route)
        .map_err(|_| TurnError::MissingTarget { level })?;

    let pieces = &obs.level.pieces;
    debug!(
        target: "pipefitter::policy",
        level,
        %route,
        discards = ?obs.level.discards,
        queued = pieces.len(),
        open_slots = obs.board.open_slots(),
        piece = ?pieces.next().map(|p| p.glyph()),
        lookahead = ?pieces.lookahead().iter().map(|p| p.glyph()).collect::<String>(),
        "planning turn"
    );

    let decision = decide(&obs.board, target, pieces.next(), obs.level.discards);
    report(level, &decision);
    Ok(TurnPlan::Act(decision))
}

fn report(level: u32, decision: &Decision) {
    for d in &decision.diagnostics {
        match d.severity() {
            Severity::Warn => warn!(target: "pipefitter::policy", level, code = d.code(), "{}", d),
            Severity::Info => info!(target: "pipefitter::policy", level, code = d.code(), "{}", d),
        }
    }
    info!(target: "pipefitter::policy", level, action = %decision.action, "decided");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, PieceQueue};
    use crate::policy::Diagnostic;

    fn table() -> TargetTable {
        TargetTable::from_json(
            r#"{"targets": {
                "1": ["OOO", "O┼O", "OOO"],
                "2": ["OOOO", "O||O", "OOOO"],
                "2a": ["OOOO", "O| O", "OOOO"]
            }}"#,
        )
        .unwrap()
    }

    fn obs(level: Option<u32>, discards: Option<u32>, pieces: &[Cell], board: &[&str]) -> Observation {
        Observation {
            proceed: false,
            level: LevelState {
                level,
                discards,
                pieces: PieceQueue::new(pieces.to_vec()),
            },
            board: Grid::from_rows(board).unwrap(),
        }
    }

    #[test]
    fn win_screen_proceeds_without_level_data() {
        let plan = plan_turn(&Observation::won(), &table(), Route::Avatar).unwrap();
        assert_eq!(plan.action(), Some(Action::Proceed));
    }

    #[test]
    fn win_screen_beats_missing_target() {
        let mut o = obs(Some(99), Some(0), &[], &[]);
        o.proceed = true;
        let plan = plan_turn(&o, &table(), Route::Avatar).unwrap();
        assert_eq!(plan.action(), Some(Action::Proceed));
    }

    #[test]
    fn no_level_is_idle() {
        let o = obs(None, Some(3), &[Cell::Cross], &["OOO", "O O", "OOO"]);
        assert_eq!(plan_turn(&o, &table(), Route::Avatar), Ok(TurnPlan::Idle));
    }

    #[test]
    fn missing_target_stops() {
        let o = obs(Some(9), Some(3), &[Cell::Cross], &["OOO", "O O", "OOO"]);
        assert_eq!(
            plan_turn(&o, &table(), Route::HighScore),
            Err(TurnError::MissingTarget { level: 9 })
        );
    }

    #[test]
    fn end_to_end_placement() {
        let o = obs(Some(1), Some(2), &[Cell::Cross], &["OOO", "O O", "OOO"]);
        let plan = plan_turn(&o, &table(), Route::Avatar).unwrap();
        assert_eq!(
            plan.action(),
            Some(Action::PlaceAt {
                row: 1,
                col: 1,
                piece: Cell::Cross
            })
        );
    }

    #[test]
    fn route_selects_layout() {
        // Avatar layout leaves (1,2) open, so the board already satisfies it.
        let o = obs(Some(2), Some(1), &[Cell::Cross], &["OOOO", "O| O", "OOOO"]);
        let avatar = plan_turn(&o, &table(), Route::Avatar).unwrap();
        assert_eq!(avatar.action(), Some(Action::SubmitSolution));

        let high = plan_turn(&o, &table(), Route::HighScore).unwrap();
        assert_eq!(high.action(), Some(Action::Discard));
    }

    #[test]
    fn unknown_discards_are_surfaced() {
        let o = obs(Some(2), None, &[Cell::Cross], &["OOOO", "O  O", "OOOO"]);
        match plan_turn(&o, &table(), Route::HighScore).unwrap() {
            TurnPlan::Act(d) => {
                assert_eq!(d.action, Action::Restart);
                assert!(d.has(Diagnostic::UnknownDiscardCount));
            }
            TurnPlan::Idle => panic!("expected an action"),
        }
    }
}
