//! Engine state management.
//!
//! Collects what the reader reports during a turn (win screen, level,
//! discards, pieces, board), and on `go` plans the turn and writes the
//! chosen action. Observations are dropped after every `go`, so nothing
//! carries over from one turn to the next.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::board::{Grid, PieceQueue, Route};
use crate::policy::{plan_turn, Observation, TurnError, TurnPlan};
use crate::targets::{TargetError, TargetTable};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub observation: Observation,
    pub route: Route,
    pub table: TargetTable,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates an engine over the given target table.
    pub fn new(table: TargetTable, route: Route) -> Self {
        Engine {
            observation: Observation::default(),
            route,
            table,
            options: HashMap::new(),
        }
    }

    /// Creates an engine over the built-in table with the default route.
    pub fn with_builtin_targets() -> Result<Self, TargetError> {
        Ok(Engine::new(TargetTable::builtin()?, Route::default()))
    }

    /// Forgets everything observed so far.
    pub fn new_game(&mut self) {
        self.observation = Observation::default();
    }

    pub fn set_proceed(&mut self) {
        self.observation.proceed = true;
    }

    pub fn set_level(&mut self, level: Option<u32>) {
        self.observation.level.level = level;
    }

    pub fn set_discards(&mut self, discards: Option<u32>) {
        self.observation.level.discards = discards;
    }

    pub fn set_pieces(&mut self, pieces: PieceQueue) {
        self.observation.level.pieces = pieces;
    }

    pub fn set_board(&mut self, board: Grid) {
        self.observation.board = board;
    }

    /// Sets an engine option. `Route` and `Targets` take effect
    /// immediately and are only recorded when applied; anything else is
    /// stored as-is.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let value = value.unwrap_or_default();
        let applied = match name.as_str() {
            "Route" => match Route::from_name(&value) {
                Some(route) => {
                    info!(target: "pipefitter::protocol", %route, "route set");
                    self.route = route;
                    true
                }
                None => {
                    warn!(target: "pipefitter::protocol", "unknown route: '{}'", value);
                    false
                }
            },
            "Targets" => match TargetTable::load(Path::new(&value)) {
                Ok(table) => {
                    info!(target: "pipefitter::protocol", layouts = table.len(), path = %value, "targets loaded");
                    self.table = table;
                    true
                }
                Err(e) => {
                    warn!(target: "pipefitter::protocol", "{}", e);
                    false
                }
            },
            _ => true,
        };
        if applied {
            self.options.insert(name, value);
        }
    }

    /// Handles the PPI handshake: writes id, options, protocol_version, and ppiok.
    pub fn handle_ppi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name pipefitter")?;
        writeln!(out, "id author pipefitter")?;
        writeln!(
            out,
            "option name Route type combo default {} var avatar var highscore",
            self.route
        )?;
        writeln!(out, "option name Targets type string default <builtin>")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "ppiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `go` command: plans the turn from what was observed,
    /// writes any diagnostics as `info` lines followed by the action, then
    /// clears the observation.
    ///
    /// A level without a registered layout produces a `halt` line instead
    /// of an action; the reader is expected to stop.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let obs = std::mem::take(&mut self.observation);

        match plan_turn(&obs, &self.table, self.route) {
            Ok(TurnPlan::Act(decision)) => {
                for d in &decision.diagnostics {
                    writeln!(out, "info {} {}", d.code(), d)?;
                }
                writeln!(out, "bestaction {}", decision.action)?;
            }
            Ok(TurnPlan::Idle) => {
                writeln!(out, "info no-level no active level")?;
                writeln!(out, "bestaction none")?;
            }
            Err(TurnError::MissingTarget { level }) => {
                writeln!(out, "halt missing-target {}", level)?;
            }
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::protocol::parse_board;

    fn engine() -> Engine {
        Engine::with_builtin_targets().unwrap()
    }

    fn go(engine: &mut Engine) -> String {
        let mut output = Vec::new();
        engine.handle_go(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn small_engine() -> Engine {
        let table = TargetTable::from_json(r#"{"targets": {"1": ["OOO", "O┼O", "OOO"]}}"#).unwrap();
        Engine::new(table, Route::Avatar)
    }

    #[test]
    fn new_engine_has_no_observation() {
        let engine = engine();
        assert_eq!(engine.observation, Observation::default());
        assert_eq!(engine.route, Route::Avatar);
        assert!(engine.options.is_empty());
    }

    #[test]
    fn new_game_resets_observation() {
        let mut engine = engine();
        engine.set_level(Some(3));
        engine.set_proceed();
        engine.new_game();
        assert_eq!(engine.observation, Observation::default());
    }

    #[test]
    fn set_option_route() {
        let mut engine = engine();
        engine.set_option("Route".to_string(), Some("highscore".to_string()));
        assert_eq!(engine.route, Route::HighScore);
        engine.set_option("Route".to_string(), Some("sideways".to_string()));
        assert_eq!(engine.route, Route::HighScore);
        assert_eq!(engine.options.get("Route"), Some(&"highscore".to_string()));
    }

    #[test]
    fn rejected_option_is_not_recorded() {
        let mut engine = engine();
        engine.set_option("Route".to_string(), Some("sideways".to_string()));
        assert_eq!(engine.route, Route::Avatar);
        assert!(engine.options.get("Route").is_none());
    }

    #[test]
    fn set_option_bad_targets_keeps_table() {
        let mut engine = engine();
        engine.set_option("Targets".to_string(), Some("/nonexistent.json".to_string()));
        assert_eq!(engine.table.levels().len(), 50);
        assert!(!engine.options.contains_key("Targets"));
    }

    #[test]
    fn go_places_piece() {
        let mut engine = small_engine();
        engine.set_level(Some(1));
        engine.set_discards(Some(2));
        engine.set_pieces(PieceQueue::new(vec![Cell::Cross]));
        engine.set_board(parse_board("OOO/O.O/OOO").unwrap());
        assert_eq!(go(&mut engine).trim(), "bestaction place 1 1 ┼");
    }

    #[test]
    fn go_clears_observation() {
        let mut engine = small_engine();
        engine.set_level(Some(1));
        engine.set_discards(Some(2));
        go(&mut engine);
        assert_eq!(engine.observation, Observation::default());
        let out = go(&mut engine);
        assert!(out.contains("bestaction none"), "{}", out);
    }

    #[test]
    fn go_on_win_screen_proceeds() {
        let mut engine = small_engine();
        engine.set_proceed();
        assert_eq!(go(&mut engine).trim(), "bestaction proceed");
    }

    #[test]
    fn go_without_level_is_none() {
        let mut engine = small_engine();
        let out = go(&mut engine);
        assert_eq!(out.lines().last(), Some("bestaction none"));
    }

    #[test]
    fn go_missing_target_halts() {
        let mut engine = small_engine();
        engine.set_level(Some(77));
        assert_eq!(go(&mut engine).trim(), "halt missing-target 77");
    }

    #[test]
    fn go_reports_unknown_discards_before_action() {
        let mut engine = small_engine();
        engine.set_level(Some(1));
        engine.set_pieces(PieceQueue::new(vec![Cell::Vertical]));
        engine.set_board(parse_board("OOO/O.O/OOO").unwrap());
        let out = go(&mut engine);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("info unknown-discards"), "{}", out);
        assert_eq!(lines.last(), Some(&"bestaction restart"));
    }

    #[test]
    fn handle_ppi_outputs_handshake() {
        let engine = engine();
        let mut output = Vec::new();
        engine.handle_ppi(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("id name pipefitter"));
        assert!(output_str.contains("option name Route type combo default avatar"));
        assert!(output_str.contains("protocol_version 1"));
        assert!(output_str.ends_with("ppiok\n"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = engine();
        let mut output = Vec::new();
        engine.handle_isready(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().trim(), "readyok");
    }
}
