//! Recorded sessions.
//!
//! A session is a JSON-lines file, one `Frame` per turn, as captured from a
//! live board reader. `ScriptedView` plays the frames back through the
//! reader traits so that whole sessions can be re-decided offline.
//!
//! ```json
//! {"level": 1, "discards": 2, "pieces": "┼|─", "board": ["OOO", "O O", "OOO"]}
//! {"proceed": true}
//! ```

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::board::{Cell, Grid, GridError, LevelState, PieceQueue};
use crate::policy::{Action, Observation};

use super::{ActionExecutor, BoardReader, LevelStateReader};

/// Errors raised while loading a recorded session.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Board {
        line: usize,
        #[source]
        source: GridError,
    },

    #[error("line {line}: unknown piece glyph '{glyph}'")]
    Piece { line: usize, glyph: char },
}

/// One recorded turn.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub proceed: bool,
    pub level: Option<u32>,
    /// `null` or absent when the counter could not be read.
    pub discards: Option<u32>,
    /// Glyphs of the piece in hand followed by the lookahead pieces.
    pub pieces: String,
    /// Board rows in level-table glyphs (`' '` or `'.'` for blank).
    pub board: Vec<String>,
}

impl Frame {
    /// Converts the frame; `line` is only used for error messages.
    pub fn to_observation(&self, line: usize) -> Result<Observation, ReplayError> {
        if self.proceed {
            return Ok(Observation::won());
        }
        let pieces = self
            .pieces
            .chars()
            .map(|glyph| Cell::from_glyph(glyph).ok_or(ReplayError::Piece { line, glyph }))
            .collect::<Result<Vec<_>, _>>()?;
        let board =
            Grid::from_rows(&self.board).map_err(|source| ReplayError::Board { line, source })?;
        Ok(Observation {
            proceed: false,
            level: LevelState {
                level: self.level,
                discards: self.discards,
                pieces: PieceQueue::new(pieces),
            },
            board,
        })
    }
}

/// Serves recorded observations, one per turn.
///
/// A turn starts with `proceed_available`, which advances to the next
/// frame. Once the frames run out the view shows no active level.
#[derive(Debug, Clone, Default)]
pub struct ScriptedView {
    frames: VecDeque<Observation>,
    current: Observation,
}

impl ScriptedView {
    pub fn new(frames: Vec<Observation>) -> Self {
        ScriptedView {
            frames: frames.into(),
            current: Observation::default(),
        }
    }

    /// Reads a JSON-lines session file.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let data = fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_jsonl(&data)
    }

    /// Parses a JSON-lines session. Blank lines are skipped.
    pub fn from_jsonl(data: &str) -> Result<Self, ReplayError> {
        let mut frames = Vec::new();
        for (i, raw) in data.lines().enumerate() {
            let line = i + 1;
            if raw.trim().is_empty() {
                continue;
            }
            let frame: Frame =
                serde_json::from_str(raw).map_err(|source| ReplayError::Json { line, source })?;
            frames.push(frame.to_observation(line)?);
        }
        Ok(Self::new(frames))
    }

    /// Frames not yet served.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LevelStateReader for ScriptedView {
    fn proceed_available(&mut self) -> bool {
        self.current = self.frames.pop_front().unwrap_or_default();
        self.current.proceed
    }

    fn read_level(&mut self) -> LevelState {
        self.current.level.clone()
    }
}

impl BoardReader for ScriptedView {
    fn read_board(&mut self) -> Grid {
        self.current.board.clone()
    }
}

/// Executor that only remembers what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    pub actions: Vec<Action>,
}

impl ActionExecutor for RecordingExecutor {
    fn execute(&mut self, action: Action) {
        self.actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoplay::observe;

    const SESSION: &str = r#"{"level": 1, "discards": 2, "pieces": "┼|─", "board": ["OOO", "O O", "OOO"]}

{"proceed": true}
{"level": 2, "discards": null, "pieces": "", "board": []}
"#;

    #[test]
    fn frames_play_back_in_order() {
        let mut view = ScriptedView::from_jsonl(SESSION).unwrap();
        assert_eq!(view.remaining(), 3);

        let first = observe(&mut view);
        assert!(!first.proceed);
        assert_eq!(first.level.level, Some(1));
        assert_eq!(first.level.pieces.next(), Some(Cell::Cross));
        assert_eq!(first.level.pieces.lookahead(), &[Cell::Vertical, Cell::Horizontal]);
        assert_eq!(first.board.get(1, 1), Some(Cell::Blank));

        assert!(observe(&mut view).proceed);

        let third = observe(&mut view);
        assert_eq!(third.level.discards, None);
        assert!(third.level.pieces.is_empty());
        assert!(third.board.is_empty());

        let after = observe(&mut view);
        assert_eq!(after.level.level, None);
        assert_eq!(view.remaining(), 0);
    }

    #[test]
    fn bad_json_reports_line() {
        let err = ScriptedView::from_jsonl("{\"level\": 1}\nnot json").unwrap_err();
        assert!(matches!(err, ReplayError::Json { line: 2, .. }));
    }

    #[test]
    fn bad_piece_reports_line() {
        let err = ScriptedView::from_jsonl(r#"{"level": 1, "pieces": "x"}"#).unwrap_err();
        assert!(matches!(err, ReplayError::Piece { line: 1, glyph: 'x' }));
    }

    #[test]
    fn bad_board_reports_line() {
        let err = ScriptedView::from_jsonl(r#"{"level": 1, "board": ["OZO"]}"#).unwrap_err();
        assert!(matches!(err, ReplayError::Board { line: 1, .. }));
    }

    #[test]
    fn recording_executor_keeps_order() {
        let mut exec = RecordingExecutor::default();
        exec.execute(Action::Discard);
        exec.execute(Action::Restart);
        assert_eq!(exec.actions, vec![Action::Discard, Action::Restart]);
    }
}
