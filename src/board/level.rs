//! Per-turn level state: which level is active, which route is being
//! pursued, how many discards remain, and the pieces in hand.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::cell::Cell;

/// How many pieces the queue shows: the one in hand plus two lookahead.
pub const MAX_PIECES: usize = 3;

/// Which of a level's two target layouts is being pursued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Layout aimed at the avatar award. Falls back to the high-score
    /// layout for levels that have no avatar-specific one.
    #[default]
    Avatar,
    /// Default layout aimed at the highest score.
    #[serde(alias = "high-score", alias = "high_score")]
    HighScore,
}

impl Route {
    /// Returns the lowercase option name.
    pub const fn name(self) -> &'static str {
        match self {
            Route::Avatar => "avatar",
            Route::HighScore => "highscore",
        }
    }

    /// Parses a route from its option name, case-insensitively.
    pub fn from_name(s: &str) -> Option<Route> {
        match s.to_ascii_lowercase().as_str() {
            "avatar" | "a" => Some(Route::Avatar),
            "highscore" | "high-score" | "high_score" | "score" => Some(Route::HighScore),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_name(s).ok_or_else(|| format!("unknown route '{}'", s))
    }
}

/// The upcoming pieces, in order. Only the first is ever placed; the rest
/// are read for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceQueue {
    pieces: Vec<Cell>,
}

impl PieceQueue {
    /// Creates a queue, keeping at most `MAX_PIECES` entries.
    pub fn new(mut pieces: Vec<Cell>) -> Self {
        pieces.truncate(MAX_PIECES);
        PieceQueue { pieces }
    }

    /// The piece in hand, if any.
    pub fn next(&self) -> Option<Cell> {
        self.pieces.first().copied()
    }

    /// Pieces after the one in hand.
    pub fn lookahead(&self) -> &[Cell] {
        self.pieces.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }
}

/// Level fields read fresh each turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelState {
    /// Active level number; `None` when no level is showing.
    pub level: Option<u32>,
    /// Discards remaining; `None` when the counter could not be read.
    pub discards: Option<u32>,
    pub pieces: PieceQueue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_names_roundtrip() {
        for route in [Route::Avatar, Route::HighScore] {
            assert_eq!(Route::from_name(route.name()), Some(route));
            assert_eq!(route.to_string().parse::<Route>(), Ok(route));
        }
        assert_eq!(Route::from_name("HIGH-SCORE"), Some(Route::HighScore));
        assert_eq!(Route::from_name("speedrun"), None);
        assert!("speedrun".parse::<Route>().is_err());
    }

    #[test]
    fn default_route_is_avatar() {
        assert_eq!(Route::default(), Route::Avatar);
    }

    #[test]
    fn route_deserializes_from_lowercase() {
        let r: Route = serde_json::from_str("\"highscore\"").unwrap();
        assert_eq!(r, Route::HighScore);
        let r: Route = serde_json::from_str("\"high-score\"").unwrap();
        assert_eq!(r, Route::HighScore);
        let r: Route = serde_json::from_str("\"avatar\"").unwrap();
        assert_eq!(r, Route::Avatar);
    }

    #[test]
    fn queue_keeps_three_pieces() {
        let q = PieceQueue::new(vec![Cell::Cross, Cell::Vertical, Cell::Horizontal, Cell::TeeEast]);
        assert_eq!(q.len(), 3);
        assert_eq!(q.next(), Some(Cell::Cross));
        assert_eq!(q.lookahead(), &[Cell::Vertical, Cell::Horizontal]);
    }

    #[test]
    fn empty_queue_has_no_piece() {
        let q = PieceQueue::default();
        assert!(q.is_empty());
        assert_eq!(q.next(), None);
        assert!(q.lookahead().is_empty());
    }
}
