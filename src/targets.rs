//! Target layouts per level.
//!
//! Layouts are a data asset, not logic: a JSON object mapping level keys
//! to glyph rows. A plain key (`"6"`) is the high-score route; a key with
//! an `a` suffix (`"6a"`) is the avatar route for the same level. The
//! published table ships embedded in the binary and can be replaced by a
//! file at runtime.
//!
//! ```json
//! { "targets": { "1": ["OOOOO", "O   O", "─────", "O   O", "OOOOO"] } }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::board::{Grid, GridError, Route};

/// The built-in table, levels 1 through 50.
const BUILTIN_TARGETS: &str = include_str!("../data/targets.json");

/// Errors raised while loading or resolving target layouts.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse target table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid level key '{0}': expected a positive level number, optionally suffixed with 'a'")]
    InvalidKey(String),

    #[error("invalid layout for level key '{key}': {source}")]
    InvalidLayout {
        key: String,
        #[source]
        source: GridError,
    },

    #[error("no target layout registered for level {level}")]
    MissingTarget { level: u32 },
}

#[derive(Debug, Deserialize)]
struct TargetFile {
    targets: BTreeMap<String, Vec<String>>,
}

/// Immutable lookup from level number and route to a target layout.
#[derive(Debug, Clone, Default)]
pub struct TargetTable {
    high_score: HashMap<u32, Grid>,
    avatar: HashMap<u32, Grid>,
}

impl TargetTable {
    /// Parses the table embedded in the binary.
    pub fn builtin() -> Result<Self, TargetError> {
        Self::from_json(BUILTIN_TARGETS)
    }

    /// Reads and parses a table from disk.
    pub fn load(path: &Path) -> Result<Self, TargetError> {
        let data = fs::read_to_string(path).map_err(|source| TargetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// Parses a table from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TargetError> {
        let file: TargetFile = serde_json::from_str(json)?;
        let mut table = TargetTable::default();
        for (key, rows) in file.targets {
            let (level, route) = parse_key(&key)?;
            let grid = Grid::from_rows(&rows)
                .map_err(|source| TargetError::InvalidLayout { key: key.clone(), source })?;
            table.insert(level, route, grid);
        }
        Ok(table)
    }

    /// Registers a layout, replacing any previous one for the same key.
    pub fn insert(&mut self, level: u32, route: Route, grid: Grid) {
        match route {
            Route::Avatar => self.avatar.insert(level, grid),
            Route::HighScore => self.high_score.insert(level, grid),
        };
    }

    /// Returns the layout stored under exactly this level and route.
    pub fn get(&self, level: u32, route: Route) -> Option<&Grid> {
        match route {
            Route::Avatar => self.avatar.get(&level),
            Route::HighScore => self.high_score.get(&level),
        }
    }

    /// Returns the layout to pursue for `level`.
    ///
    /// The avatar route uses the avatar-specific layout when one exists and
    /// otherwise the high-score layout, which many levels share.
    pub fn resolve(&self, level: u32, route: Route) -> Result<&Grid, TargetError> {
        let preferred = match route {
            Route::Avatar => self.avatar.get(&level),
            Route::HighScore => None,
        };
        preferred
            .or_else(|| self.high_score.get(&level))
            .ok_or(TargetError::MissingTarget { level })
    }

    /// Every level number with at least one layout, ascending.
    pub fn levels(&self) -> Vec<u32> {
        let mut levels: Vec<u32> = self.high_score.keys().chain(self.avatar.keys()).copied().collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    /// Total number of stored layouts across both routes.
    pub fn len(&self) -> usize {
        self.high_score.len() + self.avatar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high_score.is_empty() && self.avatar.is_empty()
    }
}

/// Splits `"12"` / `"12a"` into a level number and route.
fn parse_key(key: &str) -> Result<(u32, Route), TargetError> {
    let (digits, route) = match key.strip_suffix('a') {
        Some(rest) => (rest, Route::Avatar),
        None => (key, Route::HighScore),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TargetError::InvalidKey(key.to_string()));
    }
    match digits.parse::<u32>() {
        Ok(level) if level > 0 => Ok((level, route)),
        _ => Err(TargetError::InvalidKey(key.to_string())),
    }
}
