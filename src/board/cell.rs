//! Cell symbols.
//!
//! Every board cell holds exactly one symbol: a blank slot, a wall, one of
//! the fifteen pipe pieces, or `Unknown` when the renderer showed something
//! the reader could not classify.

/// Every cell symbol in glyph order, `Blank` first and `Unknown` last.
pub const ALL_CELLS: [Cell; 18] = [
    Cell::Blank,
    Cell::Wall,
    Cell::Vertical,
    Cell::Horizontal,
    Cell::TeeEast,
    Cell::TeeWest,
    Cell::TeeNorth,
    Cell::TeeSouth,
    Cell::Cross,
    Cell::CapSouth,
    Cell::CapNorth,
    Cell::CapWest,
    Cell::CapEast,
    Cell::ElbowNorthEast,
    Cell::ElbowNorthWest,
    Cell::ElbowSouthEast,
    Cell::ElbowSouthWest,
    Cell::Unknown,
];

/// A single board cell.
///
/// Pipe variants are named after the directions their open ends point to.
/// Tees are named after the single side branch, caps after the direction
/// of their closed end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Blank,
    Wall,
    /// `|`
    Vertical,
    /// `─`
    Horizontal,
    /// `├`
    TeeEast,
    /// `┤`
    TeeWest,
    /// `┴`
    TeeNorth,
    /// `┬`
    TeeSouth,
    /// `┼`
    Cross,
    /// `∪`
    CapSouth,
    /// `∩`
    CapNorth,
    /// `c`
    CapWest,
    /// `ↄ`
    CapEast,
    /// `└`
    ElbowNorthEast,
    /// `┘`
    ElbowNorthWest,
    /// `┌`
    ElbowSouthEast,
    /// `┐`
    ElbowSouthWest,
    Unknown,
}

impl Cell {
    /// Returns the glyph used by the level table.
    pub const fn glyph(self) -> char {
        match self {
            Cell::Blank => ' ',
            Cell::Wall => 'O',
            Cell::Vertical => '|',
            Cell::Horizontal => '─',
            Cell::TeeEast => '├',
            Cell::TeeWest => '┤',
            Cell::TeeNorth => '┴',
            Cell::TeeSouth => '┬',
            Cell::Cross => '┼',
            Cell::CapSouth => '∪',
            Cell::CapNorth => '∩',
            Cell::CapWest => 'c',
            Cell::CapEast => 'ↄ',
            Cell::ElbowNorthEast => '└',
            Cell::ElbowNorthWest => '┘',
            Cell::ElbowSouthEast => '┌',
            Cell::ElbowSouthWest => '┐',
            Cell::Unknown => '?',
        }
    }

    /// Returns the glyph used on the wire, where blanks are written as `.`
    /// so that a row survives whitespace splitting.
    pub const fn notation_char(self) -> char {
        match self {
            Cell::Blank => '.',
            other => other.glyph(),
        }
    }

    /// Parses a cell from its glyph. Both `' '` and `'.'` read as blank.
    pub fn from_glyph(c: char) -> Option<Cell> {
        match c {
            ' ' | '.' => Some(Cell::Blank),
            'O' => Some(Cell::Wall),
            '|' => Some(Cell::Vertical),
            '─' => Some(Cell::Horizontal),
            '├' => Some(Cell::TeeEast),
            '┤' => Some(Cell::TeeWest),
            '┴' => Some(Cell::TeeNorth),
            '┬' => Some(Cell::TeeSouth),
            '┼' => Some(Cell::Cross),
            '∪' => Some(Cell::CapSouth),
            '∩' => Some(Cell::CapNorth),
            'c' => Some(Cell::CapWest),
            'ↄ' => Some(Cell::CapEast),
            '└' => Some(Cell::ElbowNorthEast),
            '┘' => Some(Cell::ElbowNorthWest),
            '┌' => Some(Cell::ElbowSouthEast),
            '┐' => Some(Cell::ElbowSouthWest),
            '?' => Some(Cell::Unknown),
            _ => None,
        }
    }

    /// Maps a rendered sprite name (the image file stem) to a cell.
    ///
    /// Sources and drains render as straight pipes, border corners and
    /// sides as walls. Unrecognized names yield `Unknown`.
    pub fn from_sprite(name: &str) -> Cell {
        match name {
            "pc0" => Cell::Blank,
            "pc1" => Cell::Wall,
            "pc2" | "source-n" | "source-s" | "drain-n" | "drain-s" => Cell::Vertical,
            "pc3" | "source-e" | "source-w" | "drain-e" | "drain-w" => Cell::Horizontal,
            "pc4" => Cell::TeeEast,
            "pc5" => Cell::TeeWest,
            "pc6" => Cell::TeeNorth,
            "pc7" => Cell::TeeSouth,
            "pc8" => Cell::Cross,
            "pc9" => Cell::CapSouth,
            "pca" => Cell::CapNorth,
            "pcb" => Cell::CapWest,
            "pcc" => Cell::CapEast,
            "pcd" => Cell::ElbowNorthEast,
            "pce" => Cell::ElbowNorthWest,
            "pcf" => Cell::ElbowSouthEast,
            "pcg" => Cell::ElbowSouthWest,
            "cor-nw" | "cor-ne" | "cor-sw" | "cor-se" => Cell::Wall,
            "side-n" | "side-e" | "side-s" | "side-w" => Cell::Wall,
            _ => Cell::Unknown,
        }
    }

    /// Returns true for the empty slot a piece can be placed into.
    pub const fn is_blank(self) -> bool {
        matches!(self, Cell::Blank)
    }

    /// Returns true for the fifteen placeable pipe pieces.
    pub const fn is_pipe(self) -> bool {
        !matches!(self, Cell::Blank | Cell::Wall | Cell::Unknown)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
