//! Named seed patterns

use super::Board;
use crate::error::Result;

/// A small pattern given as live cell offsets from its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const GLIDER: Pattern = Pattern {
    name: "glider",
    description: "Moves one cell diagonally every 4 generations",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    description: "Oscillator (period 2)",
    cells: &[(0, 1), (1, 1), (2, 1)],
};

pub const BLOCK: Pattern = Pattern {
    name: "block",
    description: "Still life",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const ALL: [Pattern; 3] = [GLIDER, BLINKER, BLOCK];

/// Look a pattern up by name, ignoring case.
pub fn by_name(name: &str) -> Option<Pattern> {
    ALL.into_iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// Stamp the pattern onto `board` with its corner at `(x, y)`. Cells past
    /// an edge wrap to the opposite side.
    pub fn place_on(&self, board: &mut Board, x: usize, y: usize) -> Result<()> {
        let size = board.size();
        for &(dx, dy) in self.cells {
            board.set_cell((x + dx) % size, (y + dy) % size, true)?;
        }
        Ok(())
    }
}
