//! The toroidal board and its generation step

use super::rules::{NeighborCount, RuleSet};
use super::Grid;
use crate::error::{LifeError, Result};
use itertools::iproduct;
use rayon::prelude::*;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Rules handle shared between a board and whoever edits the rules.
///
/// `Rc<RefCell<_>>` pins the pair to one thread; a rule change made through
/// the handle is picked up at the start of the next generation.
pub type SharedRules = Rc<RefCell<RuleSet>>;

/// Wrap a rule set in a fresh shared handle.
pub fn shared_rules(rules: RuleSet) -> SharedRules {
    Rc::new(RefCell::new(rules))
}

const OFFSETS: [isize; 3] = [-1, 0, 1];

/// An N×N board whose edges wrap around.
pub struct Board {
    size: usize,
    grid: Grid,
    rules: SharedRules,
    generation: u64,
}

impl Board {
    /// Create an all-dead board bound to `rules`
    pub fn new(size: usize, rules: SharedRules) -> Result<Self> {
        if size == 0 {
            return Err(LifeError::InvalidSize(size));
        }
        Ok(Self {
            size,
            grid: Grid::new(size, size),
            rules,
            generation: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Generations advanced since creation, the last clear or the last restore.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Copy of the rules currently in force.
    pub fn rules(&self) -> RuleSet {
        *self.rules.borrow()
    }

    /// The handle `advance_generation` reads; writes through it take effect
    /// from the next generation.
    pub fn rules_handle(&self) -> &SharedRules {
        &self.rules
    }

    /// Point the board at a different rules handle.
    pub fn bind_rules(&mut self, rules: SharedRules) {
        self.rules = rules;
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.size || y >= self.size {
            return Err(LifeError::OutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        Ok(self.grid.index(x, y))
    }

    pub fn is_alive(&self, x: usize, y: usize) -> Result<bool> {
        let idx = self.check_bounds(x, y)?;
        Ok(self.grid.cells()[idx])
    }

    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let idx = self.check_bounds(x, y)?;
        self.grid.cells_mut()[idx] = alive;
        Ok(())
    }

    /// Flip a cell between dead and alive
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<()> {
        let idx = self.check_bounds(x, y)?;
        let cell = &mut self.grid.cells_mut()[idx];
        *cell = !*cell;
        Ok(())
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.grid.cells_mut().fill(false);
        self.generation = 0;
    }

    /// Live cells among the eight wrapped neighbors of `(x, y)`.
    pub fn count_neighbors(&self, x: usize, y: usize) -> Result<NeighborCount> {
        self.check_bounds(x, y)?;
        Ok(count_wrapped(&self.grid, x, y))
    }

    /// Advance the whole board one generation.
    ///
    /// Every cell reads the frozen current grid; results go into a separate
    /// buffer that replaces the current grid once all rows are done.
    pub fn advance_generation(&mut self) {
        let rules = self.rules();
        let size = self.size;
        let current = &self.grid;

        let mut next = Grid::new(size, size);
        next.cells_mut()
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let alive = current.cells()[current.index(x, y)];
                    *cell = rules.next_state(alive, count_wrapped(current, x, y));
                }
            });

        self.grid = next;
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            living = self.grid.living_count(),
            "advanced generation"
        );
    }

    /// Advance `generations` times
    pub fn advance(&mut self, generations: usize) {
        for _ in 0..generations {
            self.advance_generation();
        }
    }

    /// Owned copy of the current grid.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    /// Replace the grid wholesale. A grid of the wrong shape is rejected and
    /// the board keeps its current state.
    pub fn restore(&mut self, grid: Grid) -> Result<()> {
        if grid.width() != self.size || grid.height() != self.size {
            return Err(LifeError::DimensionMismatch {
                width: grid.width(),
                height: grid.height(),
                size: self.size,
            });
        }
        self.grid = grid;
        self.generation = 0;
        Ok(())
    }

    pub fn living_count(&self) -> usize {
        self.grid.living_count()
    }

    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.grid.living_cells()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("generation", &self.generation)
            .field("rules", &self.rules())
            .field("living", &self.living_count())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

/// Resolve `coord + delta` on a ring of `size` cells.
#[inline]
fn wrap(coord: usize, delta: isize, size: usize) -> usize {
    (coord as isize + delta).rem_euclid(size as isize) as usize
}

fn count_wrapped(grid: &Grid, x: usize, y: usize) -> NeighborCount {
    let size = grid.width();
    let live = iproduct!(OFFSETS, OFFSETS)
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
        .filter(|&(dx, dy)| grid.cells()[grid.index(wrap(x, dx, size), wrap(y, dy, size))])
        .count();
    NeighborCount::from_sum(live as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conway_board(size: usize) -> Board {
        Board::new(size, shared_rules(RuleSet::conway())).unwrap()
    }

    fn board_from(rows: Vec<Vec<u8>>) -> Board {
        let mut board = conway_board(rows.len());
        board.restore(Grid::from_matrix(&rows).unwrap()).unwrap();
        board
    }

    #[test]
    fn test_board_creation() {
        let board = conway_board(4);
        assert_eq!(board.size(), 4);
        assert_eq!(board.living_count(), 0);
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        let result = Board::new(0, shared_rules(RuleSet::conway()));
        assert!(matches!(result, Err(LifeError::InvalidSize(0))));
    }

    #[test]
    fn test_toggle_and_bounds() {
        let mut board = conway_board(3);
        board.toggle_cell(2, 1).unwrap();
        assert!(board.is_alive(2, 1).unwrap());
        board.toggle_cell(2, 1).unwrap();
        assert!(!board.is_alive(2, 1).unwrap());

        assert!(matches!(
            board.toggle_cell(3, 0),
            Err(LifeError::OutOfBounds { x: 3, y: 0, size: 3 })
        ));
        assert!(board.is_alive(0, 7).is_err());
        assert!(board.set_cell(5, 5, true).is_err());
        assert!(board.count_neighbors(0, 3).is_err());
    }

    #[test]
    fn test_corner_wraparound() {
        let mut board = conway_board(5);
        board.set_cell(4, 4, true).unwrap();
        board.set_cell(4, 0, true).unwrap();
        board.set_cell(0, 4, true).unwrap();

        assert_eq!(board.count_neighbors(0, 0).unwrap().get(), 3);
        // (4, 4) sees (4, 0) and (0, 4) across the edges
        assert_eq!(board.count_neighbors(4, 4).unwrap().get(), 2);
    }

    #[test]
    fn test_tiny_boards_count_wrapped_duplicates() {
        let mut board = conway_board(1);
        board.set_cell(0, 0, true).unwrap();
        assert_eq!(board.count_neighbors(0, 0).unwrap().get(), 8);

        let mut board = conway_board(2);
        board.set_cell(1, 1, true).unwrap();
        assert_eq!(board.count_neighbors(0, 0).unwrap().get(), 4);
    }

    #[test]
    fn test_synchronous_update() {
        let mut board = board_from(vec![vec![0, 1, 0], vec![0, 1, 0], vec![0, 0, 0]]);
        // On a 3x3 torus every other cell is a neighbor: the two live cells
        // each see one neighbor and die, the dead ones see two and stay dead.
        assert_eq!(board.count_neighbors(1, 0).unwrap().get(), 1);
        assert_eq!(board.count_neighbors(0, 2).unwrap().get(), 2);

        board.advance_generation();
        assert_eq!(board.snapshot().to_matrix(), vec![vec![0; 3]; 3]);
        assert_eq!(board.generation(), 1);
    }

    #[test]
    fn test_blinker_oscillates() {
        let vertical = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let horizontal = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let mut board = board_from(vertical.clone());

        board.advance_generation();
        assert_eq!(board.snapshot().to_matrix(), horizontal);
        board.advance_generation();
        assert_eq!(board.snapshot().to_matrix(), vertical);
    }

    #[test]
    fn test_glider_translation() {
        let mut board = conway_board(10);
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        for (x, y) in glider {
            board.set_cell(x, y, true).unwrap();
        }

        board.advance(4);

        let mut expected: Vec<(usize, usize)> =
            glider.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        expected.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(board.living_cells(), expected);
    }

    #[test]
    fn test_glider_crosses_edge() {
        let mut board = conway_board(8);
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        for (x, y) in glider {
            board.set_cell(x, y, true).unwrap();
        }

        // 32 generations move the glider (8, 8), one full lap
        board.advance(32);

        let mut expected: Vec<(usize, usize)> = glider.to_vec();
        expected.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(board.living_cells(), expected);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut board = board_from(vec![vec![1, 1], vec![0, 1]]);
        board.clear();
        let once = board.snapshot();
        board.clear();
        assert_eq!(board.snapshot(), once);
        assert!(once.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut board = board_from(vec![vec![1, 0, 0], vec![0, 1, 1], vec![1, 0, 0]]);
        let before = board.snapshot();
        board.restore(board.snapshot()).unwrap();
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_snapshot_does_not_alias() {
        let mut board = conway_board(3);
        let snap = board.snapshot();
        board.toggle_cell(0, 0).unwrap();
        assert!(snap.is_empty());
    }

    #[test]
    fn test_dimension_mismatch_keeps_grid() {
        let mut board = board_from(vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]);
        let before = board.snapshot();

        let result = board.restore(Grid::new(4, 4));
        assert!(matches!(
            result,
            Err(LifeError::DimensionMismatch {
                width: 4,
                height: 4,
                size: 3
            })
        ));
        assert_eq!(board.snapshot(), before);

        assert!(board.restore(Grid::new(3, 2)).is_err());
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_rules_swapped_between_generations() {
        let rules = shared_rules(RuleSet::conway());
        let mut board = Board::new(5, Rc::clone(&rules)).unwrap();
        board.set_cell(2, 2, true).unwrap();

        // Lone cell under B/S0 survives with zero neighbors
        rules.borrow_mut().configure("0", "").unwrap();
        board.advance_generation();
        assert_eq!(board.living_cells(), vec![(2, 2)]);
        assert_eq!(board.rules().to_string(), "B/S0");

        board.bind_rules(shared_rules(RuleSet::conway()));
        board.advance_generation();
        assert_eq!(board.living_count(), 0);
    }
}
