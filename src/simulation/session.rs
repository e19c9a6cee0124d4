//! A running simulation: board, shared rules and the run flag

use crate::config::Settings;
use crate::error::Result;
use crate::game_of_life::{
    load_state, patterns, save_state, shared_rules, Board, Grid, RuleSet, SavedState,
};
use anyhow::Context;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SIZE: usize = 30;
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

/// What a front end drives: it issues commands here and redraws from
/// [`Session::tick`] or [`Session::board`].
#[derive(Debug)]
pub struct Session {
    board: Board,
    running: bool,
    tick_interval: Duration,
}

impl Session {
    /// Create a session with an empty board
    pub fn new(size: usize, rules: RuleSet) -> Result<Self> {
        let board = Board::new(size, shared_rules(rules))?;
        Ok(Self {
            board,
            running: false,
            tick_interval: DEFAULT_TICK,
        })
    }

    /// 30×30 board, Conway's rules, a glider in the top-left corner.
    pub fn with_defaults() -> Result<Self> {
        let mut session = Self::new(DEFAULT_SIZE, RuleSet::conway())?;
        patterns::GLIDER.place_on(&mut session.board, 0, 0)?;
        Ok(session)
    }

    /// Build a session from validated settings
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let rules = RuleSet::new(&settings.rules.survive, &settings.rules.born)
            .context("Invalid rules in configuration")?;
        let mut session = Self::new(settings.board.size, rules)?;
        session.tick_interval = Duration::from_millis(settings.simulation.tick_ms);

        if let Some(name) = &settings.board.pattern {
            let pattern = patterns::by_name(name)
                .with_context(|| format!("Unknown seed pattern: {}", name))?;
            pattern.place_on(&mut session.board, 0, 0)?;
        }

        tracing::debug!(
            size = settings.board.size,
            rules = %session.rules(),
            "session created"
        );
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Rules the board is bound to.
    pub fn rules(&self) -> RuleSet {
        self.board.rules()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Start or stop automatic advancing. Returns the new state.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        tracing::debug!(running = self.running, "toggled run state");
        self.running
    }

    /// One periodic tick: advance if running, then hand back the grid to draw.
    pub fn tick(&mut self) -> Grid {
        if self.running {
            self.board.advance_generation();
        }
        self.board.snapshot()
    }

    /// Advance a single generation regardless of the run flag.
    pub fn step(&mut self) -> Grid {
        self.board.advance_generation();
        self.board.snapshot()
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<()> {
        self.board.toggle_cell(x, y)
    }

    pub fn clear(&mut self) {
        self.board.clear();
    }

    /// Replace the rules from digit strings. Invalid input keeps the old rules.
    pub fn update_rules(&mut self, survive: &str, born: &str) -> Result<()> {
        self.board.rules_handle().borrow_mut().configure(survive, born)?;
        tracing::debug!(rules = %self.rules(), "rules updated");
        Ok(())
    }

    /// Advance `generations` times, calling `observe` after each one and
    /// sleeping `pace` in between when given.
    pub fn run<F>(&mut self, generations: usize, pace: Option<Duration>, mut observe: F)
    where
        F: FnMut(u64, &Board),
    {
        for i in 0..generations {
            if i > 0 {
                if let Some(pace) = pace {
                    std::thread::sleep(pace);
                }
            }
            self.board.advance_generation();
            observe(self.board.generation(), &self.board);
        }
    }

    pub fn saved_state(&self) -> SavedState {
        SavedState::capture(&self.board)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_state(&self.saved_state(), path)
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let state = load_state(&path)?;
        self.apply(state)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded state");
        Ok(())
    }

    /// Install a saved grid and its rules. Everything is decoded and checked
    /// first; if any part is rejected neither the grid nor the rules change.
    pub fn apply(&mut self, state: SavedState) -> Result<()> {
        let decoded = state.to_grid().and_then(|grid| Ok((grid, state.to_rules()?)));
        let (grid, rules) = decoded.inspect_err(|e| {
            tracing::warn!(error = %e, "rejected saved state");
        })?;

        self.board.restore(grid).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected saved state");
        })?;
        *self.board.rules_handle().borrow_mut() = rules;
        Ok(())
    }
}
