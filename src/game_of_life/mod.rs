//! Game of Life core functionality

pub mod board;
pub mod grid;
pub mod io;
pub mod patterns;
pub mod rules;

pub use board::{shared_rules, Board, SharedRules};
pub use grid::Grid;
pub use io::{create_example_states, load_state, save_state, SavedState};
pub use patterns::Pattern;
pub use rules::{NeighborCount, RuleSet};
