//! Conway's Game of Life on a toroidal board
//!
//! The core is [`RuleSet`] (which neighbor counts keep a cell alive or bring
//! it to life) and [`Board`] (an N×N grid whose edges wrap). [`Session`] is
//! the driver a front end talks to: it owns a board and its rules, tracks the
//! run flag and handles save/load of the JSON state format.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, Result};
pub use game_of_life::{shared_rules, Board, Grid, NeighborCount, RuleSet, SavedState, SharedRules};
pub use simulation::Session;
