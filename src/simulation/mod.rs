//! Driving a board over time

pub mod session;

pub use session::{Session, DEFAULT_SIZE, DEFAULT_TICK};
