//! Utility functions for display and formatting

pub mod display;

pub use display::{Color, ColorOutput, GridFormatter};
