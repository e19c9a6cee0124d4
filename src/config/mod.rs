//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, OutputConfig, OutputFormat, RulesConfig, Settings, SimulationConfig,
};
