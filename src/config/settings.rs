//! Configuration settings for the simulator

use crate::game_of_life::{patterns, RuleSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub rules: RulesConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: usize,
    /// Preset stamped at the top-left corner on startup
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub survive: String,
    pub born: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Generations advanced by a headless run
    pub generations: usize,
    /// Milliseconds between generations while running
    pub tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Where a headless run writes its final state, if anywhere
    #[serde(default)]
    pub save_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Print every generation
    Text,
    /// Print only the final generation
    Final,
    /// Print nothing but the summary
    Quiet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                size: 30,
                pattern: Some(patterns::GLIDER.name.to_string()),
            },
            rules: RulesConfig {
                survive: "23".to_string(),
                born: "3".to_string(),
            },
            simulation: SimulationConfig {
                generations: 100,
                tick_ms: 200,
            },
            output: OutputConfig {
                format: OutputFormat::Final,
                save_path: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.size == 0 {
            anyhow::bail!("Board size must be positive");
        }

        if self.simulation.tick_ms == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        RuleSet::new(&self.rules.survive, &self.rules.born).context("Invalid rules")?;

        if let Some(name) = &self.board.pattern {
            if patterns::by_name(name).is_none() {
                anyhow::bail!("Unknown seed pattern: {}", name);
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(size) = cli_overrides.size {
            self.board.size = size;
        }
        if let Some(ref survive) = cli_overrides.survive {
            self.rules.survive = survive.clone();
        }
        if let Some(ref born) = cli_overrides.born {
            self.rules.born = born.clone();
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(tick_ms) = cli_overrides.tick_ms {
            self.simulation.tick_ms = tick_ms;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref save_path) = cli_overrides.save_path {
            self.output.save_path = Some(save_path.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub size: Option<usize>,
    pub survive: Option<String>,
    pub born: Option<String>,
    pub generations: Option<usize>,
    pub tick_ms: Option<u64>,
    pub format: Option<OutputFormat>,
    pub save_path: Option<PathBuf>,
}
