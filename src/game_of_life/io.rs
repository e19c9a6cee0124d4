//! Saved board state as JSON
//!
//! Format: `{"grid": [[0, 1, ...], ...], "survive": "23", "born": "3"}` with
//! one inner array per row. Missing rule strings fall back to Conway's rules.

use super::patterns::{self, Pattern};
use super::{shared_rules, Board, Grid, RuleSet};
use crate::error::{LifeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SURVIVE: &str = "23";
pub const DEFAULT_BORN: &str = "3";

fn default_survive() -> String {
    DEFAULT_SURVIVE.to_string()
}

fn default_born() -> String {
    DEFAULT_BORN.to_string()
}

/// Grid and rules as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub grid: Vec<Vec<u8>>,
    #[serde(default = "default_survive")]
    pub survive: String,
    #[serde(default = "default_born")]
    pub born: String,
}

impl SavedState {
    /// Capture a board's grid and the rules it is bound to
    pub fn capture(board: &Board) -> Self {
        let rules = board.rules();
        Self {
            grid: board.snapshot().to_matrix(),
            survive: rules.survive_digits(),
            born: rules.born_digits(),
        }
    }

    /// Decode the grid, rejecting cells other than 0 and 1.
    pub fn to_grid(&self) -> Result<Grid> {
        Grid::from_matrix(&self.grid)
    }

    pub fn to_rules(&self) -> Result<RuleSet> {
        RuleSet::new(&self.survive, &self.born)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Write a saved state, creating parent directories as needed.
pub fn save_state<P: AsRef<Path>>(state: &SavedState, path: P) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| LifeError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, state.to_json()?).map_err(io_err)?;

    tracing::debug!(path = %path.display(), "saved state");
    Ok(())
}

pub fn load_state<P: AsRef<Path>>(path: P) -> Result<SavedState> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LifeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SavedState::from_json(&content)
}

/// Write one saved state per preset pattern, centred on a `size`×`size`
/// board under Conway's rules. Existing files are left alone unless
/// `overwrite` is set. Returns each path with whether it was written.
pub fn create_example_states<P: AsRef<Path>>(
    dir: P,
    size: usize,
    overwrite: bool,
) -> Result<Vec<(PathBuf, bool)>> {
    let dir = dir.as_ref();
    patterns::ALL
        .iter()
        .map(|pattern| {
            let path = dir.join(format!("{}.json", pattern.name));
            if path.exists() && !overwrite {
                return Ok((path, false));
            }
            save_state(&example_state(pattern, size)?, &path)?;
            Ok((path, true))
        })
        .collect()
}

fn example_state(pattern: &Pattern, size: usize) -> Result<SavedState> {
    let mut board = Board::new(size, shared_rules(RuleSet::conway()))?;
    let corner = size.saturating_sub(3) / 2;
    pattern.place_on(&mut board, corner, corner)?;
    Ok(SavedState::capture(&board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_json_layout() {
        let state = SavedState {
            grid: vec![vec![0, 1], vec![1, 0]],
            survive: "23".to_string(),
            born: "3".to_string(),
        };
        assert_eq!(
            state.to_json().unwrap(),
            r#"{"grid":[[0,1],[1,0]],"survive":"23","born":"3"}"#
        );
    }

    #[test]
    fn test_missing_rules_default() {
        let state = SavedState::from_json(r#"{"grid": [[0, 0], [0, 1]]}"#).unwrap();
        assert_eq!(state.survive, "23");
        assert_eq!(state.born, "3");
        assert_eq!(state.to_rules().unwrap(), RuleSet::conway());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SavedState::from_json("{\"grid\": [[0, 1]"),
            Err(LifeError::Serialization(_))
        ));
        assert!(matches!(
            SavedState::from_json(r#"{"survive": "23"}"#),
            Err(LifeError::Serialization(_))
        ));
    }

    #[test]
    fn test_capture() {
        let rules = shared_rules(RuleSet::new("23", "36").unwrap());
        let mut board = Board::new(2, rules).unwrap();
        board.toggle_cell(1, 0).unwrap();

        let state = SavedState::capture(&board);
        assert_eq!(state.grid, vec![vec![0, 1], vec![0, 0]]);
        assert_eq!(state.born, "36");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/state.json");
        let state = SavedState {
            grid: vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
            survive: "1".to_string(),
            born: "".to_string(),
        };

        save_state(&state, &path).unwrap();
        assert_eq!(load_state(&path).unwrap(), state);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempdir().unwrap();
        let result = load_state(temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(LifeError::Io { .. })));
    }

    #[test]
    fn test_create_example_states() {
        let temp_dir = tempdir().unwrap();
        let written = create_example_states(temp_dir.path(), 30, false).unwrap();
        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|(_, created)| *created));

        let glider = load_state(temp_dir.path().join("glider.json")).unwrap();
        let grid = glider.to_grid().unwrap();
        assert_eq!(grid.width(), 30);
        assert_eq!(grid.living_count(), 5);
    }

    #[test]
    fn test_example_states_keep_existing_files() {
        let temp_dir = tempdir().unwrap();
        let glider_path = temp_dir.path().join("glider.json");
        let edited = r#"{"grid":[[1]],"survive":"23","born":"3"}"#;
        std::fs::write(&glider_path, edited).unwrap();

        let written = create_example_states(temp_dir.path(), 30, false).unwrap();
        assert!(written.contains(&(glider_path.clone(), false)));
        assert!(written.contains(&(temp_dir.path().join("block.json"), true)));
        assert_eq!(std::fs::read_to_string(&glider_path).unwrap(), edited);

        create_example_states(temp_dir.path(), 30, true).unwrap();
        let glider = load_state(&glider_path).unwrap();
        assert_eq!(glider.grid.len(), 30);
    }
}
