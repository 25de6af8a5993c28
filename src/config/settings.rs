//! Configuration settings for the Sudoku SAT solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub encoding: EncodingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    Cadical,
    Splr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_solutions: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    pub geometry: BoardGeometry,
}

/// Board dimensions driving the whole encoding.
///
/// Every count the encoder relies on (digits per cell, cells per board,
/// boolean variables per formula) derives from these two numbers, so a
/// single value threaded through the pipeline replaces scattered numeric
/// constants. The standard board is 9x9 with 3x3 boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGeometry {
    side: usize,
    box_side: usize,
}

impl BoardGeometry {
    /// The standard 9x9 board with 3x3 boxes
    pub fn standard() -> Self {
        Self {
            side: 9,
            box_side: 3,
        }
    }

    /// Board with the given box side (side is always the square of the box side)
    pub fn with_box_side(box_side: usize) -> Self {
        Self {
            side: box_side * box_side,
            box_side,
        }
    }

    /// Length of one row, column, or digit range
    pub fn side(&self) -> usize {
        self.side
    }

    /// Length of one box edge
    pub fn box_side(&self) -> usize {
        self.box_side
    }

    /// Number of digits a cell can hold (1 through side)
    pub fn digit_count(&self) -> usize {
        self.side
    }

    /// Total cells on the board
    pub fn cell_count(&self) -> usize {
        self.side * self.side
    }

    /// Total boolean variables: one per (row, column, digit) triple
    pub fn variable_count(&self) -> usize {
        self.side * self.side * self.side
    }

    /// 1-based origin coordinates of the box rows/columns (1, 4, 7 for 9x9)
    pub fn box_origins(&self) -> Vec<usize> {
        (0..self.box_side).map(|i| i * self.box_side + 1).collect()
    }

    /// Check that the side is the square of the box side
    pub fn is_consistent(&self) -> bool {
        self.box_side > 0 && self.side == self.box_side * self.box_side
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                backend: SolverBackend::Cadical,
                timeout_seconds: 300,
            },
            input: InputConfig {
                puzzle_file: PathBuf::from("input/puzzles/example.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_solutions: false,
                output_directory: PathBuf::from("output/solutions"),
            },
            encoding: EncodingConfig {
                geometry: BoardGeometry::standard(),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
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
        if !self.encoding.geometry.is_consistent() {
            anyhow::bail!(
                "Board side {} is not the square of box side {}",
                self.encoding.geometry.side(),
                self.encoding.geometry.box_side()
            );
        }

        if self.solver.timeout_seconds == 0 {
            anyhow::bail!("Solver timeout must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(backend) = cli_overrides.backend {
            self.solver.backend = backend;
        }
        if let Some(timeout) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = timeout;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub puzzle_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub backend: Option<SolverBackend>,
    pub timeout_seconds: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_geometry() {
        let geometry = BoardGeometry::standard();
        assert_eq!(geometry.side(), 9);
        assert_eq!(geometry.box_side(), 3);
        assert_eq!(geometry.digit_count(), 9);
        assert_eq!(geometry.cell_count(), 81);
        assert_eq!(geometry.variable_count(), 729);
        assert!(geometry.is_consistent());
    }

    #[test]
    fn test_box_origins() {
        let geometry = BoardGeometry::standard();
        assert_eq!(geometry.box_origins(), vec![1, 4, 7]);

        let small = BoardGeometry::with_box_side(2);
        assert_eq!(small.side(), 4);
        assert_eq!(small.box_origins(), vec![1, 3]);
    }

    #[test]
    fn test_settings_validation() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());

        let mut broken = Settings::default();
        broken.solver.timeout_seconds = 0;
        assert!(broken.validate().is_err());

        let mut skewed = Settings::default();
        skewed.encoding.geometry = BoardGeometry {
            side: 8,
            box_side: 3,
        };
        assert!(skewed.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            puzzle_file: Some(PathBuf::from("other.txt")),
            backend: Some(SolverBackend::Splr),
            ..Default::default()
        };

        settings.merge_with_cli(&overrides);
        assert_eq!(settings.input.puzzle_file, PathBuf::from("other.txt"));
        assert_eq!(settings.solver.backend, SolverBackend::Splr);
        assert_eq!(settings.solver.timeout_seconds, 300);
    }

    #[test]
    fn test_yaml_round_trip() {
        let settings = Settings::default();
        let yaml = serde_yaml::to_string(&settings).unwrap();
        let parsed: Settings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.encoding.geometry, settings.encoding.geometry);
        assert_eq!(
            parsed.solver.timeout_seconds,
            settings.solver.timeout_seconds
        );
    }
}
