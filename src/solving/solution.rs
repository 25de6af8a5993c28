//! Solution representation for solved puzzles

use crate::config::SolverBackend;
use crate::puzzle::Grid;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A solved puzzle: the original clues, the completed grid, and how the
/// completion was obtained
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The puzzle as given, clues and unknowns
    pub puzzle: Grid,
    /// The completed grid
    pub solved: Grid,
    /// Time taken to find this solution
    #[serde(skip)]
    pub solve_time: Duration,
    /// Metadata about the solution
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Number of pre-filled cells in the puzzle
    pub clue_count: usize,
    /// Number of cells the solver filled in
    pub deduced_count: usize,
    /// Solver backend that produced the model
    pub backend: SolverBackend,
}

impl Solution {
    /// Create a new solution
    pub fn new(puzzle: Grid, solved: Grid, backend: SolverBackend, solve_time: Duration) -> Self {
        let metadata = SolutionMetadata {
            clue_count: puzzle.clue_count(),
            deduced_count: puzzle.unknown_count(),
            backend,
        };

        Self {
            puzzle,
            solved,
            solve_time,
            metadata,
        }
    }

    /// The puzzle as given
    pub fn puzzle(&self) -> &Grid {
        &self.puzzle
    }

    /// The completed grid
    pub fn solved(&self) -> &Grid {
        &self.solved
    }

    /// Get a summary of the solution
    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            clue_count: self.metadata.clue_count,
            deduced_count: self.metadata.deduced_count,
            backend: self.metadata.backend,
            solve_time_ms: self.solve_time.as_millis() as u64,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Compact per-solution facts for listings and reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub clue_count: usize,
    pub deduced_count: usize,
    pub backend: SolverBackend,
    pub solve_time_ms: u64,
}
