//! Puzzle solving pipeline

use super::{Solution, SolutionValidator};
use crate::config::Settings;
use crate::error::SudokuError;
use crate::puzzle::{load_puzzle_from_file, Grid};
use crate::sat::encoder::EncodingStatistics;
use crate::sat::SudokuEncoder;
use anyhow::{Context, Result};
use std::time::Instant;

/// One puzzle on its way through the pipeline: validated input, the shared
/// encoder, and the output check
pub struct SudokuProblem {
    settings: Settings,
    puzzle: Grid,
    encoder: SudokuEncoder,
    validator: SolutionValidator,
}

impl SudokuProblem {
    /// Create a problem by loading the puzzle named in the settings
    pub fn new(settings: Settings) -> Result<Self> {
        let puzzle = load_puzzle_from_file(&settings.input.puzzle_file, settings.encoding.geometry)
            .context("Failed to load puzzle file")?;

        Self::with_puzzle(settings, puzzle)
    }

    /// Create a problem with an explicit puzzle grid (useful for testing)
    pub fn with_puzzle(settings: Settings, puzzle: Grid) -> Result<Self> {
        let geometry = settings.encoding.geometry;
        if puzzle.geometry() != geometry {
            return Err(SudokuError::InvalidGridShape {
                expected: geometry.side(),
                rows: puzzle.geometry().side(),
                cols: puzzle.geometry().side(),
            }
            .into());
        }

        let encoder = SudokuEncoder::new(&settings);
        let validator = SolutionValidator::new(geometry);

        Ok(Self {
            settings,
            puzzle,
            encoder,
            validator,
        })
    }

    /// Solve the puzzle and return the checked solution
    pub fn solve(&mut self) -> Result<Solution> {
        let start_time = Instant::now();

        println!(
            "Solving puzzle: {} clues, {} unknown cells",
            self.puzzle.clue_count(),
            self.puzzle.unknown_count()
        );

        let solved = self.encoder.solve(&self.puzzle)?;
        let solve_time = start_time.elapsed();

        println!("Solver finished in {:.3}s", solve_time.as_secs_f64());

        // The model is checked against the rules before we hand it out
        let validation = self
            .validator
            .validate(&self.puzzle, &solved)
            .context("Solution validation failed")?;

        if !validation.is_valid {
            anyhow::bail!(
                "Solver produced an invalid grid: {}",
                validation
                    .error_message
                    .unwrap_or_else(|| "Unknown error".to_string())
            );
        }

        Ok(Solution::new(
            self.puzzle.clone(),
            solved,
            self.settings.solver.backend,
            solve_time,
        ))
    }

    /// Probe the puzzle without committing to a full solve report
    pub fn analyze(&self) -> Result<ProblemAnalysis> {
        // Two models are enough to tell unique from underdetermined
        let solution_count = self.encoder.count_solutions(&self.puzzle, 2)?;

        let solvability = match solution_count {
            0 => Solvability::Unsolvable,
            1 => Solvability::Unique,
            _ => Solvability::Multiple,
        };

        Ok(ProblemAnalysis {
            clue_count: self.puzzle.clue_count(),
            unknown_count: self.puzzle.unknown_count(),
            solvability,
            statistics: self.encoder.statistics(),
        })
    }

    /// Get the puzzle grid
    pub fn puzzle(&self) -> &Grid {
        &self.puzzle
    }

    /// Get the problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get encoding statistics
    pub fn encoding_statistics(&self) -> EncodingStatistics {
        self.encoder.statistics()
    }
}

/// What an analysis pass learned about a puzzle
#[derive(Debug, Clone)]
pub struct ProblemAnalysis {
    pub clue_count: usize,
    pub unknown_count: usize,
    pub solvability: Solvability,
    pub statistics: EncodingStatistics,
}

/// How many completions a puzzle admits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solvability {
    /// Exactly one completion: a well-posed puzzle
    Unique,
    /// More than one completion: the clues underdetermine the board
    Multiple,
    /// No completion: the clues are contradictory
    Unsolvable,
}

impl std::fmt::Display for ProblemAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Puzzle Analysis:")?;
        writeln!(f, "  Clues: {}", self.clue_count)?;
        writeln!(f, "  Unknown cells: {}", self.unknown_count)?;
        let verdict = match self.solvability {
            Solvability::Unique => "well-posed (exactly one solution)",
            Solvability::Multiple => "underdetermined (more than one solution)",
            Solvability::Unsolvable => "contradictory (no solution)",
        };
        writeln!(f, "  Solvability: {}", verdict)?;
        write!(f, "{}", self.statistics)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardGeometry;
    use crate::puzzle::SudokuRules;

    fn hard_puzzle() -> Grid {
        let rows: Vec<Vec<u8>> = vec![
            vec![0, 2, 0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 6, 0, 0, 0, 0, 3],
            vec![0, 7, 4, 0, 8, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 3, 0, 0, 2],
            vec![0, 8, 0, 0, 4, 0, 0, 1, 0],
            vec![6, 0, 0, 5, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 1, 0, 7, 8, 0],
            vec![5, 0, 0, 0, 0, 9, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0, 4, 0],
        ];
        Grid::from_rows(rows, BoardGeometry::standard()).unwrap()
    }

    #[test]
    fn test_solve_pipeline() {
        let settings = Settings::default();
        let mut problem = SudokuProblem::with_puzzle(settings, hard_puzzle()).unwrap();

        let solution = problem.solve().unwrap();
        assert!(SudokuRules::is_valid_solution(&solution.solved));
        assert!(SudokuRules::preserves_clues(&solution.puzzle, &solution.solved));
        assert_eq!(solution.metadata.clue_count, 19);
    }

    #[test]
    fn test_unsolvable_puzzle_is_reported() {
        let mut puzzle = Grid::empty(BoardGeometry::standard());
        puzzle.set(3, 2, 7);
        puzzle.set(3, 8, 7);

        let mut problem = SudokuProblem::with_puzzle(Settings::default(), puzzle).unwrap();
        let err = problem.solve().unwrap_err();
        assert_eq!(
            err.downcast_ref::<SudokuError>(),
            Some(&SudokuError::Unsolvable)
        );
    }

    #[test]
    fn test_analyze_well_posed() {
        let problem = SudokuProblem::with_puzzle(Settings::default(), hard_puzzle()).unwrap();
        let analysis = problem.analyze().unwrap();

        assert_eq!(analysis.clue_count, 19);
        assert_eq!(analysis.solvability, Solvability::Unique);
        assert_eq!(analysis.statistics.constraints.structural_total(), 11745);
    }

    #[test]
    fn test_analyze_underdetermined() {
        // A single clue leaves the board wide open
        let mut puzzle = Grid::empty(BoardGeometry::standard());
        puzzle.set(0, 0, 1);

        let problem = SudokuProblem::with_puzzle(Settings::default(), puzzle).unwrap();
        let analysis = problem.analyze().unwrap();
        assert_eq!(analysis.solvability, Solvability::Multiple);
    }

    #[test]
    fn test_geometry_mismatch_is_rejected() {
        let puzzle = Grid::empty(BoardGeometry::with_box_side(2));
        let result = SudokuProblem::with_puzzle(Settings::default(), puzzle);
        assert!(result.is_err());
    }
}
