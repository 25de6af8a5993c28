//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::puzzle::Grid;
use crate::solving::Solution;
use anyhow::{Context, Result};
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution, show_puzzle: bool) -> String {
        let mut output = String::new();

        output.push_str("=== Solution ===\n");
        output.push_str(&format!(
            "Solve Time: {:.3}s\n",
            solution.solve_time.as_secs_f64()
        ));
        output.push_str(&format!("Backend: {:?}\n", solution.metadata.backend));
        output.push_str(&format!(
            "Cells: {} clues + {} deduced\n",
            solution.metadata.clue_count, solution.metadata.deduced_count
        ));
        output.push('\n');

        if show_puzzle {
            output.push_str("Puzzle:\n");
            output.push_str(&solution.puzzle.to_string());
            output.push('\n');
        }

        output.push_str("Solved:\n");
        output.push_str(&solution.solved.to_string());

        output
    }

    /// Format the puzzle and its solution next to each other
    pub fn format_side_by_side(puzzle: &Grid, solved: &Grid) -> String {
        let puzzle_lines: Vec<String> = puzzle.to_string().lines().map(String::from).collect();
        let solved_lines: Vec<String> = solved.to_string().lines().map(String::from).collect();
        let width = puzzle_lines.iter().map(String::len).max().unwrap_or(0);

        let mut output = String::new();
        output.push_str(&format!("{:<width$}        Solved\n", "Puzzle"));

        for (left, right) in puzzle_lines.iter().zip(&solved_lines) {
            output.push_str(&format!("{left:<width$}    =>  {right}\n"));
        }

        output
    }

    /// Save a solution based on the output format
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                let filepath = output_dir.join("solution.txt");
                let content = Self::format_solution(solution, true);
                std::fs::write(filepath, content).context("Failed to write solution.txt")?;
            }
            OutputFormat::Json => {
                let filepath = output_dir.join("solution.json");
                let json = solution.to_json().context("Failed to serialize solution")?;
                std::fs::write(filepath, json).context("Failed to write solution.json")?;

                let summary_path = output_dir.join("summary.json");
                let summary_json = serde_json::to_string_pretty(&solution.summary())
                    .context("Failed to serialize summary")?;
                std::fs::write(summary_path, summary_json).context("Failed to write summary.json")?;
            }
        }

        Ok(())
    }
}
