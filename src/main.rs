//! Main CLI application for the Sudoku SAT solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use sudoku_sat::{
    config::{CliOverrides, Settings, SolverBackend},
    puzzle::{create_example_puzzles, load_puzzle_from_file},
    solving::{SolutionValidator, SudokuProblem},
    utils::SolutionFormatter,
};

#[derive(Parser)]
#[command(name = "sudoku_sat")]
#[command(about = "Sudoku solver built on SAT encoding")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a Sudoku puzzle
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Solver backend, cadical or splr (overrides config)
        #[arg(short, long)]
        backend: Option<String>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the puzzle next to the solution
        #[arg(long)]
        side_by_side: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a completed grid against a puzzle's clues and the Sudoku rules
    Validate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file with the original clues
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Candidate solution file
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Analyze a puzzle: encoding size and solvability
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            backend,
            output,
            side_by_side,
        } => solve_command(config, puzzle, backend, output, side_by_side),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate {
            config,
            puzzle,
            solution,
        } => validate_command(config, puzzle, solution),
        Commands::Analyze { config, puzzle } => analyze_command(config, puzzle),
    }
}

/// Load settings from a config file, falling back to defaults if it is absent
fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(&config_path.to_path_buf())
    } else {
        Ok(Settings::default())
    }
}

fn parse_backend(name: &str) -> Result<SolverBackend> {
    match name.to_lowercase().as_str() {
        "cadical" => Ok(SolverBackend::Cadical),
        "splr" => Ok(SolverBackend::Splr),
        other => anyhow::bail!("Unknown solver backend '{}', expected cadical or splr", other),
    }
}

fn solve_command(
    config: PathBuf,
    puzzle: Option<PathBuf>,
    backend: Option<String>,
    output: Option<PathBuf>,
    side_by_side: bool,
) -> Result<()> {
    let mut settings = load_settings(&config)?;

    let backend = backend.as_deref().map(parse_backend).transpose()?;
    settings.merge_with_cli(&CliOverrides {
        puzzle_file: puzzle,
        output_dir: output,
        backend,
        timeout_seconds: None,
    });

    let solution = sudoku_sat::solve_puzzle(settings.clone())?;

    if side_by_side {
        println!(
            "{}",
            SolutionFormatter::format_side_by_side(&solution.puzzle, &solution.solved)
        );
    } else {
        println!("{}", SolutionFormatter::format_solution(&solution, true));
    }

    if settings.output.save_solutions {
        SolutionFormatter::save_solution(
            &solution,
            &settings.output.output_directory,
            &settings.output.format,
        )?;
        println!(
            "Solution saved to {}",
            settings.output.output_directory.display()
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config/default.yaml");
    let puzzle_dir = directory.join("input/puzzles");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }

    let settings = Settings::default();
    settings
        .to_file(&config_path)
        .context("Failed to write default config")?;
    println!("Created config: {}", config_path.display());

    create_example_puzzles(&puzzle_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", puzzle_dir.display());

    println!("\nTry: sudoku_sat solve --config {}", config_path.display());
    Ok(())
}

fn validate_command(config: PathBuf, puzzle: PathBuf, solution: PathBuf) -> Result<()> {
    let settings = load_settings(&config)?;
    let geometry = settings.encoding.geometry;

    let puzzle_grid = load_puzzle_from_file(&puzzle, geometry)?;
    let candidate = load_puzzle_from_file(&solution, geometry)?;

    let validator = SolutionValidator::new(geometry);
    let result = validator.validate(&puzzle_grid, &candidate)?;

    if result.is_valid {
        println!("Solution is valid.");
        Ok(())
    } else {
        for violation in &result.details.violations {
            eprintln!("  - {}", violation.description);
        }
        anyhow::bail!(
            "Solution is invalid: {}",
            result
                .error_message
                .unwrap_or_else(|| "Unknown error".to_string())
        )
    }
}

fn analyze_command(config: PathBuf, puzzle: Option<PathBuf>) -> Result<()> {
    let mut settings = load_settings(&config)?;
    settings.merge_with_cli(&CliOverrides {
        puzzle_file: puzzle,
        ..Default::default()
    });

    let problem = SudokuProblem::new(settings)?;
    println!("{}", problem.puzzle());

    let analysis = problem.analyze()?;
    println!("{}", analysis);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_backend() {
        assert_eq!(parse_backend("cadical").unwrap(), SolverBackend::Cadical);
        assert_eq!(parse_backend("Splr").unwrap(), SolverBackend::Splr);
        assert!(parse_backend("minisat").is_err());
    }

    #[test]
    fn test_load_settings_falls_back_to_default() {
        let settings = load_settings(Path::new("does/not/exist.yaml")).unwrap();
        assert_eq!(settings.solver.backend, SolverBackend::Cadical);
    }

    #[test]
    fn test_setup_creates_files() {
        let temp_dir = tempdir().unwrap();

        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/puzzles/example.txt").exists());
        assert!(temp_dir.path().join("input/puzzles/blank.txt").exists());

        // A second run without --force must refuse to overwrite
        assert!(setup_command(temp_dir.path().to_path_buf(), false).is_err());
        assert!(setup_command(temp_dir.path().to_path_buf(), true).is_ok());
    }

    #[test]
    fn test_solve_command_end_to_end() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config = temp_dir.path().join("config/default.yaml");
        let puzzle = temp_dir.path().join("input/puzzles/easy.txt");

        solve_command(config, Some(puzzle), Some("cadical".into()), None, false).unwrap();
    }
}
