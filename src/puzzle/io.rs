//! File I/O operations for Sudoku grids

use super::Grid;
use crate::config::BoardGeometry;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a puzzle from a text file.
///
/// Format: one line per row; digits 1-9 for clues, '0' or '.' for unknown
/// cells. Spaces inside a line are ignored, blank lines and lines starting
/// with '#' are skipped.
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P, geometry: BoardGeometry) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_puzzle_from_string(&content, geometry)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Parse a puzzle from a string representation
pub fn parse_puzzle_from_string(content: &str, geometry: BoardGeometry) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Puzzle file is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(geometry.side());
        for (col_idx, ch) in line.chars().filter(|ch| !ch.is_whitespace()).enumerate() {
            match ch {
                '.' => row.push(0),
                '0'..='9' => row.push(ch as u8 - b'0'),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only digits and '.' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        rows.push(row);
    }

    Grid::from_rows(rows, geometry).map_err(Into::into)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    // Create parent directories if they don't exist
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to its file representation
pub fn grid_to_string(grid: &Grid) -> String {
    let side = grid.geometry().side();
    let mut result = String::with_capacity(side * (side + 1));

    for row in 0..side {
        for col in 0..side {
            let value = grid.get(row, col);
            if value == 0 {
                result.push('.');
            } else {
                result.push((b'0' + value) as char);
            }
        }
        result.push('\n');
    }

    result
}

/// Create example puzzle files
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // A hard puzzle with 19 clues and a unique solution
    let example_content = "\
.2.......\n\
...6....3\n\
.74.8....\n\
.....3..2\n\
.8..4..1.\n\
6..5.....\n\
....1.78.\n\
5....9...\n\
.......4.\n";
    std::fs::write(dir.join("example.txt"), example_content)
        .context("Failed to write example.txt")?;

    // No clues at all: every completed board satisfies it
    let blank_content = ".........\n".repeat(9);
    std::fs::write(dir.join("blank.txt"), blank_content).context("Failed to write blank.txt")?;

    // An easy puzzle, mostly filled in
    let easy_content = "\
53..7....\n\
6..195...\n\
.98....6.\n\
8...6...3\n\
4..8.3..1\n\
7...2...6\n\
.6....28.\n\
...419..5\n\
....8..79\n";
    std::fs::write(dir.join("easy.txt"), easy_content).context("Failed to write easy.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_puzzle_from_string() {
        let content = "\
.2.......\n\
...6....3\n\
.74.8....\n\
.....3..2\n\
.8..4..1.\n\
6..5.....\n\
....1.78.\n\
5....9...\n\
.......4.\n";
        let grid = parse_puzzle_from_string(content, BoardGeometry::standard()).unwrap();

        assert_eq!(grid.clue_count(), 19);
        assert_eq!(grid.get(0, 1), 2);
        assert_eq!(grid.get(1, 8), 3);
        assert_eq!(grid.get(5, 0), 6);
        assert_eq!(grid.get(0, 0), 0);
    }

    #[test]
    fn test_parse_with_comments_and_zeros() {
        let mut content = String::from("# header comment\n");
        content.push_str(&"000000000\n".repeat(9));
        let grid = parse_puzzle_from_string(&content, BoardGeometry::standard()).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_character() {
        let mut content = "00000000x\n".to_string();
        content.push_str(&"000000000\n".repeat(8));
        assert!(parse_puzzle_from_string(&content, BoardGeometry::standard()).is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let content = "000\n000\n000\n";
        assert!(parse_puzzle_from_string(content, BoardGeometry::standard()).is_err());
    }

    #[test]
    fn test_grid_round_trip() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0][1] = 2;
        rows[7][0] = 5;
        let grid = Grid::from_rows(rows, BoardGeometry::standard()).unwrap();

        let content = grid_to_string(&grid);
        let reparsed = parse_puzzle_from_string(&content, BoardGeometry::standard()).unwrap();
        assert_eq!(grid, reparsed);
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("puzzle.txt");

        let mut rows = vec![vec![0u8; 9]; 9];
        rows[4][4] = 4;
        let original = Grid::from_rows(rows, BoardGeometry::standard()).unwrap();

        save_grid_to_file(&original, &file_path).unwrap();
        let loaded = load_puzzle_from_file(&file_path, BoardGeometry::standard()).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_create_example_puzzles() {
        let temp_dir = tempdir().unwrap();
        create_example_puzzles(temp_dir.path()).unwrap();

        let example =
            load_puzzle_from_file(temp_dir.path().join("example.txt"), BoardGeometry::standard())
                .unwrap();
        assert_eq!(example.clue_count(), 19);

        let blank =
            load_puzzle_from_file(temp_dir.path().join("blank.txt"), BoardGeometry::standard())
                .unwrap();
        assert!(blank.is_empty());

        let easy =
            load_puzzle_from_file(temp_dir.path().join("easy.txt"), BoardGeometry::standard())
                .unwrap();
        assert!(easy.clue_count() > example.clue_count());
    }
}
