//! Sudoku rules expressed as data: cell subsets and digit-uniqueness checks
//!
//! A row, a column, and a box are all the same thing to the rest of the
//! crate: an ordered list of nine cells whose digits must be pairwise
//! distinct. Everything downstream (clause generation, solution checking)
//! consumes these coordinate lists instead of special-casing the three
//! shapes.

use crate::config::BoardGeometry;
use crate::puzzle::Grid;
use rayon::prelude::*;

/// A cell position as a 1-based (row, column) pair
pub type Cell = (usize, usize);

/// An ordered group of cells constrained to hold pairwise-distinct digits
pub type Subset = Vec<Cell>;

/// Sudoku rules engine
pub struct SudokuRules;

impl SudokuRules {
    /// Cells of one row, left to right
    pub fn row_cells(geometry: BoardGeometry, row: usize) -> Subset {
        (1..=geometry.side()).map(|col| (row, col)).collect()
    }

    /// Cells of one column, top to bottom
    pub fn column_cells(geometry: BoardGeometry, column: usize) -> Subset {
        (1..=geometry.side()).map(|row| (row, column)).collect()
    }

    /// Cells of one box, derived from its top-left origin by a fixed offset
    /// pattern (down the rows first, then across the columns)
    pub fn box_cells(geometry: BoardGeometry, origin_row: usize, origin_col: usize) -> Subset {
        let box_side = geometry.box_side();
        (0..geometry.digit_count())
            .map(|k| (origin_row + k % box_side, origin_col + k / box_side))
            .collect()
    }

    /// All row subsets, top to bottom
    pub fn rows(geometry: BoardGeometry) -> Vec<Subset> {
        (1..=geometry.side())
            .map(|row| Self::row_cells(geometry, row))
            .collect()
    }

    /// All column subsets, left to right
    pub fn columns(geometry: BoardGeometry) -> Vec<Subset> {
        (1..=geometry.side())
            .map(|column| Self::column_cells(geometry, column))
            .collect()
    }

    /// All box subsets, enumerated from the product of box-row and
    /// box-column origins
    pub fn boxes(geometry: BoardGeometry) -> Vec<Subset> {
        let origins = geometry.box_origins();
        let mut boxes = Vec::with_capacity(geometry.side());
        for &origin_row in &origins {
            for &origin_col in &origins {
                boxes.push(Self::box_cells(geometry, origin_row, origin_col));
            }
        }
        boxes
    }

    /// Every uniqueness subset on the board: rows, then columns, then boxes
    pub fn all_subsets(geometry: BoardGeometry) -> Vec<Subset> {
        let mut subsets = Self::rows(geometry);
        subsets.extend(Self::columns(geometry));
        subsets.extend(Self::boxes(geometry));
        subsets
    }

    /// Digits a grid holds at the given cells, in subset order
    pub fn subset_digits(grid: &Grid, subset: &[Cell]) -> Vec<u8> {
        subset
            .iter()
            .map(|&(row, col)| grid.get(row - 1, col - 1))
            .collect()
    }

    /// True if the digits are exactly 1..=side in some order
    pub fn is_permutation_of_digits(digits: &[u8], geometry: BoardGeometry) -> bool {
        let side = geometry.side();
        if digits.len() != side {
            return false;
        }

        let mut seen = vec![false; side + 1];
        for &digit in digits {
            if digit == 0 || digit as usize > side || seen[digit as usize] {
                return false;
            }
            seen[digit as usize] = true;
        }
        true
    }

    /// Check a completed grid against every row, column, and box.
    ///
    /// The subsets are independent, so they are checked in parallel.
    pub fn is_valid_solution(grid: &Grid) -> bool {
        if !grid.is_complete() {
            return false;
        }

        let geometry = grid.geometry();
        Self::all_subsets(geometry)
            .par_iter()
            .all(|subset| Self::is_permutation_of_digits(&Self::subset_digits(grid, subset), geometry))
    }

    /// True if every clue of the puzzle survives unchanged in the candidate
    pub fn preserves_clues(puzzle: &Grid, candidate: &Grid) -> bool {
        if puzzle.geometry() != candidate.geometry() {
            return false;
        }

        puzzle
            .clues()
            .into_iter()
            .all(|(row, col, digit)| candidate.get(row, col) == digit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_subset_counts() {
        let geometry = BoardGeometry::standard();
        assert_eq!(SudokuRules::rows(geometry).len(), 9);
        assert_eq!(SudokuRules::columns(geometry).len(), 9);
        assert_eq!(SudokuRules::boxes(geometry).len(), 9);

        let all = SudokuRules::all_subsets(geometry);
        assert_eq!(all.len(), 27);
        assert!(all.iter().all(|subset| subset.len() == 9));
    }

    #[test]
    fn test_boxes_partition_the_board() {
        let geometry = BoardGeometry::standard();
        let boxes = SudokuRules::boxes(geometry);

        let mut seen: HashSet<Cell> = HashSet::new();
        for subset in &boxes {
            for &cell in subset {
                // Pairwise disjoint: no cell may appear in two boxes
                assert!(seen.insert(cell), "cell {:?} appears in two boxes", cell);
            }
        }

        // Together the boxes cover all 81 cells exactly once
        assert_eq!(seen.len(), geometry.cell_count());
        for row in 1..=9 {
            for col in 1..=9 {
                assert!(seen.contains(&(row, col)));
            }
        }
    }

    #[test]
    fn test_rows_and_columns_cover_the_board() {
        let geometry = BoardGeometry::standard();

        for family in [SudokuRules::rows(geometry), SudokuRules::columns(geometry)] {
            let covered: HashSet<Cell> = family.into_iter().flatten().collect();
            assert_eq!(covered.len(), geometry.cell_count());
        }
    }

    #[test]
    fn test_box_cell_pattern() {
        let geometry = BoardGeometry::standard();
        let cells = SudokuRules::box_cells(geometry, 1, 1);
        assert_eq!(
            cells,
            vec![
                (1, 1),
                (2, 1),
                (3, 1),
                (1, 2),
                (2, 2),
                (3, 2),
                (1, 3),
                (2, 3),
                (3, 3),
            ]
        );
    }

    #[test]
    fn test_permutation_check() {
        let geometry = BoardGeometry::standard();

        assert!(SudokuRules::is_permutation_of_digits(
            &[9, 1, 8, 2, 7, 3, 6, 4, 5],
            geometry
        ));
        // Repeated digit
        assert!(!SudokuRules::is_permutation_of_digits(
            &[1, 2, 3, 4, 5, 6, 7, 8, 8],
            geometry
        ));
        // Unknown cell
        assert!(!SudokuRules::is_permutation_of_digits(
            &[1, 2, 3, 4, 0, 6, 7, 8, 9],
            geometry
        ));
        // Wrong length
        assert!(!SudokuRules::is_permutation_of_digits(&[1, 2, 3], geometry));
    }

    #[test]
    fn test_clue_preservation() {
        let geometry = BoardGeometry::standard();
        let mut puzzle = Grid::empty(geometry);
        puzzle.set(0, 1, 2);

        let mut candidate = Grid::empty(geometry);
        candidate.set(0, 1, 2);
        candidate.set(5, 5, 7);
        assert!(SudokuRules::preserves_clues(&puzzle, &candidate));

        candidate.set(0, 1, 3);
        assert!(!SudokuRules::preserves_clues(&puzzle, &candidate));
    }

    #[test]
    fn test_incomplete_grid_is_not_a_solution() {
        let grid = Grid::empty(BoardGeometry::standard());
        assert!(!SudokuRules::is_valid_solution(&grid));
    }
}
