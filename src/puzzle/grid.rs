//! Grid representation and utilities for Sudoku puzzles

use crate::config::BoardGeometry;
use crate::error::SudokuError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Sudoku board: digits 1 through 9, with 0 marking an unknown cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    geometry: BoardGeometry,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid with every cell unknown
    pub fn empty(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            cells: vec![0; geometry.cell_count()],
        }
    }

    /// Create a grid from a 2D digit matrix
    pub fn from_rows(rows: Vec<Vec<u8>>, geometry: BoardGeometry) -> Result<Self, SudokuError> {
        let side = geometry.side();

        if rows.len() != side {
            return Err(SudokuError::InvalidGridShape {
                expected: side,
                rows: rows.len(),
                cols: rows.first().map_or(0, Vec::len),
            });
        }

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != side {
                return Err(SudokuError::InvalidGridShape {
                    expected: side,
                    rows: rows.len(),
                    cols: row.len(),
                });
            }

            for (col_idx, &value) in row.iter().enumerate() {
                if value as usize > geometry.digit_count() {
                    return Err(SudokuError::InvalidDigit {
                        row: row_idx,
                        col: col_idx,
                        value,
                        max: geometry.digit_count(),
                    });
                }
            }
        }

        let cells: Vec<u8> = rows.into_iter().flatten().collect();

        Ok(Self { geometry, cells })
    }

    /// Board geometry this grid was built against
    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// Convert 2D coordinates to the flat cell index
    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.geometry.side() + col
    }

    /// Get the digit at (row, col); 0 means unknown.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(
            row < self.geometry.side() && col < self.geometry.side(),
            "coordinates ({}, {}) out of bounds for a {}x{} grid",
            row,
            col,
            self.geometry.side(),
            self.geometry.side()
        );
        self.cells[self.index(row, col)]
    }

    /// Set the digit at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board or the value exceeds
    /// the digit range.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        assert!(
            row < self.geometry.side() && col < self.geometry.side(),
            "coordinates ({}, {}) out of bounds",
            row,
            col
        );
        assert!(
            value as usize <= self.geometry.digit_count(),
            "digit {} out of range 0..={}",
            value,
            self.geometry.digit_count()
        );
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    /// All pre-filled cells as (row, col, digit) triples, row-major order
    pub fn clues(&self) -> Vec<(usize, usize, u8)> {
        let side = self.geometry.side();
        let mut clues = Vec::new();
        for row in 0..side {
            for col in 0..side {
                let value = self.get(row, col);
                if value != 0 {
                    clues.push((row, col, value));
                }
            }
        }
        clues
    }

    /// Number of pre-filled cells
    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Number of unknown cells
    pub fn unknown_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == 0).count()
    }

    /// True if every cell holds a digit
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&cell| cell != 0)
    }

    /// True if no cell holds a digit
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Copy the grid back into a 2D digit matrix
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.geometry.side())
            .map(|chunk| chunk.to_vec())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.geometry.side();
        let box_side = self.geometry.box_side();

        for row in 0..side {
            if row > 0 && row % box_side == 0 {
                let segment = "-".repeat(2 * box_side);
                writeln!(f, "{}", vec![segment; box_side].join("-+"))?;
            }
            for col in 0..side {
                if col > 0 && col % box_side == 0 {
                    write!(f, " |")?;
                }
                let value = self.get(row, col);
                if value == 0 {
                    write!(f, " .")?;
                } else {
                    write!(f, " {}", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty(BoardGeometry::standard());
        assert_eq!(grid.geometry().side(), 9);
        assert!(grid.is_empty());
        assert!(!grid.is_complete());
        assert_eq!(grid.clue_count(), 0);
        assert_eq!(grid.unknown_count(), 81);
    }

    #[test]
    fn test_grid_from_rows() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0][1] = 2;
        rows[4][4] = 4;

        let grid = Grid::from_rows(rows, BoardGeometry::standard()).unwrap();
        assert_eq!(grid.get(0, 1), 2);
        assert_eq!(grid.get(4, 4), 4);
        assert_eq!(grid.clue_count(), 2);
        assert_eq!(grid.clues(), vec![(0, 1, 2), (4, 4, 4)]);
    }

    #[test]
    fn test_wrong_row_count() {
        let rows = vec![vec![0u8; 9]; 8];
        let err = Grid::from_rows(rows, BoardGeometry::standard()).unwrap_err();
        assert!(matches!(
            err,
            SudokuError::InvalidGridShape {
                expected: 9,
                rows: 8,
                ..
            }
        ));
    }

    #[test]
    fn test_ragged_row() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[3] = vec![0u8; 7];
        let err = Grid::from_rows(rows, BoardGeometry::standard()).unwrap_err();
        assert!(matches!(err, SudokuError::InvalidGridShape { cols: 7, .. }));
    }

    #[test]
    fn test_digit_out_of_range() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[2][5] = 12;
        let err = Grid::from_rows(rows, BoardGeometry::standard()).unwrap_err();
        assert_eq!(
            err,
            SudokuError::InvalidDigit {
                row: 2,
                col: 5,
                value: 12,
                max: 9,
            }
        );
    }

    #[test]
    fn test_round_trip_rows() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[8][8] = 9;
        let grid = Grid::from_rows(rows.clone(), BoardGeometry::standard()).unwrap();
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_get() {
        let grid = Grid::empty(BoardGeometry::standard());
        grid.get(9, 0);
    }
}
