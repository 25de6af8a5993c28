//! Typed error enum for the Sudoku SAT pipeline.
//!
//! Construction and decoding failures surface as [`SudokuError`]; it
//! implements [`std::error::Error`] so it composes with `anyhow` while
//! still being matchable by callers that want to react to a specific
//! failure.

use thiserror::Error;

/// Errors raised while building, encoding, or decoding a Sudoku puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SudokuError {
    /// The supplied rows do not form a square board of the expected size.
    #[error("invalid grid shape: expected {expected}x{expected}, got {rows} rows / {cols} cols")]
    InvalidGridShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    /// A cell holds a digit outside the legal range for the geometry.
    #[error("invalid digit {value} at (row {row}, col {col}); max allowed is {max}")]
    InvalidDigit {
        row: usize,
        col: usize,
        value: u8,
        max: usize,
    },

    /// The SAT solver proved the formula unsatisfiable.
    #[error("puzzle is unsolvable")]
    Unsolvable,

    /// The solver model had no positive digit literal for a cell.
    #[error("failed to decode a digit for cell (row {row}, col {col})")]
    DecodeFailure { row: usize, col: usize },
}
