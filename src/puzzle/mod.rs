//! Sudoku board core functionality

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::Grid;
pub use io::{create_example_puzzles, load_puzzle_from_file, save_grid_to_file};
pub use rules::{Cell, Subset, SudokuRules};
