//! Configuration management for the Sudoku SAT solver

pub mod settings;

pub use settings::{
    BoardGeometry, CliOverrides, EncodingConfig, InputConfig, OutputConfig, OutputFormat, Settings,
    SolverBackend, SolverConfig,
};
