//! Error types for ripple-sheets-core

use crate::position::Position;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by sheet mutations
///
/// All three variants are raised before any state is mutated: a failed
/// `set_cell` or `clear_cell` leaves the sheet exactly as it was.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Coordinate outside the supported grid bounds
    #[error("Invalid position ({}, {})", .0.row, .0.col)]
    InvalidPosition(Position),

    /// Formula text failed to parse into an expression
    #[error("Formula syntax error: {0}")]
    FormulaSyntax(String),

    /// Committing the edit would create a reference cycle
    #[error("Circular dependency involving cell {0}")]
    CircularDependency(Position),
}
