//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while parsing a formula
///
/// Evaluation never errors through this type; evaluation-time failures are
/// returned as typed [`CellError`](ripple_sheets_core::CellError) values.
#[derive(Debug, Error, PartialEq)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),
}
