//! # ripple-sheets
//!
//! A reactive spreadsheet engine: a sparse growable grid of cells with
//! dependency tracking, pre-commit circular-reference detection, and lazy
//! memoized recalculation.
//!
//! Edits rewire a bidirectional dependency graph and invalidate exactly the
//! cells whose result could have changed; reads recompute on demand and
//! cache the result. Formula errors (`#REF!`, `#VALUE!`, `#DIV/0!`) are
//! ordinary cell values that propagate through dependents - only bad input
//! (invalid position, formula syntax, would-be cycle) is reported as an
//! `Err`.
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! sheet.set_cell(Position::parse("B1"), "2").unwrap();
//! sheet.set_cell(Position::parse("A1"), "=B1*10").unwrap();
//! assert_eq!(
//!     sheet.get_cell(Position::parse("A1")).unwrap().value(),
//!     CellValue::Number(20.0)
//! );
//!
//! // Editing B1 invalidates A1 without touching it
//! sheet.set_cell(Position::parse("B1"), "3").unwrap();
//! assert_eq!(
//!     sheet.get_cell(Position::parse("A1")).unwrap().value(),
//!     CellValue::Number(30.0)
//! );
//! ```

mod cell;
pub mod prelude;
pub mod sheet;

pub use cell::{ESCAPE_MARKER, FORMULA_MARKER};
pub use sheet::{CellRef, Sheet};

// Re-export core types
pub use ripple_sheets_core::{
    CellError, CellValue, Error, Position, Result, Size, MAX_COLS, MAX_ROWS,
};

// Re-export formula types
pub use ripple_sheets_formula::{Formula, FormulaError, FormulaResult};
