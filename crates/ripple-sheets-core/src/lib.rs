//! # ripple-sheets-core
//!
//! Core data types for the ripple-sheets spreadsheet engine.
//!
//! This crate provides the leaf types shared by the formula and engine
//! crates:
//! - [`Position`] and [`Size`] - cell coordinates and printable extents
//! - [`CellValue`] and [`CellError`] - evaluation results (text, numbers,
//!   typed formula errors)
//! - [`Error`] - the error taxonomy surfaced by sheet mutations
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets_core::{CellValue, Position};
//!
//! let pos = Position::parse("B12");
//! assert!(pos.is_valid());
//! assert_eq!(pos.to_a1_string(), "B12");
//!
//! let value = CellValue::Number(42.0);
//! assert_eq!(value.to_string(), "42");
//! ```

pub mod error;
pub mod position;
pub mod value;

// Re-exports for convenience
pub use error::{Error, Result};
pub use position::{Position, Size};
pub use value::{CellError, CellValue};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: i32 = 16_384;

/// Maximum number of columns in a sheet
pub const MAX_COLS: i32 = 16_384;
