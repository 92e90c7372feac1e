//! # ripple-sheets-formula
//!
//! Formula parser and evaluator for ripple-sheets.
//!
//! This crate provides:
//! - Formula parsing (text → AST): f64 literals, A1-style cell references,
//!   `+ - * /`, unary sign, parentheses
//! - Canonical re-rendering (whitespace normalized, minimal parentheses)
//! - Evaluation against a caller-provided cell lookup
//!
//! The engine consumes formulas exclusively through [`Formula`]: parse,
//! evaluate, render, list references. Evaluation never panics and never
//! escapes as an `Err`; failures surface as typed
//! [`CellError`](ripple_sheets_core::CellError) values.
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets_formula::Formula;
//!
//! let formula = Formula::parse("B2 * (1 + 2)").unwrap();
//! assert_eq!(formula.expression(), "B2*(1+2)");
//!
//! // Absent cells evaluate as zero
//! let value = formula.evaluate(&|_pos| None);
//! assert_eq!(value.as_number(), Some(0.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};

use ripple_sheets_core::{CellValue, Position};

/// Cell lookup callback used during evaluation
///
/// `None` means the position holds no cell (or an empty one); the evaluator
/// coerces it to zero.
pub type CellLookup<'a> = dyn Fn(Position) -> Option<CellValue> + 'a;

/// A parsed formula
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expr: FormulaExpr,
}

impl Formula {
    /// Parse a formula body (without the leading `=` marker)
    pub fn parse(expression: &str) -> FormulaResult<Formula> {
        Ok(Formula {
            expr: parser::parse_expression(expression)?,
        })
    }

    /// Evaluate against a cell lookup
    ///
    /// Returns [`CellValue::Number`] or [`CellValue::Error`], never text.
    pub fn evaluate(&self, lookup: &CellLookup<'_>) -> CellValue {
        match evaluator::evaluate_expr(&self.expr, lookup) {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::Error(e),
        }
    }

    /// Canonical rendering of the formula body
    ///
    /// Not necessarily byte-identical to the parsed text: whitespace is
    /// dropped and redundant parentheses are removed.
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }

    /// Valid positions this formula reads, deduplicated and in row-major
    /// order
    pub fn referenced_cells(&self) -> Vec<Position> {
        let mut refs = Vec::new();
        self.expr.collect_references(&mut refs);
        refs.retain(Position::is_valid);
        refs.sort();
        refs.dedup();
        refs
    }
}
