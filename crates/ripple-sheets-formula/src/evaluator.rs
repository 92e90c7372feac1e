//! Formula evaluator
//!
//! Walks the AST and produces either a number or a typed [`CellError`].
//! Errors are values here, not exceptions: the first error encountered
//! short-circuits the rest of the expression and propagates outward.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::CellLookup;
use ripple_sheets_core::{CellError, CellValue};

pub(crate) fn evaluate_expr(
    expr: &FormulaExpr,
    lookup: &CellLookup<'_>,
) -> Result<f64, CellError> {
    match expr {
        FormulaExpr::Number(n) => Ok(*n),

        FormulaExpr::CellRef(pos) => {
            if !pos.is_valid() {
                return Err(CellError::Ref);
            }
            match lookup(*pos) {
                // Absent and empty cells coerce to zero
                None => Ok(0.0),
                Some(value) => coerce_to_number(&value),
            }
        }

        FormulaExpr::UnaryOp { op, operand } => {
            let value = evaluate_expr(operand, lookup)?;
            Ok(match op {
                UnaryOperator::Plus => value,
                UnaryOperator::Negate => -value,
            })
        }

        FormulaExpr::BinaryOp { op, left, right } => {
            let lhs = evaluate_expr(left, lookup)?;
            let rhs = evaluate_expr(right, lookup)?;
            match op {
                BinaryOperator::Add => Ok(lhs + rhs),
                BinaryOperator::Subtract => Ok(lhs - rhs),
                BinaryOperator::Multiply => Ok(lhs * rhs),
                BinaryOperator::Divide => {
                    if rhs == 0.0 {
                        Err(CellError::Div0)
                    } else {
                        Ok(lhs / rhs)
                    }
                }
            }
        }
    }
}

/// Coerce a cell value into an operand
///
/// Text must parse as a whole-string number (the empty string counts as
/// zero); errors propagate as-is.
pub(crate) fn coerce_to_number(value: &CellValue) -> Result<f64, CellError> {
    match value {
        CellValue::Number(n) => Ok(*n),
        CellValue::Text(s) => {
            if s.is_empty() {
                Ok(0.0)
            } else {
                s.parse::<f64>().map_err(|_| CellError::Value)
            }
        }
        CellValue::Error(e) => Err(*e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;
    use ripple_sheets_core::Position;

    fn eval(input: &str, lookup: &CellLookup<'_>) -> Result<f64, CellError> {
        evaluate_expr(&parse_expression(input).unwrap(), lookup)
    }

    fn no_cells(_: Position) -> Option<CellValue> {
        None
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("2+2", &no_cells), Ok(4.0));
        assert_eq!(eval("2+2*2", &no_cells), Ok(6.0));
        assert_eq!(eval("(2+2)*2", &no_cells), Ok(8.0));
        assert_eq!(eval("-3*2", &no_cells), Ok(-6.0));
        assert_eq!(eval("1/2", &no_cells), Ok(0.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1/0", &no_cells), Err(CellError::Div0));
        assert_eq!(eval("1/(1-1)", &no_cells), Err(CellError::Div0));
        // A reference to an absent cell coerces to zero
        assert_eq!(eval("5/A1", &no_cells), Err(CellError::Div0));
    }

    #[test]
    fn test_coercion() {
        let lookup = |pos: Position| match pos {
            p if p == Position::parse("A1") => Some(CellValue::text("12")),
            p if p == Position::parse("A2") => Some(CellValue::text("")),
            p if p == Position::parse("A3") => Some(CellValue::text("oops")),
            p if p == Position::parse("A4") => Some(CellValue::Number(2.5)),
            _ => None,
        };

        assert_eq!(eval("A1+1", &lookup), Ok(13.0));
        assert_eq!(eval("A2+1", &lookup), Ok(1.0));
        assert_eq!(eval("A3+1", &lookup), Err(CellError::Value));
        assert_eq!(eval("A4*2", &lookup), Ok(5.0));
        // Strict whole-string parse: no trailing garbage allowed
        assert_eq!(
            coerce_to_number(&CellValue::text("12abc")),
            Err(CellError::Value)
        );
    }

    #[test]
    fn test_error_propagation() {
        let lookup = |pos: Position| match pos {
            p if p == Position::parse("A1") => Some(CellValue::Error(CellError::Div0)),
            p if p == Position::parse("A2") => Some(CellValue::Error(CellError::Value)),
            _ => None,
        };

        assert_eq!(eval("A1+1", &lookup), Err(CellError::Div0));
        // Left operand's error wins
        assert_eq!(eval("A1+A2", &lookup), Err(CellError::Div0));
        assert_eq!(eval("A2+A1", &lookup), Err(CellError::Value));
    }

    #[test]
    fn test_invalid_reference() {
        // The reference is out of range regardless of sheet contents
        assert_eq!(eval("A99999+1", &no_cells), Err(CellError::Ref));
    }
}
