//! Formula Abstract Syntax Tree types

use ripple_sheets_core::Position;
use std::fmt;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal
    Number(f64),

    /// Single cell reference
    ///
    /// An out-of-range reference parses into `Position::NONE` and evaluates
    /// to `#REF!`; it is not a syntax error.
    CellRef(Position),

    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },

    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

impl UnaryOperator {
    fn symbol(&self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Negate => '-',
        }
    }
}

const UNARY_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 4;

impl FormulaExpr {
    /// Collect every cell reference in the tree, in syntactic order
    pub fn collect_references(&self, refs: &mut Vec<Position>) {
        match self {
            FormulaExpr::Number(_) => {}
            FormulaExpr::CellRef(pos) => refs.push(*pos),
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.collect_references(refs);
                right.collect_references(refs);
            }
            FormulaExpr::UnaryOp { operand, .. } => operand.collect_references(refs),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            FormulaExpr::Number(_) | FormulaExpr::CellRef(_) => ATOM_PRECEDENCE,
            FormulaExpr::UnaryOp { .. } => UNARY_PRECEDENCE,
            FormulaExpr::BinaryOp { op, .. } => op.precedence(),
        }
    }

    // Canonical rendering: no whitespace, minimal parentheses. A child is
    // parenthesized only when dropping the parens would change how the text
    // re-parses: lower precedence than the parent, or equal precedence on
    // the right of a non-associative operator.
    fn write_expr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaExpr::Number(n) => write!(f, "{}", n),
            FormulaExpr::CellRef(pos) => write!(f, "{}", pos),
            FormulaExpr::UnaryOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                operand.write_child(f, operand.precedence() < UNARY_PRECEDENCE)
            }
            FormulaExpr::BinaryOp { op, left, right } => {
                left.write_child(f, left.precedence() < op.precedence())?;
                write!(f, "{}", op.symbol())?;
                let needs_parens = right.precedence() < op.precedence()
                    || (right.precedence() == op.precedence()
                        && matches!(op, BinaryOperator::Subtract | BinaryOperator::Divide));
                right.write_child(f, needs_parens)
            }
        }
    }

    fn write_child(&self, f: &mut fmt::Formatter<'_>, parenthesized: bool) -> fmt::Result {
        if parenthesized {
            write!(f, "(")?;
            self.write_expr(f)?;
            write!(f, ")")
        } else {
            self.write_expr(f)
        }
    }
}

impl fmt::Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_expr(f)
    }
}
