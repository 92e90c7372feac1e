//! Formula parser
//!
//! A recursive descent parser for cell formulas with proper operator
//! precedence. The input is the formula body, without the leading `=`
//! marker (the engine strips the marker before parsing).

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use ripple_sheets_core::Position;

/// Parse a formula body into an AST
///
/// # Example
/// ```rust
/// use ripple_sheets_formula::parser::parse_expression;
///
/// let expr = parse_expression("1+2*3").unwrap();
/// let expr = parse_expression("A1/(B2-1)").unwrap();
/// ```
pub fn parse_expression(input: &str) -> FormulaResult<FormulaExpr> {
    let mut parser = FormulaParser::new(input)?;
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    match parser.current() {
        Token::Eof => Ok(expr),
        token => Err(FormulaError::Parse(format!(
            "Unexpected token after expression: {:?}",
            token
        ))),
    }
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    CellRef(Position),

    Plus,
    Minus,
    Star,
    Slash,

    LeftParen,
    RightParen,

    Eof,
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Token,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: Token::Eof,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> FormulaResult<()> {
        self.current_token = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            '+' => {
                self.advance();
                return Ok(Token::Plus);
            }
            '-' => {
                self.advance();
                return Ok(Token::Minus);
            }
            '*' => {
                self.advance();
                return Ok(Token::Star);
            }
            '/' => {
                self.advance();
                return Ok(Token::Slash);
            }
            '(' => {
                self.advance();
                return Ok(Token::LeftParen);
            }
            ')' => {
                self.advance();
                return Ok(Token::RightParen);
            }
            _ => {}
        }

        if c.is_ascii_digit() || c == '.' {
            return self.scan_number();
        }

        if c.is_ascii_uppercase() {
            return self.scan_cell_ref();
        }

        Err(FormulaError::Parse(format!(
            "Unexpected character '{}' at offset {}",
            c, self.pos
        )))
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Fractional part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                self.advance();
            }
            if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                return Err(FormulaError::Parse(format!(
                    "Malformed number '{}'",
                    &self.input[start..self.pos]
                )));
            }
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| FormulaError::Parse(format!("Malformed number '{}'", text)))
    }

    // Scan an A1-style reference: uppercase letters followed by digits.
    // An out-of-range reference is still a valid token; it carries
    // `Position::NONE` and surfaces as `#REF!` at evaluation time.
    fn scan_cell_ref(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self.peek_char().is_some_and(|c| c.is_ascii_uppercase()) {
            self.advance();
        }
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        if !text.bytes().any(|b| b.is_ascii_digit()) {
            return Err(FormulaError::Parse(format!(
                "Unexpected identifier '{}'",
                text
            )));
        }

        Ok(Token::CellRef(Position::parse(text)))
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn current(&self) -> &Token {
        &self.current_token
    }

    // === Grammar ===
    //
    // expression := term (('+' | '-') term)*
    // term       := factor (('*' | '/') factor)*
    // factor     := ('+' | '-') factor | primary
    // primary    := NUMBER | CELL_REF | '(' expression ')'

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            self.advance_token()?;
            let right = self.parse_term()?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.current() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };
            self.advance_token()?;
            let right = self.parse_factor()?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> FormulaResult<FormulaExpr> {
        let op = match self.current() {
            Token::Plus => Some(UnaryOperator::Plus),
            Token::Minus => Some(UnaryOperator::Negate),
            _ => None,
        };

        if let Some(op) = op {
            self.advance_token()?;
            let operand = self.parse_factor()?;
            return Ok(FormulaExpr::UnaryOp {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> FormulaResult<FormulaExpr> {
        match self.current().clone() {
            Token::Number(n) => {
                self.advance_token()?;
                Ok(FormulaExpr::Number(n))
            }
            Token::CellRef(pos) => {
                self.advance_token()?;
                Ok(FormulaExpr::CellRef(pos))
            }
            Token::LeftParen => {
                self.advance_token()?;
                let expr = self.parse_expression()?;
                if self.current() != &Token::RightParen {
                    return Err(FormulaError::Parse("Expected ')'".into()));
                }
                self.advance_token()?;
                Ok(expr)
            }
            Token::Eof => Err(FormulaError::Parse("Unexpected end of formula".into())),
            token => Err(FormulaError::Parse(format!(
                "Unexpected token: {:?}",
                token
            ))),
        }
    }
}
