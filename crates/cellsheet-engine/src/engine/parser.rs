//! Precedence-climbing evaluator for arithmetic expressions.
//!
//! Grammar (left-associative, `*` `/` bind tighter than `+` `-`):
//!
//! ```text
//! expr  := unary (op unary)*
//! unary := ('+' | '-') unary | number | '(' expr ')'
//! ```
//!
//! The expression is evaluated while it is parsed; no tree is built.

use super::error::{FormulaError, Result};
use super::lexer::{Token, tokenize};

#[derive(Clone, Copy, Debug, PartialEq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn from_token(token: &Token) -> Option<BinaryOp> {
        match token {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64> {
        let value = match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => {
                if rhs == 0.0 {
                    return Err(FormulaError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        finite(value)
    }
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::NonFinite)
    }
}

/// Deepest allowed nesting of parentheses and unary signs.
pub const MAX_NESTING: usize = 256;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    fn expr(&mut self, min_prec: u8) -> Result<f64> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek().and_then(BinaryOp::from_token) {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.pos += 1;
            let rhs = self.expr(prec + 1)?;
            lhs = op.apply(lhs, rhs)?;
        }
        Ok(lhs)
    }

    /// Run `parse` one nesting level deeper, failing past `MAX_NESTING`.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Result<f64>) -> Result<f64> {
        if self.depth >= MAX_NESTING {
            return Err(FormulaError::TooDeep(MAX_NESTING));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn unary(&mut self) -> Result<f64> {
        match self.next() {
            Some(Token::Minus) => Ok(-self.nested(Self::unary)?),
            Some(Token::Plus) => self.nested(Self::unary),
            Some(Token::Number(n)) => finite(n),
            Some(Token::LParen) => self.nested(|p| {
                let value = p.expr(0)?;
                match p.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(FormulaError::UnexpectedToken(other.to_string())),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }),
            Some(other) => Err(FormulaError::UnexpectedToken(other.to_string())),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression over numbers, `+ - * /` and parentheses.
pub fn eval_arithmetic(src: &str) -> Result<f64> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr(0)?;
    if let Some(extra) = parser.peek() {
        return Err(FormulaError::UnexpectedToken(extra.to_string()));
    }
    Ok(value)
}
