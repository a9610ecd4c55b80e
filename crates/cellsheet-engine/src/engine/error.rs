//! Formula evaluation errors.
//!
//! These never reach the workbook: the evaluator turns every one of them into
//! the `#ERROR!` marker.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,

    #[error("invalid cell reference '{0}'")]
    InvalidReference(String),

    #[error("invalid range '{0}'")]
    InvalidRange(String),

    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

pub type Result<T> = std::result::Result<T, FormulaError>;
