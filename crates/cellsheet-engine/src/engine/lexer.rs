//! Tokenizer for the arithmetic expression language.
//!
//! The only tokens are non-negative number literals, `+ - * /` and
//! parentheses. Whitespace separates tokens and is otherwise ignored.

use std::fmt;

use super::error::{FormulaError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            ' ' | '\t' => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' | '.' => {
                let mut end = start + c.len_utf8();
                while let Some(&(idx, next)) = chars.peek() {
                    if !(next.is_ascii_digit() || next == '.') {
                        break;
                    }
                    end = idx + next.len_utf8();
                    chars.next();
                }
                let literal = &src[start..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidNumber(literal.to_string()))?;
                Token::Number(value)
            }
            other => return Err(FormulaError::UnexpectedChar(other)),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_expression() {
        assert_eq!(
            tokenize("(1.5 + 2)*3").unwrap(),
            vec![
                Token::LParen,
                Token::Number(1.5),
                Token::Plus,
                Token::Number(2.0),
                Token::RParen,
                Token::Star,
                Token::Number(3.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_bare_decimal_forms() {
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("5.").unwrap(), vec![Token::Number(5.0)]);
    }

    #[test]
    fn test_tokenize_rejects_bad_literals() {
        assert_eq!(
            tokenize("1.2.3"),
            Err(FormulaError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(tokenize("."), Err(FormulaError::InvalidNumber(".".to_string())));
    }

    #[test]
    fn test_tokenize_rejects_identifiers() {
        assert_eq!(tokenize("1+a"), Err(FormulaError::UnexpectedChar('a')));
    }
}
