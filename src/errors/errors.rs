use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedChar { .. } => "UnexpectedChar",
            ErrorImpl::InputError { .. } => "InputError",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidBinaryNumber { .. } => "InvalidBinaryNumber",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::UnclosedComment => "UnclosedComment",
            ErrorImpl::UnterminatedQuote => "UnterminatedQuote",
            ErrorImpl::UnbalancedExpression => "UnbalancedExpression",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedChar { .. } => ErrorTip::None,
            ErrorImpl::InputError { path } => {
                ErrorTip::Suggestion(format!("Could not open `{}` for reading", path))
            }
            ErrorImpl::NumberParseError { literal } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                literal
            )),
            ErrorImpl::InvalidBinaryNumber { literal } => ErrorTip::Suggestion(format!(
                "`{}` is not a valid binary number, only the digits 0 and 1 are allowed",
                literal
            )),
            ErrorImpl::InvalidOperator { op } => {
                ErrorTip::Suggestion(format!("The operator `{}` is not valid", op))
            }
            ErrorImpl::UnclosedComment => ErrorTip::Suggestion(String::from(
                "You did not close this multiline comment",
            )),
            ErrorImpl::UnterminatedQuote => ErrorTip::Suggestion(String::from(
                "You opened a quote ' but did not close it with a ' character",
            )),
            ErrorImpl::UnbalancedExpression => ErrorTip::Suggestion(String::from(
                "You closed an expression that you never opened",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unexpected character: {c:?}")]
    UnexpectedChar { c: char },
    #[error("could not read input file: {path:?}")]
    InputError { path: String },
    #[error("error parsing number: {literal:?}")]
    NumberParseError { literal: String },
    #[error("invalid binary number: {literal:?}")]
    InvalidBinaryNumber { literal: String },
    #[error("invalid operator: {op:?}")]
    InvalidOperator { op: String },
    #[error("multiline comment was never closed")]
    UnclosedComment,
    #[error("quote was never closed")]
    UnterminatedQuote,
    #[error("closed an expression that was never opened")]
    UnbalancedExpression,
}
