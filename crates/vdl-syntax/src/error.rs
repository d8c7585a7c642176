//! Parse-time errors.

use vdl_diagnostic::Position;

/// A syntax error, positioned as precisely as the lexer/parser state
/// allows. Callers that cannot recover a position fall back to
/// [`Position::start_of`] (line 1, column 1), per the resolver's
/// contract for `E005`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
