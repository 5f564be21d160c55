//! Error handling for PEBKAC

use crate::frontend::token::TokenKind;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Compiler error
///
/// Tokenization never fails and code generation is total over the AST, so
/// every variant here comes out of the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ==================== Parser Errors ====================

    #[error("End of token stream reached")]
    EndOfInput,

    #[error("Unexpected token type: expected {expected}, got {got}")]
    UnexpectedTokenKind {
        expected: TokenKind,
        got: TokenKind,
    },

    #[error("Unexpected token: expected \"{expected}\", got \"{got}\"")]
    UnexpectedTokenValue {
        expected: String,
        got: String,
    },

    #[error("Malformed expression")]
    MalformedExpression,

    #[error("Postfix operator detected")]
    PostfixOperator,

    #[error("Invalid numeric literal: {0}")]
    InvalidNumericLiteral(String),
}

impl Error {
    /// True for errors raised by the expression scan itself rather than by a
    /// mismatched token.
    pub fn is_malformed_expression(&self) -> bool {
        matches!(self, Self::MalformedExpression | Self::PostfixOperator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::UnexpectedTokenKind {
            expected: TokenKind::Identifier,
            got: TokenKind::Bracket,
        };
        assert_eq!(err.to_string(), "Unexpected token type: expected IDENTIFIER, got BRACKET");

        let err = Error::UnexpectedTokenValue {
            expected: ";".to_string(),
            got: ")".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected token: expected \";\", got \")\"");
    }

    #[test]
    fn test_malformed_classification() {
        assert!(Error::PostfixOperator.is_malformed_expression());
        assert!(Error::MalformedExpression.is_malformed_expression());
        assert!(!Error::EndOfInput.is_malformed_expression());
    }
}
