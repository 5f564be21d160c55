//! Token definitions for PEBKAC
#![allow(dead_code)]

use std::fmt;

use serde::Serialize;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(rename = "value")]
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    /// Check both kind and text
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.text)
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// `// ...` or `/* ... */`
    Comment,
    /// `12`, `3.5`
    NumericLiteral,
    /// `true`, `false`
    BooleanLiteral,
    Identifier,
    /// `+`, `==`, `&&`, `!`, ...
    Operator,
    /// `fun`, `io`, `return`, `let`, `if`, `else`
    Keyword,
    /// `(`, `)`, `{`, `}`, `[`, `]`
    Bracket,
    /// `->`, `:`, `;`, `=`, `,`
    SyntacticElement,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::NumericLiteral => "NUMERIC_LITERAL",
            TokenKind::BooleanLiteral => "BOOLEAN_LITERAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Bracket => "BRACKET",
            TokenKind::SyntacticElement => "SYNTACTIC_ELEMENT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Token::new(TokenKind::Keyword, "let"), Token::new(TokenKind::Keyword, "let"));
        assert_ne!(Token::new(TokenKind::Keyword, "let"), Token::new(TokenKind::Identifier, "let"));
        assert!(Token::new(TokenKind::Bracket, "{").is(TokenKind::Bracket, "{"));
    }

    #[test]
    fn test_serialize_kind_names() {
        let json = serde_json::to_string(&Token::new(TokenKind::SyntacticElement, "->")).unwrap();
        assert_eq!(json, r#"{"type":"SYNTACTIC_ELEMENT","value":"->"}"#);
    }
}
