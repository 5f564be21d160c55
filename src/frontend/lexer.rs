//! Lexer for PEBKAC
//!
//! Converts source code into a stream of tokens.
//!
//! Every lexical pattern is tried at each position of the remaining input.
//! The earliest match wins; ties on position go to the longest match, and
//! remaining ties go to the pattern declared last in [`PATTERNS`]. That last
//! rule is what makes `let` a keyword and `42` a numeric literal even though
//! the identifier pattern matches both with the same length.
//!
//! Input that no pattern can match (whitespace, stray characters) is skipped.
//! Once nothing in the rest of the input matches, tokenization stops.
#![allow(dead_code)]

use once_cell::sync::Lazy;

use crate::frontend::token::{Token, TokenKind};

/// Anchored matcher: byte length of the match at the start of the input
type Matcher = fn(&str) -> Option<usize>;

/// One entry of the lexical pattern table
struct Pattern {
    kind: TokenKind,
    matcher: Matcher,
}

/// Pattern table, in declaration (priority) order
static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        Pattern { kind: TokenKind::Comment, matcher: match_comment },
        Pattern { kind: TokenKind::Identifier, matcher: match_identifier },
        Pattern { kind: TokenKind::Operator, matcher: match_operator },
        Pattern { kind: TokenKind::Keyword, matcher: match_keyword },
        Pattern { kind: TokenKind::Bracket, matcher: match_bracket },
        Pattern { kind: TokenKind::SyntacticElement, matcher: match_syntactic_element },
        Pattern { kind: TokenKind::NumericLiteral, matcher: match_numeric_literal },
    ]
});

const KEYWORDS: [&str; 8] = ["fun", "io", "return", "let", "if", "else", "true", "false"];
const OPERATORS: [&str; 6] = ["!=", "==", "<=", ">=", "&&", "||"];
const SINGLE_OPERATORS: &str = "+-*/%<>!";
const BRACKETS: &str = "(){}[]";
const SYNTACTIC_ELEMENTS: [&str; 5] = ["->", ":", ";", "=", ","];

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn word_len(s: &str) -> usize {
    s.bytes().take_while(|&b| is_word_byte(b)).count()
}

fn digit_len(s: &str) -> usize {
    s.bytes().take_while(|b| b.is_ascii_digit()).count()
}

fn match_comment(s: &str) -> Option<usize> {
    if s.starts_with("//") {
        Some(s.find(|c: char| c == '\n' || c == '\r').unwrap_or(s.len()))
    } else if let Some(body) = s.strip_prefix("/*") {
        body.find("*/").map(|end| end + 4)
    } else {
        None
    }
}

fn match_identifier(s: &str) -> Option<usize> {
    Some(word_len(s)).filter(|&len| len > 0)
}

fn match_operator(s: &str) -> Option<usize> {
    if OPERATORS.iter().any(|op| s.starts_with(op)) {
        return Some(2);
    }
    s.chars()
        .next()
        .filter(|c| SINGLE_OPERATORS.contains(*c))
        .map(|_| 1)
}

fn match_keyword(s: &str) -> Option<usize> {
    KEYWORDS
        .iter()
        .find(|kw| {
            s.starts_with(*kw) && !s.as_bytes().get(kw.len()).copied().map_or(false, is_word_byte)
        })
        .map(|kw| kw.len())
}

fn match_bracket(s: &str) -> Option<usize> {
    s.chars().next().filter(|c| BRACKETS.contains(*c)).map(|_| 1)
}

fn match_syntactic_element(s: &str) -> Option<usize> {
    SYNTACTIC_ELEMENTS
        .iter()
        .find(|el| s.starts_with(*el))
        .map(|el| el.len())
}

/// `\d*\.?\d+`
fn match_numeric_literal(s: &str) -> Option<usize> {
    let int_len = digit_len(s);
    let rest = &s[int_len..];
    if let Some(frac) = rest.strip_prefix('.') {
        let frac_len = digit_len(frac);
        if frac_len > 0 {
            return Some(int_len + 1 + frac_len);
        }
    }
    Some(int_len).filter(|&len| len > 0)
}

/// The lexer state
pub struct Lexer<'a> {
    /// Source code
    source: &'a str,
    /// Current byte position in source
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Best match starting exactly at `start`: (pattern index, length)
    fn match_at(&self, start: usize) -> Option<(usize, usize)> {
        let rest = &self.source[start..];
        let mut best: Option<(usize, usize)> = None;
        for (index, pattern) in PATTERNS.iter().enumerate() {
            if let Some(len) = (pattern.matcher)(rest) {
                // `>=`: later patterns win ties
                if best.map_or(true, |(_, best_len)| len >= best_len) {
                    best = Some((index, len));
                }
            }
        }
        best
    }

    /// Get the next token, or `None` when nothing else matches
    pub fn next_token(&mut self) -> Option<Token> {
        let (start, (index, len)) = self.source[self.pos..]
            .char_indices()
            .map(|(offset, _)| self.pos + offset)
            .find_map(|start| self.match_at(start).map(|m| (start, m)))?;

        let text = &self.source[start..start + len];
        self.pos = start + len;

        let kind = match PATTERNS[index].kind {
            TokenKind::Keyword if text == "true" || text == "false" => TokenKind::BooleanLiteral,
            kind => kind,
        };
        log::trace!("token {} {:?} at {}", kind, text, start);
        Some(Token::new(kind, text))
    }

    /// Tokenize the remaining input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Byte offset where tokenization stopped (or will resume)
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Split source code into tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    let tokens = Lexer::new(source).tokenize();
    log::debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(
            kinds("1+2"),
            vec![
                tok(TokenKind::NumericLiteral, "1"),
                tok(TokenKind::Operator, "+"),
                tok(TokenKind::NumericLiteral, "2"),
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("let letter fun io iota return"),
            vec![
                tok(TokenKind::Keyword, "let"),
                tok(TokenKind::Identifier, "letter"),
                tok(TokenKind::Keyword, "fun"),
                tok(TokenKind::Keyword, "io"),
                tok(TokenKind::Identifier, "iota"),
                tok(TokenKind::Keyword, "return"),
            ]
        );
    }

    #[test]
    fn test_boolean_literals() {
        assert_eq!(
            kinds("true false truest"),
            vec![
                tok(TokenKind::BooleanLiteral, "true"),
                tok(TokenKind::BooleanLiteral, "false"),
                tok(TokenKind::Identifier, "truest"),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 3.14 .5 1."),
            vec![
                tok(TokenKind::NumericLiteral, "42"),
                tok(TokenKind::NumericLiteral, "3.14"),
                tok(TokenKind::NumericLiteral, ".5"),
                tok(TokenKind::NumericLiteral, "1"),
            ]
        );
        // longer identifier match beats the numeric prefix
        assert_eq!(kinds("123abc"), vec![tok(TokenKind::Identifier, "123abc")]);
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(
            kinds("a == b != c <= d >= e && f || !g -> = < >"),
            vec![
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Operator, "=="),
                tok(TokenKind::Identifier, "b"),
                tok(TokenKind::Operator, "!="),
                tok(TokenKind::Identifier, "c"),
                tok(TokenKind::Operator, "<="),
                tok(TokenKind::Identifier, "d"),
                tok(TokenKind::Operator, ">="),
                tok(TokenKind::Identifier, "e"),
                tok(TokenKind::Operator, "&&"),
                tok(TokenKind::Identifier, "f"),
                tok(TokenKind::Operator, "||"),
                tok(TokenKind::Operator, "!"),
                tok(TokenKind::Identifier, "g"),
                tok(TokenKind::SyntacticElement, "->"),
                tok(TokenKind::SyntacticElement, "="),
                tok(TokenKind::Operator, "<"),
                tok(TokenKind::Operator, ">"),
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("// comment\nlet x"),
            vec![
                tok(TokenKind::Comment, "// comment"),
                tok(TokenKind::Keyword, "let"),
                tok(TokenKind::Identifier, "x"),
            ]
        );
        assert_eq!(
            kinds("a /* b\n c */ / d"),
            vec![
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Comment, "/* b\n c */"),
                tok(TokenKind::Operator, "/"),
                tok(TokenKind::Identifier, "d"),
            ]
        );
    }

    #[test]
    fn test_brackets_and_punctuation() {
        assert_eq!(
            kinds("f(a, b): [x]{}"),
            vec![
                tok(TokenKind::Identifier, "f"),
                tok(TokenKind::Bracket, "("),
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::SyntacticElement, ","),
                tok(TokenKind::Identifier, "b"),
                tok(TokenKind::Bracket, ")"),
                tok(TokenKind::SyntacticElement, ":"),
                tok(TokenKind::Bracket, "["),
                tok(TokenKind::Identifier, "x"),
                tok(TokenKind::Bracket, "]"),
                tok(TokenKind::Bracket, "{"),
                tok(TokenKind::Bracket, "}"),
            ]
        );
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        assert_eq!(
            kinds("a @ b"),
            vec![tok(TokenKind::Identifier, "a"), tok(TokenKind::Identifier, "b")]
        );
    }

    #[test]
    fn test_stops_when_nothing_matches() {
        let mut lexer = Lexer::new("x @#$");
        let tokens = lexer.tokenize();
        assert_eq!(tokens, vec![Token::new(TokenKind::Identifier, "x")]);
        assert_eq!(lexer.position(), 1);
    }
}
