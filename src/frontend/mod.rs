//! Frontend module - Lexer, Parser, AST

pub mod token;
pub mod lexer;
pub mod ast;
pub mod dump;
pub mod parser;
