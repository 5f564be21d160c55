//! Code Generation trait - Backend abstraction
//!
//! A backend turns a parsed program into target-language source text.

use crate::frontend::ast::Program;

/// Code generation backend trait
pub trait CodeGen {
    /// Generate target source code from a program
    fn generate(&mut self, program: &Program) -> String;

    /// Get the backend name
    fn name(&self) -> &str;
}
