//! C++ Backend - Generate C++ source from the PEBKAC AST
//!
//! The output is plain C++11 that any C++ compiler accepts.

mod cpp_codegen;

pub use cpp_codegen::{CppCodeGen, PRELUDE};
