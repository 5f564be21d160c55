//! Backend module - Code generation

pub mod codegen;

// C++ Backend
pub mod cpp;

pub use codegen::CodeGen;
pub use cpp::CppCodeGen;
