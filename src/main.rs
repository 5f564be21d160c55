//! PEBKAC Compiler
//!
//! Transpiles PEBKAC source to C++.

mod frontend;
mod backend;
mod utils;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use backend::{CodeGen, CppCodeGen};
use frontend::dump::Dump;
use frontend::lexer;
use frontend::parser::Parser as PebkacParser;

/// PEBKAC Compiler
#[derive(Parser, Debug)]
#[command(name = "pebkacc")]
#[command(version = "0.1.0")]
#[command(about = "PEBKAC compiler - transpiles PEBKAC source to C++")]
struct Cli {
    /// Input source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// What to print
    #[arg(value_enum, value_name = "MODE")]
    mode: OutputMode,
}

/// Artifact printed on success
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputMode {
    /// Token stream as JSON
    Tokens,
    /// Syntax tree as JSON
    Ast,
    /// Generated C++ source
    Cpp,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match compile_file(&cli.input, cli.mode) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Read a source file and run the pipeline on it
fn compile_file(input: &Path, mode: OutputMode) -> anyhow::Result<String> {
    log::info!("compiling {} ({:?})", input.display(), mode);

    let source = fs::read_to_string(input)
        .with_context(|| format!("could not read {}", input.display()))?;

    compile(&source, mode)
}

/// Run the pipeline up to the stage `mode` asks for
fn compile(source: &str, mode: OutputMode) -> anyhow::Result<String> {
    // 1. Lexer -> Tokens
    let tokens = lexer::tokenize(source);
    if mode == OutputMode::Tokens {
        return Ok(serde_json::to_string_pretty(&tokens.dump())?);
    }

    // 2. Parser -> AST
    let mut parser = PebkacParser::from_tokens(tokens);
    let program = parser.parse_program().context("parse error")?;
    if mode == OutputMode::Ast {
        return Ok(serde_json::to_string_pretty(&program.dump())?);
    }

    // 3. Code Generation
    let mut codegen = CppCodeGen::new();
    log::debug!("running {} backend", codegen.name());
    Ok(codegen.generate(&program))
}
