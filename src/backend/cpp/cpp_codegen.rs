//! C++ Code Generator
//!
//! Translates the PEBKAC AST to C++ source. Each node variant maps to exactly
//! one textual rule, so generation cannot fail.

use crate::backend::codegen::CodeGen;
use crate::frontend::ast::*;

/// Fixed header of every generated file
pub const PRELUDE: &str = "#include <iostream>\n\
#include <functional>\n\
\n\
typedef long long integer;\n\
typedef bool boolean;\n\
void print(long long n)\n\
{\n\
\tstd::cout << n << std::endl;\n\
}\n\
\n";

/// Native integer type; emitted without the `const` qualifier
const NATIVE_INT: &str = "int";

/// C++ code generator
pub struct CppCodeGen {
    output: String,
}

impl CppCodeGen {
    pub fn new() -> Self {
        Self { output: String::new() }
    }

    /// Generate each item with `indent` in front and `separator` between
    /// items (the separator is skipped while nothing has been emitted yet).
    fn join<T>(&self, items: &[T], indent: &str, separator: &str, gen: impl Fn(&Self, &T) -> String) -> String {
        let mut result = String::new();
        for item in items {
            let separator = if result.is_empty() { "" } else { separator };
            let text = gen(self, item);
            result.push_str(indent);
            result.push_str(separator);
            result.push_str(&text);
        }
        result
    }

    /// Convert a type annotation to C++; `None` means inferred
    fn type_to_cpp(&self, ty: Option<&Type>) -> String {
        match ty {
            None => "const auto".to_string(),
            Some(Type::Identifier(ident)) if ident.name == NATIVE_INT => ident.name.clone(),
            Some(Type::Identifier(ident)) => format!("const {}", ident.name),
            Some(Type::Function(func)) => format!(
                "const std::function<{}({})>",
                self.type_to_cpp(Some(func.return_type.as_ref())),
                self.join(&func.parameters, "", ", ", |gen, ty| gen.type_to_cpp(Some(ty)))
            ),
        }
    }

    fn param_to_cpp(&self, param: &Param) -> String {
        let mut text = format!("{}& {}", self.type_to_cpp(Some(&param.ty)), param.name.name);
        if let Some(default) = &param.default_value {
            text.push_str(" = ");
            text.push_str(&self.expr_to_cpp(default));
        }
        text
    }

    fn params_to_cpp(&self, params: &[Param]) -> String {
        self.join(params, "", ", ", Self::param_to_cpp)
    }

    /// Convert an expression to C++
    fn expr_to_cpp(&self, expr: &Expr) -> String {
        match expr {
            Expr::Identifier(ident) => ident.name.clone(),
            Expr::NumericLiteral(value) => value.to_string(),
            Expr::BooleanLiteral(value) => value.to_string(),
            Expr::Group(inner) => format!("({})", self.expr_to_cpp(inner)),
            Expr::Unary { op, operand } => format!("{}{}", op.symbol(), self.expr_to_cpp(operand)),
            Expr::Binary { op, lhs, rhs } => format!(
                "{}{}{}",
                self.expr_to_cpp(lhs),
                op.symbol(),
                self.expr_to_cpp(rhs)
            ),
            Expr::Conditional { condition, value_true, value_false } => format!(
                "({}?({}):({}))",
                self.expr_to_cpp(condition),
                self.expr_to_cpp(value_true),
                self.expr_to_cpp(value_false)
            ),
            Expr::Lambda { parameters, statements } => format!(
                "[&]({}){{{}\n}}",
                self.params_to_cpp(parameters),
                self.join(statements, "\n\t", "", Self::stmt_to_cpp)
            ),
            Expr::Call { callee, arguments } => format!(
                "{}({})",
                self.expr_to_cpp(callee),
                self.join(arguments, "", ", ", Self::expr_to_cpp)
            ),
        }
    }

    fn block_to_cpp(&self, block: &Block) -> String {
        format!("\n{{{}\n}}", self.join(&block.statements, "\n\t", "", Self::stmt_to_cpp))
    }

    /// Convert a statement to C++
    fn stmt_to_cpp(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Function(func) => format!(
                "{} {}({}){}",
                self.type_to_cpp(Some(&func.return_type)),
                func.name.name,
                self.params_to_cpp(&func.parameters),
                self.block_to_cpp(&func.body)
            ),
            Stmt::Let(binding) => format!(
                "{} {} = {};",
                self.type_to_cpp(binding.ty.as_ref()),
                binding.name.name,
                self.expr_to_cpp(&binding.value)
            ),
            Stmt::Conditional { condition, branch_true, branch_false } => {
                let mut text = format!(
                    "if ({}) {}",
                    self.expr_to_cpp(condition),
                    self.stmt_to_cpp(branch_true)
                );
                if let Some(branch_false) = branch_false {
                    text.push_str(" else ");
                    text.push_str(&self.stmt_to_cpp(branch_false));
                }
                text
            }
            Stmt::Return(value) => format!("return {};", self.expr_to_cpp(value)),
            Stmt::Empty => String::new(),
            Stmt::Expr(expr) => format!("{};", self.expr_to_cpp(expr)),
            Stmt::Block(block) => self.block_to_cpp(block),
        }
    }
}

impl Default for CppCodeGen {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGen for CppCodeGen {
    fn generate(&mut self, program: &Program) -> String {
        self.output.clear();
        self.output.push_str(PRELUDE);

        for stmt in &program.statements {
            let text = self.stmt_to_cpp(stmt);
            self.output.push_str(&text);
            self.output.push_str("\n\n");
        }

        log::debug!("generated {} bytes of C++", self.output.len());
        std::mem::take(&mut self.output)
    }

    fn name(&self) -> &str {
        "cpp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::parse;
    use pretty_assertions::assert_eq;

    fn generate(source: &str) -> String {
        let program = parse(source).expect("parse failed");
        CppCodeGen::new().generate(&program)
    }

    /// Generated text for the statements, without the prelude
    fn body(source: &str) -> String {
        let output = generate(source);
        assert!(output.starts_with(PRELUDE));
        output[PRELUDE.len()..].to_string()
    }

    #[test]
    fn test_empty_program_is_prelude() {
        let output = generate("");
        assert_eq!(output, PRELUDE);
        assert!(output.contains("typedef long long integer;"));
        assert!(output.contains("void print(long long n)"));
    }

    #[test]
    fn test_let() {
        assert_eq!(body("let x : int = 1 + 2 * 3;"), "int x = 1+2*3;\n\n");
        assert_eq!(body("let b : boolean = !true;"), "const boolean b = !true;\n\n");
        assert_eq!(body("let n = 7;"), "const auto n = 7;\n\n");
    }

    #[test]
    fn test_function_sugar() {
        assert_eq!(body("fun f(): int = 5;"), "int f()\n{\n\treturn 5;\n}\n\n");
    }

    #[test]
    fn test_function_with_parameters() {
        assert_eq!(
            body("io fun g(a: int = 3, b: boolean): int { if (b) { return a; } return 0; }"),
            "int g(int& a = 3, const boolean& b)\n{\n\tif (b) \n{\n\treturn a;\n}\n\treturn 0;\n}\n\n"
        );
    }

    #[test]
    fn test_function_type_and_lambda() {
        assert_eq!(
            body("let f : (int, boolean) -> int = { n : int, b : boolean -> return n * 2; };"),
            "const std::function<int(int, const boolean)> f = [&](int& n, const boolean& b){\n\treturn n*2;\n};\n\n"
        );
    }

    #[test]
    fn test_conditional_expression_and_group() {
        assert_eq!(
            body("let y = if (a) 1 else (2 - 1);"),
            "const auto y = (a?(1):((2-1)));\n\n"
        );
    }

    #[test]
    fn test_statements() {
        assert_eq!(body("if (x) print(1); else ;"), "if (x) print(1); else \n\n");
        assert_eq!(body(";"), "\n\n");
        assert_eq!(body("{ print(f(1, 2)); }"), "\n{\n\tprint(f(1, 2));\n}\n\n");
        assert_eq!(body("print(-x);"), "print(-x);\n\n");
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(CppCodeGen::default().name(), "cpp");
    }
}
