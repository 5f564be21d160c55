//! Structured dumps of tokens and AST nodes
//!
//! Every node converts to a `serde_json::Value` made of ordered objects,
//! arrays, strings, integers, booleans and nulls. AST objects carry a
//! `"node"` discriminator as their first key.

use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::frontend::ast::*;
use crate::frontend::token::Token;

/// Conversion to a structured, inspectable form
pub trait Dump {
    fn dump(&self) -> Value;
}

impl<T: Dump> Dump for [T] {
    fn dump(&self) -> Value {
        Value::Array(self.iter().map(Dump::dump).collect())
    }
}

impl<T: Dump> Dump for Vec<T> {
    fn dump(&self) -> Value {
        self.as_slice().dump()
    }
}

impl<T: Dump + ?Sized> Dump for Box<T> {
    fn dump(&self) -> Value {
        (**self).dump()
    }
}

impl<T: Dump> Dump for Option<T> {
    fn dump(&self) -> Value {
        self.as_ref().map_or(Value::Null, Dump::dump)
    }
}

impl Dump for Token {
    fn dump(&self) -> Value {
        json!({ "type": self.kind, "value": self.text })
    }
}

fn specifiers(set: &BTreeSet<Specifier>) -> Value {
    set.iter().map(|s| s.as_str()).collect()
}

impl Dump for Ident {
    fn dump(&self) -> Value {
        json!({ "node": "identifier", "value": self.name })
    }
}

impl Dump for Type {
    fn dump(&self) -> Value {
        match self {
            Type::Identifier(ident) => ident.dump(),
            Type::Function(func) => func.dump(),
        }
    }
}

impl Dump for FunctionType {
    fn dump(&self) -> Value {
        json!({
            "node": "function_type",
            "specifiers": specifiers(&self.specifiers),
            "parameters": self.parameters.dump(),
            "return_type": self.return_type.dump(),
        })
    }
}

impl Dump for Param {
    fn dump(&self) -> Value {
        json!({
            "node": "parameter",
            "name": self.name.name,
            "type": self.ty.dump(),
            "default_value": self.default_value.dump(),
        })
    }
}

impl Dump for Expr {
    fn dump(&self) -> Value {
        match self {
            Expr::Identifier(ident) => ident.dump(),
            Expr::NumericLiteral(value) => json!({ "node": "numeric_literal", "value": value }),
            Expr::BooleanLiteral(value) => json!({ "node": "boolean_literal", "value": value }),
            Expr::Group(inner) => json!({ "node": "group", "expression": inner.dump() }),
            Expr::Unary { op, operand } => json!({
                "node": "unary_operator",
                "operation": op.name(),
                "operand": operand.dump(),
            }),
            Expr::Binary { op, lhs, rhs } => json!({
                "node": "operator",
                "operation": op.name(),
                "operand_a": lhs.dump(),
                "operand_b": rhs.dump(),
            }),
            Expr::Conditional { condition, value_true, value_false } => json!({
                "node": "conditional_expression",
                "condition": condition.dump(),
                "value_true": value_true.dump(),
                "value_false": value_false.dump(),
            }),
            Expr::Lambda { parameters, statements } => json!({
                "node": "lambda",
                "parameters": parameters.dump(),
                "statements": statements.dump(),
            }),
            Expr::Call { callee, arguments } => json!({
                "node": "function_call",
                "function": callee.dump(),
                "arguments": arguments.dump(),
            }),
        }
    }
}

impl Dump for Block {
    fn dump(&self) -> Value {
        json!({ "node": "block", "statements": self.statements.dump() })
    }
}

impl Dump for Let {
    fn dump(&self) -> Value {
        json!({
            "node": "let",
            "name": self.name.name,
            "type": self.ty.dump(),
            "value": self.value.dump(),
        })
    }
}

impl Dump for Function {
    fn dump(&self) -> Value {
        json!({
            "node": "function",
            "specifiers": specifiers(&self.specifiers),
            "name": self.name.name,
            "parameters": self.parameters.dump(),
            "return_type": self.return_type.dump(),
            "body": self.body.dump(),
        })
    }
}

impl Dump for Stmt {
    fn dump(&self) -> Value {
        match self {
            Stmt::Conditional { condition, branch_true, branch_false } => json!({
                "node": "conditional",
                "condition": condition.dump(),
                "branch_true": branch_true.dump(),
                "branch_false": branch_false.dump(),
            }),
            Stmt::Block(block) => block.dump(),
            Stmt::Let(binding) => binding.dump(),
            Stmt::Function(func) => func.dump(),
            Stmt::Return(value) => json!({ "node": "return", "value": value.dump() }),
            Stmt::Empty => json!({ "node": "empty_statement" }),
            // an expression statement dumps as the expression itself
            Stmt::Expr(expr) => expr.dump(),
        }
    }
}

impl Dump for Program {
    fn dump(&self) -> Value {
        self.statements.dump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::TokenKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_dump() {
        let tokens = vec![
            Token::new(TokenKind::NumericLiteral, "1"),
            Token::new(TokenKind::Operator, "+"),
        ];
        assert_eq!(
            tokens.dump().to_string(),
            r#"[{"type":"NUMERIC_LITERAL","value":"1"},{"type":"OPERATOR","value":"+"}]"#
        );
    }

    #[test]
    fn test_let_dump_keeps_key_order() {
        let stmt = Stmt::Let(Let {
            name: Ident::new("x"),
            ty: None,
            value: Expr::Unary {
                op: Operator::Not,
                operand: Box::new(Expr::BooleanLiteral(true)),
            },
        });
        assert_eq!(
            stmt.dump().to_string(),
            r#"{"node":"let","name":"x","type":null,"value":{"node":"unary_operator","operation":"NOT","operand":{"node":"boolean_literal","value":true}}}"#
        );
    }

    #[test]
    fn test_function_dump() {
        let func = Function {
            specifiers: [Specifier::Io].into_iter().collect(),
            name: Ident::new("main"),
            parameters: vec![Param {
                name: Ident::new("f"),
                ty: Type::Function(FunctionType {
                    specifiers: BTreeSet::new(),
                    parameters: vec![Type::Identifier(Ident::new("int"))],
                    return_type: Box::new(Type::Identifier(Ident::new("int"))),
                }),
                default_value: None,
            }],
            return_type: Type::Identifier(Ident::new("int")),
            body: Block { statements: vec![Stmt::Empty] },
        };
        let value = func.dump();
        assert_eq!(value["node"], "function");
        assert_eq!(value["specifiers"], json!(["IO"]));
        assert_eq!(value["parameters"][0]["type"]["node"], "function_type");
        assert_eq!(value["parameters"][0]["type"]["parameters"][0]["value"], "int");
        assert_eq!(value["body"]["statements"][0]["node"], "empty_statement");
    }
}
