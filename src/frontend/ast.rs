//! Abstract Syntax Tree definitions for PEBKAC
//!
//! The tree is strictly owned: every node holds its children by value and
//! nothing is shared. Expressions, statements and types live in separate
//! enums; an identifier is the one leaf that may appear both as an
//! expression and as a type, and an expression in statement position is
//! wrapped in [`Stmt::Expr`].

use std::collections::BTreeSet;

/// A complete program (compilation unit)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Declaration-level flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specifier {
    /// Function performs input/output
    Io,
}

impl Specifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specifier::Io => "IO",
        }
    }
}

/// Operator symbol, shared by unary and binary nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// !
    Not,
    /// &&
    And,
    /// ||
    Or,
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Div,
    /// %
    Mod,
    /// ==
    Eq,
    /// !=
    Ne,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    Le,
    /// >=
    Ge,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "!" => Operator::Not,
            "&&" => Operator::And,
            "||" => Operator::Or,
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mul,
            "/" => Operator::Div,
            "%" => Operator::Mod,
            "==" => Operator::Eq,
            "!=" => Operator::Ne,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Not => "!",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
        }
    }

    /// Name used in structured dumps
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Not => "NOT",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Add => "ADD",
            Operator::Sub => "SUBTRACT",
            Operator::Mul => "MULTIPLY",
            Operator::Div => "DIVIDE",
            Operator::Mod => "MODULUS",
            Operator::Eq => "EQUAL",
            Operator::Ne => "NOT_EQUAL",
            Operator::Lt => "LESS_THAN",
            Operator::Gt => "GREATER_THAN",
            Operator::Le => "LESS_OR_EQUAL",
            Operator::Ge => "GREATER_OR_EQUAL",
        }
    }

    /// Precedence level. A stacked operator is reduced when an incoming one
    /// has a strictly lower level.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Not => 0,
            Operator::And | Operator::Or => 1,
            Operator::Add | Operator::Sub => 2,
            Operator::Mul | Operator::Div | Operator::Mod => 3,
            Operator::Eq
            | Operator::Ne
            | Operator::Lt
            | Operator::Gt
            | Operator::Le
            | Operator::Ge => 4,
        }
    }
}

/// Type annotation
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Named type: int, boolean, ...
    Identifier(Ident),
    /// Callable value: (int, int) -> int
    Function(FunctionType),
}

/// Function type
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub specifiers: BTreeSet<Specifier>,
    pub parameters: Vec<Type>,
    pub return_type: Box<Type>,
}

/// Function or lambda parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: Type,
    pub default_value: Option<Expr>,
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Ident),
    NumericLiteral(i64),
    BooleanLiteral(bool),
    /// Parenthesized expression, kept so codegen re-emits the parentheses
    Group(Box<Expr>),
    Unary {
        op: Operator,
        operand: Box<Expr>,
    },
    Binary {
        op: Operator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// if (cond) a else b
    Conditional {
        condition: Box<Expr>,
        value_true: Box<Expr>,
        value_false: Box<Expr>,
    },
    /// { params -> statements }
    Lambda {
        parameters: Vec<Param>,
        statements: Vec<Stmt>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

/// let name [: type] = value;
#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub name: Ident,
    /// `None` when the annotation is omitted
    pub ty: Option<Type>,
    pub value: Expr,
}

/// Function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub specifiers: BTreeSet<Specifier>,
    pub name: Ident,
    pub parameters: Vec<Param>,
    pub return_type: Type,
    pub body: Block,
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// if (cond) stmt [else stmt]
    Conditional {
        condition: Expr,
        branch_true: Box<Stmt>,
        branch_false: Option<Box<Stmt>>,
    },
    Block(Block),
    Let(Let),
    Function(Function),
    Return(Expr),
    /// bare `;`
    Empty,
    /// Expression statement
    Expr(Expr),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols_round_trip() {
        for symbol in ["!", "&&", "||", "+", "-", "*", "/", "%", "==", "!=", "<", ">", "<=", ">="] {
            let op = Operator::from_symbol(symbol).unwrap();
            assert_eq!(op.symbol(), symbol);
        }
        assert_eq!(Operator::from_symbol("="), None);
    }

    #[test]
    fn test_precedence_table() {
        assert_eq!(Operator::Not.precedence(), 0);
        assert_eq!(Operator::Or.precedence(), 1);
        assert!(Operator::Mul.precedence() > Operator::Add.precedence());
        // comparisons bind tighter than arithmetic
        assert!(Operator::Eq.precedence() > Operator::Mul.precedence());
    }
}
