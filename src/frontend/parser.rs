//! Parser for PEBKAC
//!
//! Recursive descent for statements and declarations, shunting-yard for
//! expressions.
//!
//! The parser walks an immutable token list with a cursor. Comment tokens are
//! skipped whenever the parser looks at the next token, so no grammar rule
//! ever sees one. The first error aborts the parse; there is no recovery.
#![allow(dead_code)]

use std::collections::BTreeSet;

use crate::frontend::ast::*;
use crate::frontend::lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result};

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Tokenize `source` and create a parser over the result
    pub fn new(source: &str) -> Self {
        Self::from_tokens(lexer::tokenize(source))
    }

    /// Create a parser from pre-tokenized input
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    // ==================== Helper Methods ====================

    /// Index of the next non-comment token
    fn next_index(&self) -> Option<usize> {
        (self.pos..self.tokens.len()).find(|&i| !self.tokens[i].is_comment())
    }

    /// Whether only comments (or nothing) remain
    pub fn is_end(&self) -> bool {
        self.next_index().is_none()
    }

    fn peek(&self) -> Result<&Token> {
        self.next_index()
            .map(|i| &self.tokens[i])
            .ok_or(Error::EndOfInput)
    }

    fn peek_is(&self, kind: TokenKind, text: &str) -> Result<bool> {
        Ok(self.peek()?.is(kind, text))
    }

    fn consume(&mut self) -> Result<Token> {
        let index = self.next_index().ok_or(Error::EndOfInput)?;
        self.pos = index + 1;
        Ok(self.tokens[index].clone())
    }

    fn consume_kind(&mut self, kind: TokenKind) -> Result<Token> {
        let token = self.consume()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(Error::UnexpectedTokenKind {
                expected: kind,
                got: token.kind,
            })
        }
    }

    fn consume_exact(&mut self, kind: TokenKind, text: &str) -> Result<Token> {
        let token = self.consume_kind(kind)?;
        if token.text == text {
            Ok(token)
        } else {
            Err(Error::UnexpectedTokenValue {
                expected: text.to_string(),
                got: token.text,
            })
        }
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete program
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = Vec::new();

        while !self.is_end() {
            statements.push(self.parse_statement()?);
        }

        log::debug!("parsed {} top-level statements", statements.len());
        Ok(Program { statements })
    }

    /// Parse statements up to the end of input or a closing `}`
    pub fn parse_statements(&mut self) -> Result<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.is_end() && !self.peek_is(TokenKind::Bracket, "}")? {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    pub fn parse_statement(&mut self) -> Result<Stmt> {
        let token = self.peek()?;

        if token.is(TokenKind::Keyword, "if") {
            self.parse_conditional()
        } else if token.is(TokenKind::Keyword, "return") {
            self.parse_return()
        } else if token.is(TokenKind::Keyword, "let") {
            Ok(Stmt::Let(self.parse_let()?))
        } else if token.is(TokenKind::Bracket, "{") {
            Ok(Stmt::Block(self.parse_block()?))
        } else if token.is(TokenKind::Keyword, "fun") || token.is(TokenKind::Keyword, "io") {
            Ok(Stmt::Function(self.parse_function()?))
        } else if token.is(TokenKind::SyntacticElement, ";") {
            self.parse_empty_statement()
        } else {
            let expr = self.parse_expression()?;
            self.consume_exact(TokenKind::SyntacticElement, ";")?;
            Ok(Stmt::Expr(expr))
        }
    }

    /// Parse an expression with the shunting-yard algorithm.
    ///
    /// Operands and pending operators live on two stacks. An incoming
    /// operator with a strictly lower precedence than the stacked top flushes
    /// the whole operator stack before being pushed.
    pub fn parse_expression(&mut self) -> Result<Expr> {
        let mut operands: Vec<Expr> = Vec::new();
        let mut operators: Vec<Operator> = Vec::new();

        let mut prev_op = false;
        loop {
            let token = self.peek()?.clone();

            match token.kind {
                TokenKind::Bracket if token.text == "{" => {
                    operands.push(self.parse_lambda()?);
                }
                TokenKind::Bracket if token.text == "(" => {
                    // `(` right after an operand is a call
                    let callee = if prev_op { None } else { operands.pop() };
                    match callee {
                        Some(callee) => {
                            self.consume()?;
                            let arguments = self.parse_expressions()?;
                            self.consume_exact(TokenKind::Bracket, ")")?;
                            operands.push(Expr::Call {
                                callee: Box::new(callee),
                                arguments,
                            });
                        }
                        None => operands.push(self.parse_group()?),
                    }
                }
                TokenKind::Keyword if token.text == "if" => {
                    operands.push(self.parse_conditional_expression()?);
                }
                TokenKind::Identifier => {
                    operands.push(Expr::Identifier(self.parse_identifier()?));
                }
                TokenKind::BooleanLiteral => {
                    operands.push(self.parse_boolean_literal()?);
                }
                TokenKind::NumericLiteral => {
                    operands.push(self.parse_numeric_literal()?);
                }
                TokenKind::Operator => {
                    self.consume()?;
                    let op = Operator::from_symbol(&token.text).ok_or_else(|| {
                        Error::UnexpectedTokenValue {
                            expected: "operator".to_string(),
                            got: token.text.clone(),
                        }
                    })?;

                    if let Some(top) = operators.last() {
                        if op.precedence() < top.precedence() {
                            reduce(&mut operands, &mut operators)?;
                        }
                    }
                    operators.push(op);
                }
                _ => break,
            }

            prev_op = token.kind == TokenKind::Operator;
        }

        if prev_op {
            return Err(Error::PostfixOperator);
        }

        reduce(&mut operands, &mut operators)?;

        match (operands.pop(), operands.is_empty() && operators.is_empty()) {
            (Some(expr), true) => Ok(expr),
            _ => Err(Error::MalformedExpression),
        }
    }

    /// Comma-separated expressions, up to a `)`
    fn parse_expressions(&mut self) -> Result<Vec<Expr>> {
        let mut expressions = Vec::new();
        if !self.peek_is(TokenKind::Bracket, ")")? {
            expressions.push(self.parse_expression()?);
            while self.peek_is(TokenKind::SyntacticElement, ",")? {
                self.consume()?;
                expressions.push(self.parse_expression()?);
            }
        }
        Ok(expressions)
    }

    /// Comma-separated parameters, if the next token is an identifier
    fn parse_parameters(&mut self) -> Result<Vec<Param>> {
        let mut parameters = Vec::new();
        if self.peek()?.kind == TokenKind::Identifier {
            parameters.push(self.parse_parameter()?);
            while self.peek_is(TokenKind::SyntacticElement, ",")? {
                self.consume()?;
                parameters.push(self.parse_parameter()?);
            }
        }
        Ok(parameters)
    }

    fn parse_identifier(&mut self) -> Result<Ident> {
        let token = self.consume_kind(TokenKind::Identifier)?;
        Ok(Ident::new(token.text))
    }

    fn parse_boolean_literal(&mut self) -> Result<Expr> {
        let token = self.consume_kind(TokenKind::BooleanLiteral)?;
        Ok(Expr::BooleanLiteral(token.text == "true"))
    }

    /// Numeric literals are integral; a fractional part is dropped.
    fn parse_numeric_literal(&mut self) -> Result<Expr> {
        let token = self.consume_kind(TokenKind::NumericLiteral)?;
        let integer_part = token.text.split('.').next().unwrap_or("");
        if integer_part.is_empty() {
            return Ok(Expr::NumericLiteral(0));
        }
        integer_part
            .parse::<i64>()
            .map(Expr::NumericLiteral)
            .map_err(|_| Error::InvalidNumericLiteral(token.text))
    }

    /// ( <expression> )
    fn parse_group(&mut self) -> Result<Expr> {
        self.consume_exact(TokenKind::Bracket, "(")?;
        let expr = self.parse_expression()?;
        self.consume_exact(TokenKind::Bracket, ")")?;
        Ok(Expr::Group(Box::new(expr)))
    }

    /// { [params] -> [statements] }
    fn parse_lambda(&mut self) -> Result<Expr> {
        self.consume_exact(TokenKind::Bracket, "{")?;
        let parameters = self.parse_parameters()?;
        self.consume_exact(TokenKind::SyntacticElement, "->")?;
        let statements = self.parse_statements()?;
        self.consume_exact(TokenKind::Bracket, "}")?;
        Ok(Expr::Lambda { parameters, statements })
    }

    /// `(` starts a function type, anything else is a named type
    pub fn parse_type(&mut self) -> Result<Type> {
        if self.peek_is(TokenKind::Bracket, "(")? || self.peek_is(TokenKind::Keyword, "io")? {
            Ok(Type::Function(self.parse_function_type()?))
        } else {
            Ok(Type::Identifier(self.parse_identifier()?))
        }
    }

    /// [io] ( [param_types] ) -> <return_type>
    fn parse_function_type(&mut self) -> Result<FunctionType> {
        let specifiers = self.parse_specifiers()?;

        self.consume_exact(TokenKind::Bracket, "(")?;
        let mut parameters = Vec::new();
        if !self.peek_is(TokenKind::Bracket, ")")? {
            parameters.push(self.parse_type()?);
            while self.peek_is(TokenKind::SyntacticElement, ",")? {
                self.consume()?;
                parameters.push(self.parse_type()?);
            }
        }
        self.consume_exact(TokenKind::Bracket, ")")?;

        self.consume_exact(TokenKind::SyntacticElement, "->")?;
        let return_type = self.parse_type()?;

        Ok(FunctionType {
            specifiers,
            parameters,
            return_type: Box::new(return_type),
        })
    }

    /// Leading `io` keywords; repeats collapse into one flag
    fn parse_specifiers(&mut self) -> Result<BTreeSet<Specifier>> {
        let mut specifiers = BTreeSet::new();
        while self.peek_is(TokenKind::Keyword, "io")? {
            self.consume()?;
            specifiers.insert(Specifier::Io);
        }
        Ok(specifiers)
    }

    /// if ( <condition> ) <branch_true> [else <branch_false>]
    fn parse_conditional(&mut self) -> Result<Stmt> {
        self.consume_exact(TokenKind::Keyword, "if")?;
        self.consume_exact(TokenKind::Bracket, "(")?;
        let condition = self.parse_expression()?;
        self.consume_exact(TokenKind::Bracket, ")")?;
        let branch_true = self.parse_statement()?;

        let branch_false = if !self.is_end() && self.peek_is(TokenKind::Keyword, "else")? {
            self.consume()?;
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::Conditional {
            condition,
            branch_true: Box::new(branch_true),
            branch_false,
        })
    }

    /// if ( <condition> ) <value_true> else <value_false>
    fn parse_conditional_expression(&mut self) -> Result<Expr> {
        self.consume_exact(TokenKind::Keyword, "if")?;
        self.consume_exact(TokenKind::Bracket, "(")?;
        let condition = self.parse_expression()?;
        self.consume_exact(TokenKind::Bracket, ")")?;
        let value_true = self.parse_expression()?;
        self.consume_exact(TokenKind::Keyword, "else")?;
        let value_false = self.parse_expression()?;

        Ok(Expr::Conditional {
            condition: Box::new(condition),
            value_true: Box::new(value_true),
            value_false: Box::new(value_false),
        })
    }

    /// let <name> [: <type>] = <value>;
    fn parse_let(&mut self) -> Result<Let> {
        self.consume_exact(TokenKind::Keyword, "let")?;
        let name = self.parse_identifier()?;

        let ty = if self.peek_is(TokenKind::SyntacticElement, ":")? {
            self.consume()?;
            Some(self.parse_type()?)
        } else {
            None
        };

        self.consume_exact(TokenKind::SyntacticElement, "=")?;
        let value = self.parse_expression()?;
        self.consume_exact(TokenKind::SyntacticElement, ";")?;

        Ok(Let { name, ty, value })
    }

    /// <name> : <type> [= <expression>]
    fn parse_parameter(&mut self) -> Result<Param> {
        let name = self.parse_identifier()?;
        self.consume_exact(TokenKind::SyntacticElement, ":")?;
        let ty = self.parse_type()?;

        let default_value = if self.peek_is(TokenKind::SyntacticElement, "=")? {
            self.consume()?;
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Param { name, ty, default_value })
    }

    /// [io] fun <name>([params]) : <return_type> (= <expression>; | { <statements> })
    fn parse_function(&mut self) -> Result<Function> {
        let specifiers = self.parse_specifiers()?;

        self.consume_exact(TokenKind::Keyword, "fun")?;
        let name = self.parse_identifier()?;

        self.consume_exact(TokenKind::Bracket, "(")?;
        let parameters = self.parse_parameters()?;
        self.consume_exact(TokenKind::Bracket, ")")?;

        self.consume_exact(TokenKind::SyntacticElement, ":")?;
        let return_type = self.parse_type()?;

        // `= expr;` is sugar for `{ return expr; }`
        let body = if self.peek_is(TokenKind::SyntacticElement, "=")? {
            self.consume()?;
            let value = self.parse_expression()?;
            self.consume_exact(TokenKind::SyntacticElement, ";")?;
            Block {
                statements: vec![Stmt::Return(value)],
            }
        } else {
            self.parse_block()?
        };

        Ok(Function {
            specifiers,
            name,
            parameters,
            return_type,
            body,
        })
    }

    /// return <expression>;
    fn parse_return(&mut self) -> Result<Stmt> {
        self.consume_exact(TokenKind::Keyword, "return")?;
        let value = self.parse_expression()?;
        self.consume_exact(TokenKind::SyntacticElement, ";")?;
        Ok(Stmt::Return(value))
    }

    /// { [statements] }
    fn parse_block(&mut self) -> Result<Block> {
        self.consume_exact(TokenKind::Bracket, "{")?;
        let mut statements = Vec::new();
        while !self.peek_is(TokenKind::Bracket, "}")? {
            statements.push(self.parse_statement()?);
        }
        self.consume()?;
        Ok(Block { statements })
    }

    /// ;
    fn parse_empty_statement(&mut self) -> Result<Stmt> {
        self.consume_exact(TokenKind::SyntacticElement, ";")?;
        Ok(Stmt::Empty)
    }
}

/// Apply every pending operator, innermost first. With a single operand left
/// the operator is applied as unary, whatever its usual arity.
fn reduce(operands: &mut Vec<Expr>, operators: &mut Vec<Operator>) -> Result<()> {
    while let Some(op) = operators.pop() {
        let rhs = operands.pop().ok_or(Error::MalformedExpression)?;
        let expr = match operands.pop() {
            Some(lhs) => Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            None => Expr::Unary {
                op,
                operand: Box::new(rhs),
            },
        };
        operands.push(expr);
    }
    Ok(())
}

/// Tokenize and parse a whole source file
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(source).parse_program()
}
