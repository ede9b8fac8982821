//=====================================================
// File: parser.rs
//=====================================================
// Author: SolvraOS Contributors
// License: Duality Public License (DPL v1.0)
// Goal: Code-Lang Pratt parser implementation
// Objective: Transform the token stream into AST nodes, accumulating
//            positioned errors instead of panicking
//=====================================================

use crate::ast::{BlockStatement, ElseIf, Expr, Identifier, Program, Stmt};
use crate::tokenizer::{Position, Token, TokenKind, Tokenizer};
use thiserror::Error;

/// A positioned parse diagnostic. The rendering matches the symbol
/// builder's so the LSP can treat both streams uniformly.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[Line {line}, Column {column}] {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Binding strength, low to high. Assignment is right-associative; all
/// other infix operators climb left-associatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Assign,
    Or,
    And,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
    Member,
}

fn token_precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Assign
        | TokenKind::AddAssign
        | TokenKind::SubAssign
        | TokenKind::MulAssign
        | TokenKind::QuoAssign
        | TokenKind::RemAssign
        | TokenKind::PowAssign
        | TokenKind::FloorDivAssign => Precedence::Assign,
        TokenKind::Or => Precedence::Or,
        TokenKind::And => Precedence::And,
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
            Precedence::LessGreater
        }
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk
        | TokenKind::Slash
        | TokenKind::Percent
        | TokenKind::Power
        | TokenKind::FloorDiv => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        TokenKind::Dot => Precedence::Member,
        _ => Precedence::Lowest,
    }
}

fn is_assignment_kind(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Assign
            | TokenKind::AddAssign
            | TokenKind::SubAssign
            | TokenKind::MulAssign
            | TokenKind::QuoAssign
            | TokenKind::RemAssign
            | TokenKind::PowAssign
            | TokenKind::FloorDivAssign
    )
}

/// Operators the symbol builder treats as assignments when they appear in
/// infix position.
pub fn is_assignment_op(op: &str) -> bool {
    matches!(op, "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "**=" | "//=")
}

fn ends_with_block(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::If { .. } | Expr::While { .. } | Expr::For { .. } | Expr::Function { .. }
    )
}

const MAX_EXPRESSION_DEPTH: usize = 1024;

/// Pratt parser over the scanner's token stream.
///
/// Keeps a `cur_token`/`peek_token` pair, dispatches prefix and infix
/// parsers by token kind, and collects every error into `errors` so a
/// single pass reports all syntactic problems.
pub struct Parser {
    tokenizer: Tokenizer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
    expr_depth: usize,
}

impl Parser {
    pub fn new(tokenizer: Tokenizer) -> Self {
        let mut parser = Self {
            tokenizer,
            cur_token: Token::new(TokenKind::Eof, "", 0, 0),
            peek_token: Token::new(TokenKind::Eof, "", 0, 0),
            errors: Vec::new(),
            expr_depth: 0,
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    pub fn from_source(source: &str) -> Self {
        Self::new(Tokenizer::new(source))
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while self.cur_token.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.next_token();
        }

        program
    }

    //=============================================
    //            Statement parsing
    //=============================================

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.cur_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Const => self.parse_const_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Import => self.parse_import_statement(),
            TokenKind::Struct => self.parse_struct_statement(),
            TokenKind::Break => self.parse_break_statement(),
            TokenKind::Continue => self.parse_continue_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Stmt> {
        let position = self.cur_token.position();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier::new(self.cur_token.literal.clone(), self.cur_token.position());

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }

        Some(Stmt::Let {
            name,
            value,
            position,
        })
    }

    fn parse_const_statement(&mut self) -> Option<Stmt> {
        let position = self.cur_token.position();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier::new(self.cur_token.literal.clone(), self.cur_token.position());

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }

        Some(Stmt::Const {
            name,
            value,
            position,
        })
    }

    fn parse_return_statement(&mut self) -> Option<Stmt> {
        let position = self.cur_token.position();
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }

        Some(Stmt::Return { value, position })
    }

    fn parse_import_statement(&mut self) -> Option<Stmt> {
        let position = self.cur_token.position();

        if !self.expect_peek(TokenKind::String) {
            return None;
        }
        let path = self.cur_token.literal.clone();

        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }

        Some(Stmt::Import { path, position })
    }

    fn parse_break_statement(&mut self) -> Option<Stmt> {
        let position = self.cur_token.position();
        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }
        Some(Stmt::Break { position })
    }

    fn parse_continue_statement(&mut self) -> Option<Stmt> {
        let position = self.cur_token.position();
        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }
        Some(Stmt::Continue { position })
    }

    fn parse_struct_statement(&mut self) -> Option<Stmt> {
        let position = self.cur_token.position();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier::new(self.cur_token.literal.clone(), self.cur_token.position());

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let fields = self.parse_field_list()?;

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }
        if !self.expect_peek(TokenKind::Semicolon) {
            return None;
        }

        Some(Stmt::Struct {
            name,
            fields,
            position,
        })
    }

    // Shared by struct declarations and struct literals: `name: expr`
    // pairs up to (not consuming) the closing brace. Trailing comma ok.
    fn parse_field_list(&mut self) -> Option<Vec<(String, Expr)>> {
        let mut fields: Vec<(String, Expr)> = Vec::new();

        while !self.peek_token_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.cur_token.literal.clone();
            let key_position = self.cur_token.position();

            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.next_token();

            let value = self.parse_expression(Precedence::Lowest)?;

            if fields.iter().any(|(name, _)| name == &key) {
                self.error(key_position, format!("duplicate field name: {}", key));
            } else {
                fields.push((key, value));
            }

            if self.peek_token_is(TokenKind::Comma) {
                self.next_token();
            }
        }

        Some(fields)
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let position = self.cur_token.position();
        let expr = self.parse_expression(Precedence::Lowest)?;

        // Block-ended expressions may stand without a terminating
        // semicolon, so `if (c) { return n; } return m;` parses.
        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        } else if !ends_with_block(&expr) {
            self.peek_error(TokenKind::Semicolon);
            return None;
        }

        Some(Stmt::Expression { expr, position })
    }

    //=============================================
    //            Expression parsing
    //=============================================

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        if self.expr_depth >= MAX_EXPRESSION_DEPTH {
            self.error(
                self.cur_token.position(),
                format!("expression recursion limit of {} exceeded", MAX_EXPRESSION_DEPTH),
            );
            return None;
        }
        self.expr_depth += 1;
        let result = self.parse_expression_inner(precedence);
        self.expr_depth -= 1;
        result
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        // An identifier directly followed by `{` is a struct literal.
        if matches!(left, Expr::Identifier(_)) && self.peek_token_is(TokenKind::LBrace) {
            return self.parse_struct_literal(left);
        }

        while !self.peek_token_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();
        match self.cur_token.kind {
            TokenKind::Ident => Some(Expr::Identifier(Identifier::new(
                self.cur_token.literal.clone(),
                position,
            ))),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            TokenKind::String => Some(Expr::StringLiteral {
                value: self.cur_token.literal.clone(),
                position,
            }),
            TokenKind::Char => {
                let value = self.cur_token.literal.chars().next().unwrap_or('\0');
                Some(Expr::CharLiteral { value, position })
            }
            TokenKind::True | TokenKind::False => Some(Expr::BooleanLiteral {
                value: self.cur_token.kind == TokenKind::True,
                position,
            }),
            TokenKind::Null => Some(Expr::NullLiteral { position }),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            TokenKind::For => self.parse_for_expression(),
            TokenKind::While => self.parse_while_expression(),
            kind => {
                self.error(
                    position,
                    format!("no prefix parse function for {} found", kind),
                );
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        match self.cur_token.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            TokenKind::Dot => self.parse_member_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();
        match self.cur_token.literal.parse::<i64>() {
            Ok(value) => Some(Expr::IntegerLiteral { value, position }),
            Err(_) => {
                self.error(
                    position,
                    format!("could not parse {:?} as integer", self.cur_token.literal),
                );
                None
            }
        }
    }

    fn parse_float_literal(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();
        match self.cur_token.literal.parse::<f64>() {
            Ok(value) => Some(Expr::FloatLiteral { value, position }),
            Err(_) => {
                self.error(
                    position,
                    format!("could not parse {:?} as float", self.cur_token.literal),
                );
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();
        let operator = self.cur_token.literal.clone();

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expr::Prefix {
            operator,
            right: Box::new(right),
            position,
        })
    }

    fn parse_infix_expression(&mut self, left: Expr) -> Option<Expr> {
        let position = self.cur_token.position();
        let operator = self.cur_token.literal.clone();
        let precedence = self.cur_precedence();

        // Assignment is right-associative: recurse one level below ASSIGN
        // so `a = b = c` parses as `a = (b = c)`.
        let next_precedence = if is_assignment_kind(self.cur_token.kind) {
            Precedence::Lowest
        } else {
            precedence
        };

        self.next_token();
        let right = self.parse_expression(next_precedence)?;

        Some(Expr::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            position,
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.next_token();

        let expr = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let mut else_ifs = Vec::new();
        while self.peek_token_is(TokenKind::ElseIf) {
            self.next_token();

            if !self.expect_peek(TokenKind::LParen) {
                return None;
            }
            self.next_token();
            let elif_condition = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::RParen) {
                return None;
            }
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            let elif_consequence = self.parse_block_statement();

            else_ifs.push(ElseIf {
                condition: elif_condition,
                consequence: elif_consequence,
            });
        }

        let alternative = if self.peek_token_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expr::If {
            condition: Box::new(condition),
            consequence,
            else_ifs,
            alternative,
            position,
        })
    }

    fn parse_while_expression(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expr::While {
            condition: Box::new(condition),
            body,
            position,
        })
    }

    fn parse_for_expression(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();

        // Init: a full statement, which consumes its own semicolon.
        let init = if self.cur_token_is(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_statement()?))
        };
        self.next_token();

        let condition = if self.cur_token_is(TokenKind::Semicolon) {
            None
        } else {
            let cond = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(TokenKind::Semicolon) {
                return None;
            }
            Some(Box::new(cond))
        };
        self.next_token();

        // Post: a bare expression, wrapped as an expression statement.
        let post = if self.cur_token_is(TokenKind::RParen) {
            None
        } else {
            let post_position = self.cur_token.position();
            let expr = self.parse_expression(Precedence::Lowest)?;
            Some(Box::new(Stmt::Expression {
                expr,
                position: post_position,
            }))
        };

        if post.is_some() && !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expr::For {
            init,
            condition,
            post,
            body,
            position,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expr::Function {
            parameters,
            body,
            position,
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_token_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        self.next_token();
        parameters.push(Identifier::new(
            self.cur_token.literal.clone(),
            self.cur_token.position(),
        ));

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            parameters.push(Identifier::new(
                self.cur_token.literal.clone(),
                self.cur_token.position(),
            ));
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(parameters)
    }

    fn parse_call_expression(&mut self, function: Expr) -> Option<Expr> {
        let position = self.cur_token.position();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;

        Some(Expr::Call {
            function: Box::new(function),
            arguments,
            position,
        })
    }

    fn parse_index_expression(&mut self, left: Expr) -> Option<Expr> {
        let position = self.cur_token.position();
        self.next_token();

        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }

        Some(Expr::Index {
            left: Box::new(left),
            index: Box::new(index),
            position,
        })
    }

    fn parse_member_expression(&mut self, object: Expr) -> Option<Expr> {
        let position = self.cur_token.position();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let property = Identifier::new(self.cur_token.literal.clone(), self.cur_token.position());

        Some(Expr::Member {
            object: Box::new(object),
            property,
            position,
        })
    }

    fn parse_array_literal(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;

        Some(Expr::Array { elements, position })
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expr>> {
        let mut list = Vec::new();

        if self.peek_token_is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn parse_hash_literal(&mut self) -> Option<Expr> {
        let position = self.cur_token.position();
        let mut pairs = Vec::new();

        while !self.peek_token_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_token_is(TokenKind::RBrace) && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Expr::Hash { pairs, position })
    }

    fn parse_struct_literal(&mut self, name_expr: Expr) -> Option<Expr> {
        let name = match name_expr {
            Expr::Identifier(ident) => ident,
            _ => return None,
        };
        let position = self.peek_token.position();

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let fields = self.parse_field_list()?;

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Expr::StructLiteral {
            name,
            fields,
            position,
        })
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let position = self.cur_token.position();
        let mut statements = Vec::new();

        self.next_token();

        while !self.cur_token_is(TokenKind::RBrace) && !self.cur_token_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        BlockStatement {
            statements,
            position,
        }
    }

    //=============================================
    //            Token navigation
    //=============================================

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.tokenizer.next_token());
    }

    fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn cur_precedence(&self) -> Precedence {
        token_precedence(self.cur_token.kind)
    }

    fn peek_precedence(&self) -> Precedence {
        token_precedence(self.peek_token.kind)
    }

    fn peek_error(&mut self, expected: TokenKind) {
        let message = format!(
            "expect next token to be {}, got {} instead",
            expected, self.peek_token.kind
        );
        self.error(self.cur_token.position(), message);
    }

    fn error(&mut self, position: Position, message: String) {
        self.errors
            .push(ParseError::new(message, position.line, position.column));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Program {
        let mut parser = Parser::from_source(source);
        let program = parser.parse_program();
        assert!(
            parser.errors().is_empty(),
            "unexpected parse errors: {:?}",
            parser.errors()
        );
        program
    }

    #[test]
    fn precedence_renders_as_expected() {
        let cases = [
            ("1 + 2 * 3;", "(1 + (2 * 3));"),
            ("a + b - c;", "((a + b) - c);"),
            ("2 ** 3 + 1;", "((2 ** 3) + 1);"),
            ("10 // 3 % 2;", "((10 // 3) % 2);"),
            ("a == b && c != d;", "((a == b) && (c != d));"),
            ("a || b && c;", "(a || (b && c));"),
            ("!a == b;", "((!a) == b);"),
            ("a + b[1] * c;", "(a + ((b[1]) * c));"),
            ("a.b.c;", "((a.b).c);"),
        ];
        for (input, expected) in cases {
            let program = parse(input);
            assert_eq!(program.to_string(), expected, "input {input}");
        }
    }

    #[test]
    fn assignment_is_right_associative() {
        let program = parse("a = b = 2;");
        let rendered = program.to_string();
        assert_eq!(rendered, "(a = (b = 2));");
    }

    #[test]
    fn struct_literal_promotes_identifier_before_brace() {
        let program = parse("let p = Point { x: 1, y: 2 };");
        match &program.statements[0] {
            Stmt::Let { value, .. } => match value {
                Expr::StructLiteral { name, fields, .. } => {
                    assert_eq!(name.name, "Point");
                    assert_eq!(fields.len(), 2);
                }
                other => panic!("expected struct literal, got {other:?}"),
            },
            other => panic!("expected let, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_struct_fields_are_errors() {
        let mut parser = Parser::from_source("struct P { x: 1, x: 2 };");
        parser.parse_program();
        assert!(parser
            .errors()
            .iter()
            .any(|e| e.message.contains("duplicate field name: x")));
    }

    #[test]
    fn missing_semicolon_is_reported() {
        let mut parser = Parser::from_source("let a = 1");
        parser.parse_program();
        assert!(!parser.errors().is_empty());
        assert!(parser.errors()[0]
            .message
            .contains("expect next token to be ;"));
    }

    #[test]
    fn illegal_token_reports_no_prefix_parser() {
        let mut parser = Parser::from_source("let a = '';");
        parser.parse_program();
        assert!(parser
            .errors()
            .iter()
            .any(|e| e.message.contains("no prefix parse function for ILLEGAL")));
    }
}
