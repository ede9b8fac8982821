//==================================================
// File: symbol/builder.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Pre-pass scope analysis over the AST
// Objective: Define symbols per scope, resolve identifier uses, and
//            emit advisory diagnostics before evaluation
//==================================================

use super::{Scope, Symbol, SymbolKind};
use crate::ast::{BlockStatement, Expr, NodeId, Program, Stmt};
use crate::parser::is_assignment_op;
use crate::tokenizer::Position;
use std::collections::HashMap;
use thiserror::Error;

/// A positioned symbol diagnostic. Advisory: the evaluator proceeds
/// regardless; the LSP and the runner report them.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[Line {line}, Column {column}] {message}")]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Walks the AST once with a stack of scopes, defining symbols and
/// resolving identifier uses to scope distances.
pub struct Builder {
    scopes: Vec<Scope>,
    current: usize,
    errors: Vec<Diagnostic>,
    resolutions: HashMap<NodeId, usize>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        let mut global = Scope::new("global", None);
        // Bare builtins are reachable without an import; seed them so
        // valid programs do not trip "undefined identifier".
        for name in crate::modules::BARE_BUILTINS {
            global.symbols.insert(
                (*name).to_string(),
                Symbol {
                    name: (*name).to_string(),
                    kind: SymbolKind::Function,
                },
            );
        }
        Self {
            scopes: vec![global],
            current: 0,
            errors: Vec::new(),
            resolutions: HashMap::new(),
        }
    }

    /// Run the pre-pass over a whole program.
    pub fn build(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.visit_statement(stmt);
        }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Identifier use → scope distance, for `get_at`/`update_at`
    /// consumers. Not required for runtime correctness.
    pub fn resolutions(&self) -> &HashMap<NodeId, usize> {
        &self.resolutions
    }

    fn visit_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let { name, value, .. } => {
                let shadows_const = self.scopes[self.current]
                    .symbols
                    .get(&name.name)
                    .map(|existing| existing.kind)
                    == Some(SymbolKind::Constant);
                if shadows_const {
                    self.error(
                        name.position,
                        format!("cannot re-declare constant: {}", name.name),
                    );
                }
                if let Expr::Function {
                    parameters, body, ..
                } = value
                {
                    self.define(&name.name, SymbolKind::Function);
                    self.enter_scope("fn");
                    for param in parameters {
                        self.define(&param.name, SymbolKind::Parameter);
                    }
                    self.visit_block(body);
                    self.exit_scope();
                } else {
                    self.define(&name.name, SymbolKind::Variable);
                    self.visit_expression(value);
                }
            }
            Stmt::Const { name, value, .. } => {
                if self.scopes[self.current].symbols.contains_key(&name.name) {
                    self.error(
                        name.position,
                        format!("identifier already defined: {}", name.name),
                    );
                }
                if let Expr::Function {
                    parameters, body, ..
                } = value
                {
                    self.define(&name.name, SymbolKind::Constant);
                    self.enter_scope("fn");
                    for param in parameters {
                        self.define(&param.name, SymbolKind::Parameter);
                    }
                    self.visit_block(body);
                    self.exit_scope();
                } else {
                    self.define(&name.name, SymbolKind::Constant);
                    self.visit_expression(value);
                }
            }
            Stmt::Return { value, .. } => self.visit_expression(value),
            Stmt::Expression { expr, .. } => self.visit_expression(expr),
            Stmt::Struct { name, fields, .. } => {
                self.define(&name.name, SymbolKind::Struct);
                self.enter_scope(&name.name);
                for (field, _) in fields {
                    self.define(field, SymbolKind::StructField);
                }
                self.exit_scope();
            }
            Stmt::Import { path, .. } => {
                self.define(path, SymbolKind::Module);
            }
            Stmt::Break { .. } | Stmt::Continue { .. } => {}
        }
    }

    fn visit_block(&mut self, block: &BlockStatement) {
        self.enter_scope("block");
        for stmt in &block.statements {
            self.visit_statement(stmt);
        }
        self.exit_scope();
    }

    fn visit_expression(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(ident) => match self.resolve_with_distance(&ident.name) {
                Some((_, distance)) => {
                    self.resolutions.insert(ident.node_id, distance);
                }
                None => {
                    self.error(
                        ident.position,
                        format!("undefined identifier: {}", ident.name),
                    );
                }
            },
            Expr::IntegerLiteral { .. }
            | Expr::FloatLiteral { .. }
            | Expr::StringLiteral { .. }
            | Expr::CharLiteral { .. }
            | Expr::BooleanLiteral { .. }
            | Expr::NullLiteral { .. } => {}
            Expr::Prefix { right, .. } => self.visit_expression(right),
            Expr::Infix {
                left,
                operator,
                right,
                ..
            } => {
                if is_assignment_op(operator) {
                    if let Expr::Identifier(ident) = left.as_ref() {
                        if self.resolve(&ident.name) == Some(SymbolKind::Constant) {
                            self.error(
                                ident.position,
                                format!("cannot reassign to const: {}", ident.name),
                            );
                        }
                    }
                }
                self.visit_expression(left);
                self.visit_expression(right);
            }
            Expr::If {
                condition,
                consequence,
                else_ifs,
                alternative,
                ..
            } => {
                self.visit_expression(condition);
                self.visit_block(consequence);
                for arm in else_ifs {
                    self.visit_expression(&arm.condition);
                    self.visit_block(&arm.consequence);
                }
                if let Some(alt) = alternative {
                    self.visit_block(alt);
                }
            }
            Expr::While {
                condition, body, ..
            } => {
                self.enter_scope("while");
                self.visit_expression(condition);
                self.visit_block(body);
                self.exit_scope();
            }
            Expr::For {
                init,
                condition,
                post,
                body,
                ..
            } => {
                self.enter_scope("for");
                if let Some(init) = init {
                    self.visit_statement(init);
                }
                if let Some(condition) = condition {
                    self.visit_expression(condition);
                }
                if let Some(post) = post {
                    self.visit_statement(post);
                }
                self.visit_block(body);
                self.exit_scope();
            }
            Expr::Function {
                parameters, body, ..
            } => {
                self.enter_scope("fn");
                for param in parameters {
                    self.define(&param.name, SymbolKind::Parameter);
                }
                self.visit_block(body);
                self.exit_scope();
            }
            Expr::Call {
                function,
                arguments,
                ..
            } => {
                self.visit_expression(function);
                for arg in arguments {
                    self.visit_expression(arg);
                }
            }
            Expr::Member { object, .. } => self.visit_expression(object),
            Expr::Index { left, index, .. } => {
                self.visit_expression(left);
                self.visit_expression(index);
            }
            Expr::Array { elements, .. } => {
                for element in elements {
                    self.visit_expression(element);
                }
            }
            Expr::Hash { pairs, .. } => {
                for (key, value) in pairs {
                    self.visit_expression(key);
                    self.visit_expression(value);
                }
            }
            Expr::StructLiteral { fields, .. } => {
                for (_, value) in fields {
                    self.visit_expression(value);
                }
            }
        }
    }

    fn enter_scope(&mut self, name: &str) {
        self.scopes.push(Scope::new(name, Some(self.current)));
        self.current = self.scopes.len() - 1;
    }

    fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    fn define(&mut self, name: &str, kind: SymbolKind) {
        self.scopes[self.current].symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                kind,
            },
        );
    }

    fn resolve(&self, name: &str) -> Option<SymbolKind> {
        self.resolve_with_distance(name).map(|(kind, _)| kind)
    }

    fn resolve_with_distance(&self, name: &str) -> Option<(SymbolKind, usize)> {
        let mut index = Some(self.current);
        let mut distance = 0;
        while let Some(scope_index) = index {
            if let Some(symbol) = self.scopes[scope_index].symbols.get(name) {
                return Some((symbol.kind, distance));
            }
            index = self.scopes[scope_index].parent;
            distance += 1;
        }
        None
    }

    fn error(&mut self, position: Position, message: String) {
        self.errors.push(Diagnostic {
            message,
            line: position.line,
            column: position.column,
        });
    }
}

/// Convenience entry: run the pre-pass and hand back the diagnostics.
pub fn check(program: &Program) -> Vec<Diagnostic> {
    let mut builder = Builder::new();
    builder.build(program);
    builder.errors().to_vec()
}
