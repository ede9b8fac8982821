//=====================================================
// File: ast.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Code-Lang abstract syntax tree definitions
// Objective: Define statement and expression nodes for Code-Lang programs,
//            each carrying its source position and a debug rendering
//=====================================================

use crate::tokenizer::Position;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

pub type NodeId = u32;

static NODE_COUNTER: AtomicU32 = AtomicU32::new(1);

pub fn next_node_id() -> NodeId {
    NODE_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A name occurrence: a binding site or a use site.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub position: Position,
    pub node_id: NodeId,
}

impl Identifier {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            node_id: next_node_id(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Root of every parse: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.statements.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Stmt>,
    pub position: Position,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.statements.iter().map(ToString::to_string).collect();
        write!(f, "{{ {} }}", rendered.join(" "))
    }
}

/// One `elseif (cond) { … }` arm of an if expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub condition: Expr,
    pub consequence: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let {
        name: Identifier,
        value: Expr,
        position: Position,
    },
    Const {
        name: Identifier,
        value: Expr,
        position: Position,
    },
    Return {
        value: Expr,
        position: Position,
    },
    Import {
        path: String,
        position: Position,
    },
    Struct {
        name: Identifier,
        fields: Vec<(String, Expr)>,
        position: Position,
    },
    Break {
        position: Position,
    },
    Continue {
        position: Position,
    },
    Expression {
        expr: Expr,
        position: Position,
    },
}

impl Stmt {
    pub fn position(&self) -> Position {
        match self {
            Stmt::Let { position, .. }
            | Stmt::Const { position, .. }
            | Stmt::Return { position, .. }
            | Stmt::Import { position, .. }
            | Stmt::Struct { position, .. }
            | Stmt::Break { position }
            | Stmt::Continue { position }
            | Stmt::Expression { position, .. } => *position,
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value, .. } => write!(f, "let {} = {};", name, value),
            Stmt::Const { name, value, .. } => write!(f, "const {} = {};", name, value),
            Stmt::Return { value, .. } => write!(f, "return {};", value),
            Stmt::Import { path, .. } => write!(f, "import \"{}\";", path),
            Stmt::Struct { name, fields, .. } => {
                let rendered: Vec<String> = fields
                    .iter()
                    .map(|(field, expr)| format!("{}: {}", field, expr))
                    .collect();
                write!(f, "struct {} {{ {} }};", name, rendered.join(", "))
            }
            Stmt::Break { .. } => f.write_str("break;"),
            Stmt::Continue { .. } => f.write_str("continue;"),
            Stmt::Expression { expr, .. } => write!(f, "{};", expr),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    IntegerLiteral {
        value: i64,
        position: Position,
    },
    FloatLiteral {
        value: f64,
        position: Position,
    },
    StringLiteral {
        value: String,
        position: Position,
    },
    CharLiteral {
        value: char,
        position: Position,
    },
    BooleanLiteral {
        value: bool,
        position: Position,
    },
    NullLiteral {
        position: Position,
    },
    Prefix {
        operator: String,
        right: Box<Expr>,
        position: Position,
    },
    Infix {
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
        position: Position,
    },
    If {
        condition: Box<Expr>,
        consequence: BlockStatement,
        else_ifs: Vec<ElseIf>,
        alternative: Option<BlockStatement>,
        position: Position,
    },
    While {
        condition: Box<Expr>,
        body: BlockStatement,
        position: Position,
    },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Box<Expr>>,
        post: Option<Box<Stmt>>,
        body: BlockStatement,
        position: Position,
    },
    Function {
        parameters: Vec<Identifier>,
        body: BlockStatement,
        position: Position,
    },
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
        position: Position,
    },
    Index {
        left: Box<Expr>,
        index: Box<Expr>,
        position: Position,
    },
    Member {
        object: Box<Expr>,
        property: Identifier,
        position: Position,
    },
    Array {
        elements: Vec<Expr>,
        position: Position,
    },
    Hash {
        pairs: Vec<(Expr, Expr)>,
        position: Position,
    },
    StructLiteral {
        name: Identifier,
        fields: Vec<(String, Expr)>,
        position: Position,
    },
}

impl Expr {
    pub fn position(&self) -> Position {
        match self {
            Expr::Identifier(ident) => ident.position,
            Expr::IntegerLiteral { position, .. }
            | Expr::FloatLiteral { position, .. }
            | Expr::StringLiteral { position, .. }
            | Expr::CharLiteral { position, .. }
            | Expr::BooleanLiteral { position, .. }
            | Expr::NullLiteral { position }
            | Expr::Prefix { position, .. }
            | Expr::Infix { position, .. }
            | Expr::If { position, .. }
            | Expr::While { position, .. }
            | Expr::For { position, .. }
            | Expr::Function { position, .. }
            | Expr::Call { position, .. }
            | Expr::Index { position, .. }
            | Expr::Member { position, .. }
            | Expr::Array { position, .. }
            | Expr::Hash { position, .. }
            | Expr::StructLiteral { position, .. } => *position,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(ident) => write!(f, "{}", ident),
            Expr::IntegerLiteral { value, .. } => write!(f, "{}", value),
            Expr::FloatLiteral { value, .. } => write!(f, "{}", value),
            Expr::StringLiteral { value, .. } => write!(f, "\"{}\"", value),
            Expr::CharLiteral { value, .. } => write!(f, "'{}'", value),
            Expr::BooleanLiteral { value, .. } => write!(f, "{}", value),
            Expr::NullLiteral { .. } => f.write_str("null"),
            Expr::Prefix {
                operator, right, ..
            } => write!(f, "({}{})", operator, right),
            Expr::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            Expr::If {
                condition,
                consequence,
                else_ifs,
                alternative,
                ..
            } => {
                write!(f, "if ({}) {}", condition, consequence)?;
                for arm in else_ifs {
                    write!(f, " elseif ({}) {}", arm.condition, arm.consequence)?;
                }
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            }
            Expr::While {
                condition, body, ..
            } => write!(f, "while ({}) {}", condition, body),
            Expr::For {
                init,
                condition,
                post,
                body,
                ..
            } => {
                f.write_str("for (")?;
                match init {
                    Some(stmt) => write!(f, "{}", stmt)?,
                    None => f.write_str(";")?,
                }
                f.write_str(" ")?;
                if let Some(cond) = condition {
                    write!(f, "{}", cond)?;
                }
                f.write_str("; ")?;
                if let Some(post) = post {
                    // The post statement carries no semicolon in the source.
                    match post.as_ref() {
                        Stmt::Expression { expr, .. } => write!(f, "{}", expr)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, ") {}", body)
            }
            Expr::Function {
                parameters, body, ..
            } => {
                let params: Vec<String> = parameters.iter().map(ToString::to_string).collect();
                write!(f, "fn({}) {}", params.join(", "), body)
            }
            Expr::Call {
                function,
                arguments,
                ..
            } => {
                let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                write!(f, "{}({})", function, args.join(", "))
            }
            Expr::Index { left, index, .. } => write!(f, "({}[{}])", left, index),
            Expr::Member {
                object, property, ..
            } => write!(f, "({}.{})", object, property),
            Expr::Array { elements, .. } => {
                let rendered: Vec<String> = elements.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Expr::Hash { pairs, .. } => {
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Expr::StructLiteral { name, fields, .. } => {
                let rendered: Vec<String> = fields
                    .iter()
                    .map(|(field, expr)| format!("{}: {}", field, expr))
                    .collect();
                write!(f, "{} {{ {} }}", name, rendered.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Position {
        Position::new(1, 1)
    }

    #[test]
    fn renders_let_statement() {
        let stmt = Stmt::Let {
            name: Identifier::new("answer", pos()),
            value: Expr::IntegerLiteral {
                value: 42,
                position: pos(),
            },
            position: pos(),
        };
        assert_eq!(stmt.to_string(), "let answer = 42;");
    }

    #[test]
    fn renders_nested_infix_with_grouping() {
        let expr = Expr::Infix {
            left: Box::new(Expr::IntegerLiteral {
                value: 1,
                position: pos(),
            }),
            operator: "+".to_string(),
            right: Box::new(Expr::Infix {
                left: Box::new(Expr::IntegerLiteral {
                    value: 2,
                    position: pos(),
                }),
                operator: "*".to_string(),
                right: Box::new(Expr::IntegerLiteral {
                    value: 3,
                    position: pos(),
                }),
                position: pos(),
            }),
            position: pos(),
        };
        assert_eq!(expr.to_string(), "(1 + (2 * 3))");
    }

    #[test]
    fn node_ids_are_unique() {
        let a = Identifier::new("a", pos());
        let b = Identifier::new("a", pos());
        assert_ne!(a.node_id, b.node_id);
    }
}
