//==================================================
// File: symbol.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Symbol table types for the Code-Lang pre-pass
// Objective: Provide symbol kinds and the scope arena the builder
//            walks while resolving identifiers
//==================================================

pub mod builder;

pub use builder::{Builder, Diagnostic};

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Parameter,
    StructField,
    Struct,
    Constant,
    Module,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Function => "function",
            SymbolKind::Parameter => "parameter",
            SymbolKind::StructField => "struct_field",
            SymbolKind::Struct => "struct",
            SymbolKind::Constant => "constant",
            SymbolKind::Module => "module",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

/// One scope in the arena. Scopes form a tree through parent indices,
/// the teacher pattern for arenas without reference counting.
#[derive(Debug)]
pub struct Scope {
    pub name: String,
    pub parent: Option<usize>,
    pub symbols: HashMap<String, Symbol>,
}

impl Scope {
    pub fn new(name: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            parent,
            symbols: HashMap::new(),
        }
    }
}
