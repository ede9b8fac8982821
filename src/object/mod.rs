//=====================================================
// File: object.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Code-Lang runtime value model
// Objective: Define the Value sum type, hash keys for hashable values,
//            runtime errors and the control-flow signal carriers
//=====================================================

pub mod environment;

pub use environment::{Environment, EnvRef};

use crate::ast::{BlockStatement, Identifier};
use crate::tokenizer::Position;
use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

// FNV-1a 64, used for string hash keys.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Signature of a native builtin: the evaluator (so builtins can apply
/// user functions), the call's source position, and the argument slice.
pub type BuiltinFn =
    fn(&mut crate::evaluator::Evaluator, Position, &[Value]) -> Result<Value, RuntimeError>;

/// A user-defined function together with its captured environment.
#[derive(Debug)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: EnvRef,
}

/// An opaque host-provided callable.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

/// A named collection of members, produced by `import` or seeded by the
/// built-in registry.
#[derive(Debug)]
pub struct ModuleObject {
    pub name: String,
    pub members: RefCell<HashMap<String, Value>>,
}

impl ModuleObject {
    pub fn new(name: impl Into<String>, members: HashMap<String, Value>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            members: RefCell::new(members),
        })
    }
}

/// Route table and member map backing `net.server()` values.
#[derive(Debug, Default)]
pub struct ServerObject {
    pub routes: HashMap<(String, String), Value>,
    pub members: HashMap<String, Value>,
}

/// Struct template: field defaults evaluated at declaration time.
#[derive(Debug, PartialEq)]
pub struct StructType {
    pub name: String,
    pub defaults: HashMap<String, Value>,
}

/// A created record: template defaults overridden by the literal's fields.
#[derive(Debug, PartialEq)]
pub struct StructInstance {
    pub type_name: String,
    pub fields: HashMap<String, Value>,
}

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Char(char),
    String(String),
    Null,
    Array(Rc<RefCell<Vec<Value>>>),
    Hash(Rc<RefCell<HashMap<HashKey, HashPair>>>),
    Function(Rc<Function>),
    Builtin(Builtin),
    Module(Rc<ModuleObject>),
    Server(Rc<RefCell<ServerObject>>),
    StructType(Rc<StructType>),
    StructInstance(Rc<RefCell<StructInstance>>),
    Time(DateTime<Local>),
}

impl Value {
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn hash(pairs: HashMap<HashKey, HashPair>) -> Self {
        Value::Hash(Rc::new(RefCell::new(pairs)))
    }

    /// The type tag reported by `typeof` and used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::Boolean(_) => "BOOLEAN",
            Value::Char(_) => "CHAR",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::Module(_) => "MODULE",
            Value::Server(_) => "SERVER",
            Value::StructType(_) => "STRUCT_TYPE",
            Value::StructInstance(_) => "STRUCT_INSTANCE",
            Value::Time(_) => "TIME",
        }
    }

    /// Everything is truthy except `null` and `false`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// Hash-key for hashable values (Integer, Boolean, String); `None`
    /// for everything else.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey {
                kind: "INTEGER",
                value: *n as u64,
            }),
            Value::Boolean(b) => Some(HashKey {
                kind: "BOOLEAN",
                value: u64::from(*b),
            }),
            Value::String(s) => Some(HashKey {
                kind: "STRING",
                value: fnv1a_64(s.as_bytes()),
            }),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Hash(a), Value::Hash(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Module(a), Value::Module(b)) => Rc::ptr_eq(a, b),
            (Value::Server(a), Value::Server(b)) => Rc::ptr_eq(a, b),
            (Value::StructType(a), Value::StructType(b)) => Rc::ptr_eq(a, b),
            (Value::StructInstance(a), Value::StructInstance(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Time(a), Value::Time(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::String(s) => f.write_str(s),
            Value::Null => f.write_str("null"),
            Value::Array(elements) => {
                let rendered: Vec<String> =
                    elements.borrow().iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Value::Hash(pairs) => {
                let rendered: Vec<String> = pairs
                    .borrow()
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Value::Function(func) => {
                let params: Vec<String> =
                    func.parameters.iter().map(ToString::to_string).collect();
                write!(f, "fn({}) {}", params.join(", "), func.body)
            }
            Value::Builtin(_) => f.write_str("builtin function"),
            Value::Module(module) => {
                let members = module.members.borrow();
                let rendered: Vec<String> = members
                    .iter()
                    .map(|(name, value)| format!("{}: {}", name, value))
                    .collect();
                write!(f, "Module{{{}}}", rendered.join(", "))
            }
            Value::Server(_) => f.write_str("server"),
            Value::StructType(st) => write!(f, "struct {}", st.name),
            Value::StructInstance(instance) => f.write_str(&instance.borrow().type_name),
            Value::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Bucket key for hash storage: the value's type tag plus a 64-bit
/// bucket. Integers use their two's-complement bits, booleans 0/1,
/// strings FNV-1a 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: &'static str,
    pub value: u64,
}

/// Stored entry: the original key value alongside the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// A positioned runtime error; first-class in the language in the sense
/// that it propagates as a value until a host boundary surfaces it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[Line {line}, Column {column}] ERROR: {message}")]
pub struct RuntimeError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl RuntimeError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: position.line,
            column: position.column,
        }
    }
}

/// Result states of a sub-evaluation. `Return`, `Break` and `Continue`
/// unwind to the nearest function or loop boundary; `Error` propagates
/// until the host surfaces it.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Return(Value),
    Break,
    Continue,
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Signal::Error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_like_equality() {
        assert_eq!(Value::Null, Value::Null);
        assert_eq!(Value::Boolean(true), Value::Boolean(true));
        assert_ne!(Value::Boolean(true), Value::Boolean(false));
        assert_ne!(Value::Null, Value::Boolean(false));
    }

    #[test]
    fn string_hash_keys_are_stable_and_distinct() {
        let a = Value::String("Hello World".to_string());
        let b = Value::String("Hello World".to_string());
        let c = Value::String("Hello World!".to_string());
        assert_eq!(a.hash_key(), b.hash_key());
        assert_ne!(a.hash_key(), c.hash_key());
    }

    #[test]
    fn integer_and_boolean_hash_keys() {
        assert_eq!(
            Value::Integer(-1).hash_key().unwrap().value,
            (-1i64) as u64
        );
        assert_eq!(Value::Boolean(true).hash_key().unwrap().value, 1);
        assert_eq!(Value::Boolean(false).hash_key().unwrap().value, 0);
        assert_ne!(
            Value::Integer(1).hash_key(),
            Value::Boolean(true).hash_key()
        );
    }

    #[test]
    fn unhashable_values_have_no_key() {
        assert!(Value::array(vec![]).hash_key().is_none());
        assert!(Value::Null.hash_key().is_none());
        assert!(Value::Float(1.0).hash_key().is_none());
    }

    #[test]
    fn truthiness_spares_only_null_and_false() {
        assert!(Value::Integer(0).is_truthy());
        assert!(Value::Float(0.0).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
        assert!(Value::array(vec![]).is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
    }

    #[test]
    fn runtime_error_rendering() {
        let err = RuntimeError::new(Position::new(3, 7), "identifier not found: x");
        assert_eq!(
            err.to_string(),
            "[Line 3, Column 7] ERROR: identifier not found: x"
        );
    }
}
