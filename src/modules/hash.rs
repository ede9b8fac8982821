use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use std::collections::HashMap;

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("keys".to_string(), builtin("keys", keys));
    members.insert("values".to_string(), builtin("values", values));
    members.insert("has_key".to_string(), builtin("has_key", has_key));
    members.insert("merge".to_string(), builtin("merge", merge));
    members.insert("delete".to_string(), builtin("delete", delete));
    Value::Module(ModuleObject::new("hash", members))
}

fn keys(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "hash.keys() takes 1 argument"));
    }
    match &args[0] {
        Value::Hash(pairs) => {
            let keys: Vec<Value> = pairs.borrow().values().map(|p| p.key.clone()).collect();
            Ok(Value::array(keys))
        }
        _ => Err(RuntimeError::new(position, "argument must be a hash")),
    }
}

fn values(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "hash.values() takes 1 argument"));
    }
    match &args[0] {
        Value::Hash(pairs) => {
            let values: Vec<Value> = pairs.borrow().values().map(|p| p.value.clone()).collect();
            Ok(Value::array(values))
        }
        _ => Err(RuntimeError::new(position, "argument must be a hash")),
    }
}

fn has_key(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            position,
            "hash.has_key() takes 2 arguments: hash and key",
        ));
    }
    let Value::Hash(pairs) = &args[0] else {
        return Err(RuntimeError::new(position, "first argument must be a hash"));
    };
    let key = args[1]
        .hash_key()
        .ok_or_else(|| RuntimeError::new(position, "key must be hashable"))?;
    Ok(Value::Boolean(pairs.borrow().contains_key(&key)))
}

fn merge(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(position, "hash.merge() takes 2 arguments"));
    }
    match (&args[0], &args[1]) {
        (Value::Hash(a), Value::Hash(b)) => {
            let mut merged = a.borrow().clone();
            for (key, pair) in b.borrow().iter() {
                merged.insert(*key, pair.clone());
            }
            Ok(Value::hash(merged))
        }
        _ => Err(RuntimeError::new(position, "both arguments must be hashes")),
    }
}

fn delete(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            position,
            "hash.delete() takes 2 arguments: hash and key",
        ));
    }
    let Value::Hash(pairs) = &args[0] else {
        return Err(RuntimeError::new(position, "first argument must be a hash"));
    };
    let key = args[1]
        .hash_key()
        .ok_or_else(|| RuntimeError::new(position, "key must be hashable"))?;
    pairs.borrow_mut().remove(&key);
    Ok(args[0].clone())
}
