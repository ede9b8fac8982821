use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{HashPair, ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("parse".to_string(), builtin("parse", parse));
    members.insert("stringify".to_string(), builtin("stringify", stringify));
    Value::Module(ModuleObject::new("json", members))
}

fn parse(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "json.parse() takes 1 argument"));
    }
    let Value::String(text) = &args[0] else {
        return Err(RuntimeError::new(position, "json.parse argument must be a string"));
    };

    let json: JsonValue = serde_json::from_str(text)
        .map_err(|err| RuntimeError::new(position, format!("json.parse error: {}", err)))?;
    Ok(json_to_value(&json))
}

fn stringify(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "json.stringify() takes 1 argument"));
    }
    let json = value_to_json(&args[0]);
    serde_json::to_string(&json)
        .map(Value::String)
        .map_err(|err| RuntimeError::new(position, format!("json.stringify error: {}", err)))
}

fn json_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Boolean(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else {
                Value::Float(n.as_f64().unwrap_or_default())
            }
        }
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => Value::array(items.iter().map(json_to_value).collect()),
        JsonValue::Object(map) => {
            let mut pairs = HashMap::new();
            for (key, item) in map {
                let key_value = Value::String(key.clone());
                let hash_key = key_value.hash_key().expect("strings are hashable");
                pairs.insert(
                    hash_key,
                    HashPair {
                        key: key_value,
                        value: json_to_value(item),
                    },
                );
            }
            Value::hash(pairs)
        }
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Integer(n) => JsonValue::Number((*n).into()),
        Value::Float(x) => serde_json::Number::from_f64(*x)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Char(c) => JsonValue::String(c.to_string()),
        Value::Array(elements) => {
            JsonValue::Array(elements.borrow().iter().map(value_to_json).collect())
        }
        Value::Hash(pairs) => {
            let mut map = serde_json::Map::new();
            for pair in pairs.borrow().values() {
                map.insert(pair.key.to_string(), value_to_json(&pair.value));
            }
            JsonValue::Object(map)
        }
        Value::StructInstance(instance) => {
            let mut map = serde_json::Map::new();
            for (field, value) in &instance.borrow().fields {
                map.insert(field.clone(), value_to_json(value));
            }
            JsonValue::Object(map)
        }
        other => JsonValue::String(other.to_string()),
    }
}
