use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use std::collections::HashMap;

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("to_upper".to_string(), builtin("to_upper", to_upper));
    members.insert("to_lower".to_string(), builtin("to_lower", to_lower));
    members.insert("split".to_string(), builtin("split", split));
    members.insert("join".to_string(), builtin("join", join));
    members.insert("contains".to_string(), builtin("contains", contains));
    members.insert("replace".to_string(), builtin("replace", replace));
    members.insert("trim".to_string(), builtin("trim", trim));
    members.insert("trim_left".to_string(), builtin("trim_left", trim_left));
    members.insert("trim_right".to_string(), builtin("trim_right", trim_right));
    members.insert("starts_with".to_string(), builtin("starts_with", starts_with));
    members.insert("ends_with".to_string(), builtin("ends_with", ends_with));
    members.insert("index".to_string(), builtin("index", index));
    members.insert("count".to_string(), builtin("count", count));
    members.insert("repeat".to_string(), builtin("repeat", repeat));
    members.insert("reverse".to_string(), builtin("reverse", reverse));
    Value::Module(ModuleObject::new("strings", members))
}

fn one_string<'a>(
    args: &'a [Value],
    name: &str,
    position: Position,
) -> Result<&'a str, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("strings.{}() takes 1 argument", name),
        ));
    }
    match &args[0] {
        Value::String(s) => Ok(s),
        _ => Err(RuntimeError::new(position, "argument must be a string")),
    }
}

fn two_strings<'a>(
    args: &'a [Value],
    name: &str,
    position: Position,
) -> Result<(&'a str, &'a str), RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            position,
            format!("strings.{}() takes 2 arguments", name),
        ));
    }
    match (&args[0], &args[1]) {
        (Value::String(a), Value::String(b)) => Ok((a, b)),
        _ => Err(RuntimeError::new(position, "both arguments must be strings")),
    }
}

fn to_upper(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let s = one_string(args, "to_upper", position)?;
    Ok(Value::String(s.to_uppercase()))
}

fn to_lower(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let s = one_string(args, "to_lower", position)?;
    Ok(Value::String(s.to_lowercase()))
}

fn split(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let (s, separator) = two_strings(args, "split", position)?;
    let parts: Vec<Value> = if separator.is_empty() {
        s.chars().map(|c| Value::String(c.to_string())).collect()
    } else {
        s.split(separator)
            .map(|part| Value::String(part.to_string()))
            .collect()
    };
    Ok(Value::array(parts))
}

fn join(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(position, "strings.join() takes 2 arguments"));
    }
    match (&args[0], &args[1]) {
        (Value::Array(elements), Value::String(separator)) => {
            let parts: Vec<String> = elements.borrow().iter().map(ToString::to_string).collect();
            Ok(Value::String(parts.join(separator)))
        }
        _ => Err(RuntimeError::new(
            position,
            "first argument must be an array, second must be a string",
        )),
    }
}

fn contains(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let (s, needle) = two_strings(args, "contains", position)?;
    Ok(Value::Boolean(s.contains(needle)))
}

fn replace(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 3 {
        return Err(RuntimeError::new(
            position,
            "strings.replace() takes 3 arguments: string, old, new",
        ));
    }
    match (&args[0], &args[1], &args[2]) {
        (Value::String(s), Value::String(old), Value::String(new)) => {
            Ok(Value::String(s.replace(old.as_str(), new)))
        }
        _ => Err(RuntimeError::new(position, "all arguments must be strings")),
    }
}

fn trim(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let s = one_string(args, "trim", position)?;
    Ok(Value::String(s.trim().to_string()))
}

fn trim_left(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let s = one_string(args, "trim_left", position)?;
    Ok(Value::String(
        s.trim_start_matches([' ', '\t', '\n', '\r']).to_string(),
    ))
}

fn trim_right(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let s = one_string(args, "trim_right", position)?;
    Ok(Value::String(
        s.trim_end_matches([' ', '\t', '\n', '\r']).to_string(),
    ))
}

fn starts_with(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let (s, prefix) = two_strings(args, "starts_with", position)?;
    Ok(Value::Boolean(s.starts_with(prefix)))
}

fn ends_with(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let (s, suffix) = two_strings(args, "ends_with", position)?;
    Ok(Value::Boolean(s.ends_with(suffix)))
}

fn index(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let (s, needle) = two_strings(args, "index", position)?;
    let found = s.find(needle).map(|i| i as i64).unwrap_or(-1);
    Ok(Value::Integer(found))
}

fn count(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let (s, needle) = two_strings(args, "count", position)?;
    if needle.is_empty() {
        return Ok(Value::Integer(s.chars().count() as i64 + 1));
    }
    Ok(Value::Integer(s.matches(needle).count() as i64))
}

fn repeat(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            position,
            "strings.repeat() takes 2 arguments: string and count",
        ));
    }
    match (&args[0], &args[1]) {
        (Value::String(s), Value::Integer(count)) if *count >= 0 => {
            Ok(Value::String(s.repeat(*count as usize)))
        }
        (Value::String(_), Value::Integer(_)) => {
            Err(RuntimeError::new(position, "repeat count must be non-negative"))
        }
        _ => Err(RuntimeError::new(
            position,
            "first argument must be a string, second must be an integer",
        )),
    }
}

// Reverses by Unicode scalar values, so double-reversal restores the
// original string.
fn reverse(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let s = one_string(args, "reverse", position)?;
    Ok(Value::String(s.chars().rev().collect()))
}
