use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("first".to_string(), builtin("first", first));
    members.insert("last".to_string(), builtin("last", last));
    members.insert("rest".to_string(), builtin("rest", rest));
    members.insert("push".to_string(), builtin("push", push));
    Value::Module(ModuleObject::new("arrays", members))
}

fn expect_array<'a>(
    args: &'a [Value],
    name: &str,
    position: Position,
) -> Result<&'a Rc<RefCell<Vec<Value>>>, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("wrong number of arguments. got={}, want=1", args.len()),
        ));
    }
    match &args[0] {
        Value::Array(elements) => Ok(elements),
        other => Err(RuntimeError::new(
            position,
            format!(
                "argument to `{}` must be ARRAY, got {}",
                name,
                other.type_name()
            ),
        )),
    }
}

pub(crate) fn first(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let elements = expect_array(args, "first", position)?;
    let value = elements.borrow().first().cloned().unwrap_or(Value::Null);
    Ok(value)
}

pub(crate) fn last(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let elements = expect_array(args, "last", position)?;
    let value = elements.borrow().last().cloned().unwrap_or(Value::Null);
    Ok(value)
}

pub(crate) fn rest(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let elements = expect_array(args, "rest", position)?;
    let elements = elements.borrow();
    if elements.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Value::array(elements[1..].to_vec()))
}

pub(crate) fn push(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            position,
            format!("wrong number of arguments. got={}, want=2", args.len()),
        ));
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut next = elements.borrow().clone();
            next.push(args[1].clone());
            Ok(Value::array(next))
        }
        other => Err(RuntimeError::new(
            position,
            format!("argument to `push` must be ARRAY, got {}", other.type_name()),
        )),
    }
}
