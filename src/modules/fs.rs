use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use std::collections::HashMap;

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("readfile".to_string(), builtin("readfile", readfile));
    members.insert("writefile".to_string(), builtin("writefile", writefile));
    Value::Module(ModuleObject::new("fs", members))
}

fn readfile(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "fs.readfile() takes 1 argument"));
    }
    let Value::String(path) = &args[0] else {
        return Err(RuntimeError::new(position, "argument must be a string"));
    };

    std::fs::read_to_string(path)
        .map(Value::String)
        .map_err(|err| RuntimeError::new(position, format!("could not read {}: {}", path, err)))
}

fn writefile(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(position, "fs.writefile() takes 2 arguments"));
    }
    let Value::String(path) = &args[0] else {
        return Err(RuntimeError::new(
            position,
            "fs.writefile() first argument must be a string",
        ));
    };
    let Value::String(data) = &args[1] else {
        return Err(RuntimeError::new(
            position,
            "fs.writefile() second argument must be a string",
        ));
    };

    std::fs::write(path, data)
        .map(|_| Value::Boolean(true))
        .map_err(|err| RuntimeError::new(position, format!("failed to write {}: {}", path, err)))
}
