use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use std::collections::HashMap;

pub fn module() -> Value {
    let args: Vec<Value> = std::env::args().map(Value::String).collect();

    let mut members = HashMap::new();
    members.insert("args".to_string(), Value::array(args));
    members.insert(
        "platform".to_string(),
        Value::String(std::env::consts::OS.to_string()),
    );
    members.insert(
        "arch".to_string(),
        Value::String(std::env::consts::ARCH.to_string()),
    );
    members.insert("get_env".to_string(), builtin("get_env", get_env));
    members.insert("set_env".to_string(), builtin("set_env", set_env));
    members.insert("get_wd".to_string(), builtin("get_wd", get_wd));
    members.insert("exit".to_string(), builtin("exit", exit));
    members.insert("hostname".to_string(), builtin("hostname", hostname));
    Value::Module(ModuleObject::new("os", members))
}

fn get_env(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "os.get_env() takes 1 argument"));
    }
    let Value::String(key) = &args[0] else {
        return Err(RuntimeError::new(position, "argument must be a string"));
    };
    Ok(Value::String(std::env::var(key).unwrap_or_default()))
}

fn set_env(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            position,
            "os.set_env() takes 2 arguments: key and value",
        ));
    }
    match (&args[0], &args[1]) {
        (Value::String(key), Value::String(value)) => {
            std::env::set_var(key, value);
            Ok(Value::Null)
        }
        _ => Err(RuntimeError::new(position, "both arguments must be strings")),
    }
}

fn get_wd(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if !args.is_empty() {
        return Err(RuntimeError::new(position, "os.get_wd() takes no arguments"));
    }
    std::env::current_dir()
        .map(|dir| Value::String(dir.display().to_string()))
        .map_err(|err| {
            RuntimeError::new(position, format!("could not read working directory: {}", err))
        })
}

fn exit(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "os.exit() takes 1 argument"));
    }
    match &args[0] {
        Value::Integer(code) => std::process::exit(*code as i32),
        other => Err(RuntimeError::new(
            position,
            format!("exit code must be an integer, got {}", other.type_name()),
        )),
    }
}

fn hostname(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if !args.is_empty() {
        return Err(RuntimeError::new(position, "os.hostname() takes no arguments"));
    }
    let name = std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());
    Ok(Value::String(name))
}
