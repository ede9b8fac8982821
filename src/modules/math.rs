use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use std::collections::HashMap;

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("PI".to_string(), Value::Float(std::f64::consts::PI));
    members.insert("E".to_string(), Value::Float(std::f64::consts::E));
    members.insert("sqrt".to_string(), builtin("sqrt", sqrt));
    members.insert("floor".to_string(), builtin("floor", floor));
    members.insert("pow".to_string(), builtin("pow", pow));
    members.insert("abs".to_string(), builtin("abs", abs));
    members.insert("sin".to_string(), builtin("sin", sin));
    members.insert("cos".to_string(), builtin("cos", cos));
    members.insert("tan".to_string(), builtin("tan", tan));
    members.insert("round".to_string(), builtin("round", round));
    members.insert("ceil".to_string(), builtin("ceil", ceil));
    members.insert("log".to_string(), builtin("log", log));
    members.insert("log10".to_string(), builtin("log10", log10));
    members.insert("exp".to_string(), builtin("exp", exp));
    members.insert("trunc".to_string(), builtin("trunc", trunc));
    members.insert("min".to_string(), builtin("min", min));
    members.insert("max".to_string(), builtin("max", max));
    Value::Module(ModuleObject::new("math", members))
}

fn extract_float(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(n) => Some(*n as f64),
        Value::Float(x) => Some(*x),
        _ => None,
    }
}

fn unary(
    args: &[Value],
    name: &str,
    position: Position,
    op: fn(f64) -> f64,
) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("math.{}() takes 1 argument", name),
        ));
    }
    let x = extract_float(&args[0])
        .ok_or_else(|| RuntimeError::new(position, "argument must be a number"))?;
    Ok(Value::Float(op(x)))
}

fn binary(
    args: &[Value],
    name: &str,
    position: Position,
    op: fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            position,
            format!("math.{}() takes 2 arguments", name),
        ));
    }
    let a = extract_float(&args[0])
        .ok_or_else(|| RuntimeError::new(position, "arguments must be numbers"))?;
    let b = extract_float(&args[1])
        .ok_or_else(|| RuntimeError::new(position, "arguments must be numbers"))?;
    Ok(Value::Float(op(a, b)))
}

fn sqrt(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "sqrt", position, f64::sqrt)
}

fn floor(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "floor", position, f64::floor)
}

fn pow(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    binary(args, "pow", position, f64::powf)
}

fn abs(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "math.abs() takes 1 argument"));
    }
    match &args[0] {
        Value::Integer(n) => Ok(Value::Integer(n.abs())),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        _ => Err(RuntimeError::new(position, "argument must be a number")),
    }
}

fn sin(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "sin", position, f64::sin)
}

fn cos(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "cos", position, f64::cos)
}

fn tan(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "tan", position, f64::tan)
}

fn round(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "round", position, f64::round)
}

fn ceil(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "ceil", position, f64::ceil)
}

fn log(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "log", position, f64::ln)
}

fn log10(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "log10", position, f64::log10)
}

fn exp(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "exp", position, f64::exp)
}

fn trunc(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(args, "trunc", position, f64::trunc)
}

fn min(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    binary(args, "min", position, f64::min)
}

fn max(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    binary(args, "max", position, f64::max)
}
