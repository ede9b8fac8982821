use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use std::collections::HashMap;

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("now".to_string(), builtin("now", now));
    members.insert("sleep".to_string(), builtin("sleep", sleep));
    members.insert("unix".to_string(), builtin("unix", unix));
    members.insert("format".to_string(), builtin("format", format));
    members.insert("since".to_string(), builtin("since", since));
    members.insert("year".to_string(), builtin("year", year));
    members.insert("month".to_string(), builtin("month", month));
    members.insert("day".to_string(), builtin("day", day));
    members.insert("hour".to_string(), builtin("hour", hour));
    members.insert("minute".to_string(), builtin("minute", minute));
    members.insert("second".to_string(), builtin("second", second));
    members.insert(
        "RFC3339".to_string(),
        Value::String("%Y-%m-%dT%H:%M:%S%:z".to_string()),
    );
    members.insert("Kitchen".to_string(), Value::String("%-I:%M%p".to_string()));
    Value::Module(ModuleObject::new("time", members))
}

fn expect_time(
    args: &[Value],
    name: &str,
    position: Position,
) -> Result<DateTime<Local>, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("time.{}() takes 1 argument (Time)", name),
        ));
    }
    match &args[0] {
        Value::Time(t) => Ok(*t),
        _ => Err(RuntimeError::new(position, "argument must be a Time object")),
    }
}

fn now(_ev: &mut Evaluator, _position: Position, _args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::Time(Local::now()))
}

fn sleep(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "time.sleep() takes 1 argument (ms)"));
    }
    match &args[0] {
        Value::Integer(ms) if *ms >= 0 => {
            std::thread::sleep(std::time::Duration::from_millis(*ms as u64));
            Ok(Value::Null)
        }
        Value::Integer(_) => Err(RuntimeError::new(position, "sleep duration must be non-negative")),
        _ => Err(RuntimeError::new(
            position,
            "argument to time.sleep must be an integer",
        )),
    }
}

fn unix(_ev: &mut Evaluator, _position: Position, _args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::Integer(Utc::now().timestamp()))
}

fn format(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            position,
            "time.format() takes 2 arguments: time and layout",
        ));
    }
    match (&args[0], &args[1]) {
        (Value::Time(t), Value::String(layout)) => {
            let items: Vec<Item> = StrftimeItems::new(layout).collect();
            if items.iter().any(|item| matches!(item, Item::Error)) {
                return Err(RuntimeError::new(
                    position,
                    format!("invalid time layout: {:?}", layout),
                ));
            }
            Ok(Value::String(
                t.format_with_items(items.into_iter()).to_string(),
            ))
        }
        _ => Err(RuntimeError::new(position, "arguments must be (Time, String)")),
    }
}

fn since(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let t = expect_time(args, "since", position)?;
    let elapsed = Local::now().signed_duration_since(t);
    Ok(Value::Integer(elapsed.num_milliseconds()))
}

fn year(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let t = expect_time(args, "year", position)?;
    Ok(Value::Integer(i64::from(t.year())))
}

fn month(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let t = expect_time(args, "month", position)?;
    Ok(Value::Integer(i64::from(t.month())))
}

fn day(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let t = expect_time(args, "day", position)?;
    Ok(Value::Integer(i64::from(t.day())))
}

fn hour(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let t = expect_time(args, "hour", position)?;
    Ok(Value::Integer(i64::from(t.hour())))
}

fn minute(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let t = expect_time(args, "minute", position)?;
    Ok(Value::Integer(i64::from(t.minute())))
}

fn second(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let t = expect_time(args, "second", position)?;
    Ok(Value::Integer(i64::from(t.second())))
}
