use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("print".to_string(), builtin("print", print));
    members.insert("printf".to_string(), builtin("printf", printf));
    members.insert("len".to_string(), builtin("len", len));
    members.insert("typeof".to_string(), builtin("typeof", typeof_fn));
    members.insert("int".to_string(), builtin("int", int));
    members.insert("float".to_string(), builtin("float", float));
    members.insert("input".to_string(), builtin("input", input));
    members.insert("exit".to_string(), builtin("exit", exit));
    members.insert("clear".to_string(), builtin("clear", clear));
    Value::Module(ModuleObject::new("fmt", members))
}

pub(crate) fn print(
    _ev: &mut Evaluator,
    _position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
    println!("{}", rendered.join(" "));
    Ok(Value::Null)
}

pub(crate) fn printf(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let Some(Value::String(format)) = args.first() else {
        return Err(RuntimeError::new(
            position,
            "fmt.printf() first argument must be a string",
        ));
    };
    println!("{}", format_directives(format, &args[1..]));
    Ok(Value::Null)
}

// Minimal directive support: %v/%s/%d/%f consume the next argument,
// %% emits a literal percent sign.
fn format_directives(format: &str, args: &[Value]) -> String {
    let mut out = String::new();
    let mut next = 0;
    let mut chars = format.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some('v') | Some('s') | Some('d') | Some('f') => {
                match args.get(next) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str("%!(MISSING)"),
                }
                next += 1;
            }
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}

pub(crate) fn len(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("wrong number of arguments. got={}, want=1", args.len()),
        ));
    }
    match &args[0] {
        Value::Array(elements) => Ok(Value::Integer(elements.borrow().len() as i64)),
        Value::String(s) => Ok(Value::Integer(s.len() as i64)),
        other => Err(RuntimeError::new(
            position,
            format!(
                "argument to `len` not supported, got {}",
                other.type_name()
            ),
        )),
    }
}

pub(crate) fn typeof_fn(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("wrong number of arguments. got={}, want=1", args.len()),
        ));
    }
    Ok(Value::String(args[0].type_name().to_string()))
}

pub(crate) fn int(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("wrong number of arguments. got={}, want=1", args.len()),
        ));
    }
    match &args[0] {
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| {
                RuntimeError::new(position, format!("could not parse {:?} as integer", s))
            }),
        other => Err(RuntimeError::new(
            position,
            format!("input must be a string, got {}", other.type_name()),
        )),
    }
}

pub(crate) fn float(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("wrong number of arguments. got={}, want=1", args.len()),
        ));
    }
    match &args[0] {
        Value::Integer(n) => Ok(Value::Float(*n as f64)),
        Value::String(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
            RuntimeError::new(position, format!("could not parse {:?} as float", s))
        }),
        other => Err(RuntimeError::new(
            position,
            format!("input must be a string or an int, got {}", other.type_name()),
        )),
    }
}

pub(crate) fn input(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("wrong number of arguments. got={}, want=1", args.len()),
        ));
    }
    let Value::String(prompt) = &args[0] else {
        return Err(RuntimeError::new(position, "input must be a string"));
    };

    print!("{}: ", prompt);
    let _ = io::stdout().flush();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| RuntimeError::new(position, format!("failed to read input: {}", err)))?;
    while line.ends_with(['\n', '\r']) {
        line.pop();
    }
    Ok(Value::String(line))
}

pub(crate) fn exit(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            format!("wrong number of arguments. got={}, want=1", args.len()),
        ));
    }
    match &args[0] {
        Value::Integer(code) => std::process::exit(*code as i32),
        other => Err(RuntimeError::new(
            position,
            format!("input must be an int, got {}", other.type_name()),
        )),
    }
}

pub(crate) fn clear(
    _ev: &mut Evaluator,
    position: Position,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    if !args.is_empty() {
        return Err(RuntimeError::new(position, "function doesn't take any input"));
    }

    let mut command = if cfg!(windows) {
        let mut cmd = std::process::Command::new("cmd");
        cmd.args(["/c", "cls"]);
        cmd
    } else {
        std::process::Command::new("clear")
    };
    let _ = command.status();
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_formatting() {
        let args = [Value::Integer(3), Value::String("cats".to_string())];
        assert_eq!(format_directives("%d %s, 100%%", &args), "3 cats, 100%");
        assert_eq!(format_directives("%v and %v", &args[..1]), "3 and %!(MISSING)");
    }
}
