use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{HashPair, ModuleObject, RuntimeError, ServerObject, Signal, Value};
use crate::tokenizer::Position;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::rc::Rc;
use tracing::debug;

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("server".to_string(), builtin("server", server));
    Value::Module(ModuleObject::new("net", members))
}

fn server(
    _ev: &mut Evaluator,
    _position: Position,
    _args: &[Value],
) -> Result<Value, RuntimeError> {
    Ok(Value::Server(Rc::new(RefCell::new(ServerObject::default()))))
}

/// Method dispatch for server values. Route handlers are ordinary
/// functions applied through the evaluator when a request matches.
pub fn server_method(
    ev: &mut Evaluator,
    server: &Rc<RefCell<ServerObject>>,
    method: &str,
    args: Vec<Value>,
    position: Position,
) -> Result<Value, Signal> {
    match method {
        "get" => register_route(server, "GET", args, position),
        "post" => register_route(server, "POST", args, position),
        "listen" => listen(ev, server, args, position),
        other => Err(RuntimeError::new(
            position,
            format!("server has no member: {}", other),
        )
        .into()),
    }
}

fn register_route(
    server: &Rc<RefCell<ServerObject>>,
    method: &str,
    args: Vec<Value>,
    position: Position,
) -> Result<Value, Signal> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            position,
            format!("server.{}() takes 2 arguments: path and handler", method.to_lowercase()),
        )
        .into());
    }
    let Value::String(path) = &args[0] else {
        return Err(RuntimeError::new(position, "path must be a string").into());
    };
    match &args[1] {
        Value::Function(_) | Value::Builtin(_) => {}
        other => {
            return Err(RuntimeError::new(
                position,
                format!("handler must be a function, got {}", other.type_name()),
            )
            .into())
        }
    }

    server
        .borrow_mut()
        .routes
        .insert((method.to_string(), path.clone()), args[1].clone());
    Ok(Value::Null)
}

// Blocking accept loop; the interpreter is single-threaded, so every
// request is served on the calling thread.
fn listen(
    ev: &mut Evaluator,
    server: &Rc<RefCell<ServerObject>>,
    args: Vec<Value>,
    position: Position,
) -> Result<Value, Signal> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "listen expects 1 argument (port)").into());
    }
    let Value::Integer(port) = &args[0] else {
        return Err(RuntimeError::new(position, "port must be an integer").into());
    };

    let listener = TcpListener::bind(("127.0.0.1", *port as u16)).map_err(|err| {
        RuntimeError::new(position, format!("could not bind port {}: {}", port, err))
    })?;
    debug!(port, "server listening");

    for stream in listener.incoming() {
        let Ok(stream) = stream else { continue };
        if let Err(err) = handle_connection(ev, server, stream, position) {
            debug!(error = %err, "request handling failed");
        }
    }
    Ok(Value::Null)
}

fn handle_connection(
    ev: &mut Evaluator,
    server: &Rc<RefCell<ServerObject>>,
    stream: TcpStream,
    position: Position,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("/").to_string();

    // Drain headers; the body is ignored for routing purposes.
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
    }

    let handler = server.borrow().routes.get(&(method.clone(), path.clone())).cloned();
    let (status_line, body) = match handler {
        Some(handler) => {
            let request = request_value(&method, &path);
            match ev.apply_function(handler, vec![request], position) {
                Ok(value) => ("HTTP/1.1 200 OK", value.to_string()),
                Err(Signal::Error(error)) => {
                    ("HTTP/1.1 500 Internal Server Error", error.to_string())
                }
                Err(_) => ("HTTP/1.1 500 Internal Server Error", "handler aborted".to_string()),
            }
        }
        None => ("HTTP/1.1 404 Not Found", "not found".to_string()),
    };

    let mut stream = reader.into_inner();
    write!(
        stream,
        "{}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )?;
    stream.flush()
}

fn request_value(method: &str, path: &str) -> Value {
    let mut pairs = HashMap::new();
    for (key, value) in [("method", method), ("path", path)] {
        let key_value = Value::String(key.to_string());
        let hash_key = key_value.hash_key().expect("strings are hashable");
        pairs.insert(
            hash_key,
            HashPair {
                key: key_value,
                value: Value::String(value.to_string()),
            },
        );
    }
    Value::hash(pairs)
}
