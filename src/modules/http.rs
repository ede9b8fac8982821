use super::builtin;
use crate::evaluator::Evaluator;
use crate::object::{ModuleObject, RuntimeError, Value};
use crate::tokenizer::Position;
use std::collections::HashMap;

pub fn module() -> Value {
    let mut members = HashMap::new();
    members.insert("get".to_string(), builtin("get", get));
    members.insert("post".to_string(), builtin("post", post));
    members.insert("patch".to_string(), builtin("patch", patch));
    members.insert("delete".to_string(), builtin("delete", delete));
    Value::Module(ModuleObject::new("http", members))
}

fn expect_url<'a>(args: &'a [Value], position: Position) -> Result<&'a str, RuntimeError> {
    match args.first() {
        Some(Value::String(url)) => Ok(url),
        _ => Err(RuntimeError::new(position, "url must be a string")),
    }
}

fn body_and_content_type<'a>(
    args: &'a [Value],
    name: &str,
    position: Position,
) -> Result<(&'a str, &'a str), RuntimeError> {
    if args.len() < 2 || args.len() > 3 {
        return Err(RuntimeError::new(
            position,
            format!("http.{}() expects 2 or 3 arguments (url, body, [contentType])", name),
        ));
    }
    let Value::String(body) = &args[1] else {
        return Err(RuntimeError::new(position, "body must be a string"));
    };
    let content_type = match args.get(2) {
        Some(Value::String(ct)) => ct.as_str(),
        Some(_) => return Err(RuntimeError::new(position, "contentType must be a string")),
        None => "application/json",
    };
    Ok((body, content_type))
}

// Non-2xx statuses still produce a response value; only transport
// failures become errors.
fn eval_response(
    position: Position,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<Value, RuntimeError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(err) => {
            return Err(RuntimeError::new(
                position,
                format!("http request failed: {}", err),
            ))
        }
    };

    let status = response.status();
    let mut headers = HashMap::new();
    for name in response.headers_names() {
        let values: Vec<Value> = response
            .all(&name)
            .into_iter()
            .map(|value| Value::String(value.to_string()))
            .collect();
        headers.insert(name.clone(), Value::array(values));
    }

    let body = response.into_string().map_err(|err| {
        RuntimeError::new(
            position,
            format!("failed to read the http response: {}", err),
        )
    })?;

    let mut members = HashMap::new();
    members.insert("status".to_string(), Value::Integer(i64::from(status)));
    members.insert("body".to_string(), Value::String(body));
    members.insert(
        "headers".to_string(),
        Value::Module(ModuleObject::new("headers", headers)),
    );
    Ok(Value::Module(ModuleObject::new("response", members)))
}

fn get(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(position, "http.get expects 1 argument (url)"));
    }
    let url = expect_url(args, position)?;
    eval_response(position, ureq::get(url).call())
}

fn post(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let url = expect_url(args, position)?;
    let (body, content_type) = body_and_content_type(args, "post", position)?;
    eval_response(
        position,
        ureq::post(url)
            .set("Content-Type", content_type)
            .send_string(body),
    )
}

fn patch(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    let url = expect_url(args, position)?;
    let (body, content_type) = body_and_content_type(args, "patch", position)?;
    eval_response(
        position,
        ureq::request("PATCH", url)
            .set("Content-Type", content_type)
            .send_string(body),
    )
}

fn delete(_ev: &mut Evaluator, position: Position, args: &[Value]) -> Result<Value, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::new(
            position,
            "http.delete expects 1 argument (url)",
        ));
    }
    let url = expect_url(args, position)?;
    eval_response(position, ureq::delete(url).call())
}
