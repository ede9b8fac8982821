//=====================================================
// File: evaluator.rs
//=====================================================
// Author: SolvraOS Contributors
// License: Duality Public License (DPL v1.0)
// Goal: Code-Lang tree-walking evaluator
// Objective: Recursively evaluate the AST, driving the value model and
//            environment chain, with control flow carried as signals
//=====================================================

use crate::ast::{BlockStatement, Expr, Identifier, Program, Stmt};
use crate::object::{
    Environment, EnvRef, Function, HashPair, ModuleObject, RuntimeError, Signal, StructInstance,
    StructType, Value,
};
use crate::parser::{is_assignment_op, Parser};
use crate::tokenizer::Position;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::debug;

const MAX_CALL_DEPTH: usize = 1000;

/// Recursive interpreter over the AST.
///
/// Carries the module cache (seeded with the built-in registry) and a
/// loop-depth counter so `break`/`continue` outside a loop become
/// runtime errors. One evaluator per interpreter invocation; the REPL
/// keeps a single evaluator alive across lines so imports stay cached.
pub struct Evaluator {
    modules: HashMap<String, Value>,
    loop_depth: usize,
    call_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            modules: crate::modules::registry(),
            loop_depth: 0,
            call_depth: 0,
        }
    }

    /// Evaluate a whole program. A `return` at the top level unwraps to
    /// the program result; errors surface to the host.
    pub fn eval_program(
        &mut self,
        program: &Program,
        env: &EnvRef,
    ) -> Result<Option<Value>, RuntimeError> {
        let mut result = None;
        for stmt in &program.statements {
            match self.eval_statement(stmt, env) {
                Ok(value) => result = value,
                Err(Signal::Return(value)) => return Ok(Some(value)),
                Err(Signal::Break) => {
                    return Err(RuntimeError::new(stmt.position(), "break outside loop"))
                }
                Err(Signal::Continue) => {
                    return Err(RuntimeError::new(stmt.position(), "continue outside loop"))
                }
                Err(Signal::Error(error)) => return Err(error),
            }
        }
        Ok(result)
    }

    fn eval_statement(&mut self, stmt: &Stmt, env: &EnvRef) -> Result<Option<Value>, Signal> {
        match stmt {
            Stmt::Let { name, value, .. } => {
                let value = self.eval_expression(value, env)?;
                env.borrow_mut().set(name.name.clone(), value);
                Ok(None)
            }
            Stmt::Const { name, value, .. } => {
                let value = self.eval_expression(value, env)?;
                env.borrow_mut().set_const(name.name.clone(), value);
                Ok(None)
            }
            Stmt::Return { value, .. } => {
                let value = self.eval_expression(value, env)?;
                Err(Signal::Return(value))
            }
            Stmt::Break { position } => {
                if self.loop_depth == 0 {
                    Err(RuntimeError::new(*position, "break outside loop").into())
                } else {
                    Err(Signal::Break)
                }
            }
            Stmt::Continue { position } => {
                if self.loop_depth == 0 {
                    Err(RuntimeError::new(*position, "continue outside loop").into())
                } else {
                    Err(Signal::Continue)
                }
            }
            Stmt::Import { path, position } => {
                self.eval_import(path, *position, env)?;
                Ok(None)
            }
            Stmt::Struct { name, fields, .. } => {
                let mut defaults = HashMap::new();
                for (field, expr) in fields {
                    let value = self.eval_expression(expr, env)?;
                    defaults.insert(field.clone(), value);
                }
                let struct_type = Value::StructType(Rc::new(StructType {
                    name: name.name.clone(),
                    defaults,
                }));
                env.borrow_mut().set(name.name.clone(), struct_type);
                Ok(None)
            }
            Stmt::Expression { expr, .. } => Ok(Some(self.eval_expression(expr, env)?)),
        }
    }

    // Blocks run in a fresh frame so `let` inside never clobbers an
    // outer binding. They propagate every signal unchanged.
    fn eval_block(&mut self, block: &BlockStatement, env: &EnvRef) -> Result<Option<Value>, Signal> {
        let scope = Environment::new_enclosed(env.clone());
        let mut result = None;
        for stmt in &block.statements {
            result = self.eval_statement(stmt, &scope)?;
        }
        Ok(result)
    }

    fn block_value(&mut self, block: &BlockStatement, env: &EnvRef) -> Result<Value, Signal> {
        self.eval_block(block, env)
            .map(|value| value.unwrap_or(Value::Null))
    }

    fn eval_expression(&mut self, expr: &Expr, env: &EnvRef) -> Result<Value, Signal> {
        match expr {
            Expr::Identifier(ident) => self.eval_identifier(ident, env),
            Expr::IntegerLiteral { value, .. } => Ok(Value::Integer(*value)),
            Expr::FloatLiteral { value, .. } => Ok(Value::Float(*value)),
            Expr::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
            Expr::CharLiteral { value, .. } => Ok(Value::Char(*value)),
            Expr::BooleanLiteral { value, .. } => Ok(Value::Boolean(*value)),
            Expr::NullLiteral { .. } => Ok(Value::Null),
            Expr::Prefix {
                operator,
                right,
                position,
            } => {
                let right = self.eval_expression(right, env)?;
                self.eval_prefix(operator, right, *position)
            }
            Expr::Infix {
                left,
                operator,
                right,
                position,
            } => {
                if is_assignment_op(operator) {
                    return self.eval_assignment(operator, left, right, *position, env);
                }
                if operator == "&&" {
                    let left = self.eval_expression(left, env)?;
                    if !left.is_truthy() {
                        return Ok(left);
                    }
                    return self.eval_expression(right, env);
                }
                if operator == "||" {
                    let left = self.eval_expression(left, env)?;
                    if left.is_truthy() {
                        return Ok(left);
                    }
                    return self.eval_expression(right, env);
                }
                let left = self.eval_expression(left, env)?;
                let right = self.eval_expression(right, env)?;
                Ok(self.eval_infix_op(operator, left, right, *position)?)
            }
            Expr::If {
                condition,
                consequence,
                else_ifs,
                alternative,
                ..
            } => {
                if self.eval_expression(condition, env)?.is_truthy() {
                    return self.block_value(consequence, env);
                }
                for arm in else_ifs {
                    if self.eval_expression(&arm.condition, env)?.is_truthy() {
                        return self.block_value(&arm.consequence, env);
                    }
                }
                match alternative {
                    Some(alt) => self.block_value(alt, env),
                    None => Ok(Value::Null),
                }
            }
            Expr::While {
                condition, body, ..
            } => self.eval_while(condition, body, env),
            Expr::For {
                init,
                condition,
                post,
                body,
                ..
            } => self.eval_for(init.as_deref(), condition.as_deref(), post.as_deref(), body, env),
            Expr::Function {
                parameters, body, ..
            } => Ok(Value::Function(Rc::new(Function {
                parameters: parameters.clone(),
                body: body.clone(),
                env: env.clone(),
            }))),
            Expr::Call {
                function,
                arguments,
                position,
            } => self.eval_call(function, arguments, *position, env),
            Expr::Index {
                left,
                index,
                position,
            } => {
                let left = self.eval_expression(left, env)?;
                let index = self.eval_expression(index, env)?;
                Ok(self.eval_index(&left, &index, *position)?)
            }
            Expr::Member {
                object, property, ..
            } => {
                let object = self.eval_expression(object, env)?;
                Ok(self.member_access(&object, property)?)
            }
            Expr::Array { elements, .. } => {
                let elements = self.eval_expressions(elements, env)?;
                Ok(Value::array(elements))
            }
            Expr::Hash { pairs, position } => {
                let mut map = HashMap::new();
                for (key_expr, value_expr) in pairs {
                    let key = self.eval_expression(key_expr, env)?;
                    let hash_key = key.hash_key().ok_or_else(|| {
                        RuntimeError::new(
                            *position,
                            format!("unusable as hash key: {}", key.type_name()),
                        )
                    })?;
                    let value = self.eval_expression(value_expr, env)?;
                    map.insert(hash_key, HashPair { key, value });
                }
                Ok(Value::hash(map))
            }
            Expr::StructLiteral {
                name,
                fields,
                position,
            } => self.eval_struct_literal(name, fields, *position, env),
        }
    }

    fn eval_identifier(&mut self, ident: &Identifier, env: &EnvRef) -> Result<Value, Signal> {
        if let Some(value) = env.borrow().get(&ident.name) {
            return Ok(value);
        }
        if let Some(builtin) = crate::modules::lookup_builtin(&ident.name) {
            return Ok(builtin);
        }
        Err(RuntimeError::new(
            ident.position,
            format!("identifier not found: {}", ident.name),
        )
        .into())
    }

    fn eval_prefix(
        &mut self,
        operator: &str,
        right: Value,
        position: Position,
    ) -> Result<Value, Signal> {
        match operator {
            "!" => Ok(Value::Boolean(!right.is_truthy())),
            "-" => match right {
                Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
                other => Err(RuntimeError::new(
                    position,
                    format!("unknown operator: -{}", other.type_name()),
                )
                .into()),
            },
            _ => Err(RuntimeError::new(
                position,
                format!("unknown operator: {}{}", operator, right.type_name()),
            )
            .into()),
        }
    }

    fn eval_while(
        &mut self,
        condition: &Expr,
        body: &BlockStatement,
        env: &EnvRef,
    ) -> Result<Value, Signal> {
        loop {
            if !self.eval_expression(condition, env)?.is_truthy() {
                break;
            }
            self.loop_depth += 1;
            let outcome = self.eval_block(body, env);
            self.loop_depth -= 1;
            match outcome {
                Ok(_) => {}
                Err(Signal::Break) => break,
                Err(Signal::Continue) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(Value::Null)
    }

    fn eval_for(
        &mut self,
        init: Option<&Stmt>,
        condition: Option<&Expr>,
        post: Option<&Stmt>,
        body: &BlockStatement,
        env: &EnvRef,
    ) -> Result<Value, Signal> {
        // The init statement gets its own frame so the loop variable
        // disappears with the loop.
        let for_env = Environment::new_enclosed(env.clone());
        if let Some(init) = init {
            self.eval_statement(init, &for_env)?;
        }
        loop {
            if let Some(condition) = condition {
                if !self.eval_expression(condition, &for_env)?.is_truthy() {
                    break;
                }
            }
            self.loop_depth += 1;
            let outcome = self.eval_block(body, &for_env);
            self.loop_depth -= 1;
            match outcome {
                Ok(_) => {}
                Err(Signal::Break) => break,
                Err(Signal::Continue) => {}
                Err(other) => return Err(other),
            }
            if let Some(post) = post {
                self.eval_statement(post, &for_env)?;
            }
        }
        Ok(Value::Null)
    }

    fn eval_call(
        &mut self,
        function: &Expr,
        arguments: &[Expr],
        position: Position,
        env: &EnvRef,
    ) -> Result<Value, Signal> {
        let callee = match function {
            Expr::Member {
                object, property, ..
            } => {
                let object = self.eval_expression(object, env)?;
                if let Value::Server(server) = &object {
                    let server = server.clone();
                    let args = self.eval_expressions(arguments, env)?;
                    return crate::modules::net::server_method(
                        self,
                        &server,
                        &property.name,
                        args,
                        position,
                    );
                }
                self.member_access(&object, property)?
            }
            other => self.eval_expression(other, env)?,
        };

        let args = self.eval_expressions(arguments, env)?;
        self.apply_function(callee, args, position)
    }

    /// Apply a function or builtin to already-evaluated arguments.
    /// Parameters bind positionally up to `min(params, args)`; surplus
    /// arguments are ignored and missing ones stay unbound.
    pub fn apply_function(
        &mut self,
        callee: Value,
        args: Vec<Value>,
        position: Position,
    ) -> Result<Value, Signal> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::new(position, "stack overflow").into());
        }

        match callee {
            Value::Function(func) => {
                let frame = Environment::new_enclosed(func.env.clone());
                for (param, arg) in func.parameters.iter().zip(args.into_iter()) {
                    frame.borrow_mut().set(param.name.clone(), arg);
                }

                // A function body is never "inside" the caller's loop.
                let saved_loop_depth = std::mem::take(&mut self.loop_depth);
                self.call_depth += 1;
                let outcome = self.eval_block(&func.body, &frame);
                self.call_depth -= 1;
                self.loop_depth = saved_loop_depth;

                match outcome {
                    Ok(value) => Ok(value.unwrap_or(Value::Null)),
                    Err(Signal::Return(value)) => Ok(value),
                    Err(Signal::Break) => {
                        Err(RuntimeError::new(position, "break outside loop").into())
                    }
                    Err(Signal::Continue) => {
                        Err(RuntimeError::new(position, "continue outside loop").into())
                    }
                    Err(error) => Err(error),
                }
            }
            Value::Builtin(builtin) => {
                self.call_depth += 1;
                let result = (builtin.func)(self, position, &args);
                self.call_depth -= 1;
                Ok(result?)
            }
            other => Err(RuntimeError::new(
                position,
                format!("not a function: {}", other.type_name()),
            )
            .into()),
        }
    }

    fn eval_expressions(&mut self, exprs: &[Expr], env: &EnvRef) -> Result<Vec<Value>, Signal> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            values.push(self.eval_expression(expr, env)?);
        }
        Ok(values)
    }

    fn eval_struct_literal(
        &mut self,
        name: &Identifier,
        fields: &[(String, Expr)],
        position: Position,
        env: &EnvRef,
    ) -> Result<Value, Signal> {
        let template = env.borrow().get(&name.name).ok_or_else(|| {
            RuntimeError::new(
                name.position,
                format!("identifier not found: {}", name.name),
            )
        })?;
        let struct_type = match &template {
            Value::StructType(st) => st.clone(),
            other => {
                return Err(RuntimeError::new(
                    position,
                    format!("not a struct: {}", other.type_name()),
                )
                .into())
            }
        };

        let mut instance_fields = struct_type.defaults.clone();
        for (field, expr) in fields {
            let value = self.eval_expression(expr, env)?;
            instance_fields.insert(field.clone(), value);
        }

        Ok(Value::StructInstance(Rc::new(std::cell::RefCell::new(
            StructInstance {
                type_name: struct_type.name.clone(),
                fields: instance_fields,
            },
        ))))
    }

    //=============================================
    //            Operators
    //=============================================

    fn eval_infix_op(
        &mut self,
        operator: &str,
        left: Value,
        right: Value,
        position: Position,
    ) -> Result<Value, RuntimeError> {
        match (&left, &right) {
            (Value::Integer(a), Value::Integer(b)) => {
                integer_infix(operator, *a, *b, position)
            }
            (Value::Float(a), Value::Float(b)) => float_infix(operator, *a, *b, position),
            (Value::Integer(a), Value::Float(b)) => {
                float_infix(operator, *a as f64, *b, position)
            }
            (Value::Float(a), Value::Integer(b)) => {
                float_infix(operator, *a, *b as f64, position)
            }
            (Value::String(a), Value::String(b)) if operator == "+" => {
                Ok(Value::String(format!("{}{}", a, b)))
            }
            (Value::Char(a), Value::Char(b)) if operator == "+" => {
                Ok(Value::String(format!("{}{}", a, b)))
            }
            (Value::String(a), Value::Char(b)) if operator == "+" => {
                Ok(Value::String(format!("{}{}", a, b)))
            }
            (Value::Char(a), Value::String(b)) if operator == "+" => {
                Ok(Value::String(format!("{}{}", a, b)))
            }
            _ if operator == "==" => Ok(Value::Boolean(left == right)),
            _ if operator == "!=" => Ok(Value::Boolean(left != right)),
            _ => Err(RuntimeError::new(
                position,
                format!(
                    "unknown operator: {} {} {}",
                    left.type_name(),
                    operator,
                    right.type_name()
                ),
            )),
        }
    }

    //=============================================
    //            Assignment
    //=============================================

    fn eval_assignment(
        &mut self,
        operator: &str,
        left: &Expr,
        right: &Expr,
        position: Position,
        env: &EnvRef,
    ) -> Result<Value, Signal> {
        match left {
            Expr::Identifier(ident) => {
                let new_value = if operator == "=" {
                    self.eval_expression(right, env)?
                } else {
                    let current = self.eval_identifier(ident, env)?;
                    let rhs = self.eval_expression(right, env)?;
                    self.eval_infix_op(base_operator(operator), current, rhs, position)?
                };
                // Update the nearest binding; fall back to a fresh
                // binding in the current frame.
                let updated = env.borrow_mut().update(&ident.name, new_value.clone());
                if !updated {
                    env.borrow_mut().set(ident.name.clone(), new_value.clone());
                }
                Ok(new_value)
            }
            Expr::Member {
                object, property, ..
            } => {
                let object = self.eval_expression(object, env)?;
                let rhs = self.eval_expression(right, env)?;
                let new_value = if operator == "=" {
                    rhs
                } else {
                    let current = self.member_access(&object, property)?;
                    self.eval_infix_op(base_operator(operator), current, rhs, position)?
                };
                self.assign_member(&object, property, new_value.clone())?;
                Ok(new_value)
            }
            Expr::Index {
                left: collection,
                index,
                ..
            } => {
                let collection = self.eval_expression(collection, env)?;
                let index = self.eval_expression(index, env)?;
                let rhs = self.eval_expression(right, env)?;
                let new_value = if operator == "=" {
                    rhs
                } else {
                    let current = self.eval_index(&collection, &index, position)?;
                    self.eval_infix_op(base_operator(operator), current, rhs, position)?
                };
                self.assign_index(&collection, &index, new_value.clone(), position)?;
                Ok(new_value)
            }
            other => Err(RuntimeError::new(
                other.position(),
                "invalid left-hand side in assignment",
            )
            .into()),
        }
    }

    fn assign_member(
        &mut self,
        object: &Value,
        property: &Identifier,
        value: Value,
    ) -> Result<(), RuntimeError> {
        match object {
            Value::Hash(pairs) => {
                let key = Value::String(property.name.clone());
                let hash_key = key.hash_key().expect("strings are hashable");
                pairs
                    .borrow_mut()
                    .insert(hash_key, HashPair { key, value });
                Ok(())
            }
            Value::Module(module) => {
                module
                    .members
                    .borrow_mut()
                    .insert(property.name.clone(), value);
                Ok(())
            }
            Value::Server(server) => {
                server
                    .borrow_mut()
                    .members
                    .insert(property.name.clone(), value);
                Ok(())
            }
            other => Err(RuntimeError::new(
                property.position,
                format!(
                    "cannot assign to property {} on {}",
                    property.name,
                    other.type_name()
                ),
            )),
        }
    }

    fn assign_index(
        &mut self,
        collection: &Value,
        index: &Value,
        value: Value,
        position: Position,
    ) -> Result<(), RuntimeError> {
        match (collection, index) {
            (Value::Array(elements), Value::Integer(i)) => {
                let mut elements = elements.borrow_mut();
                let len = elements.len() as i64;
                if *i < 0 || *i >= len {
                    return Err(RuntimeError::new(
                        position,
                        format!("index out of range: {}", i),
                    ));
                }
                elements[*i as usize] = value;
                Ok(())
            }
            (Value::Array(_), other) => Err(RuntimeError::new(
                position,
                format!("array index must be INTEGER, got {}", other.type_name()),
            )),
            (Value::Hash(pairs), key) => {
                let hash_key = key.hash_key().ok_or_else(|| {
                    RuntimeError::new(
                        position,
                        format!("unusable as hash key: {}", key.type_name()),
                    )
                })?;
                pairs.borrow_mut().insert(
                    hash_key,
                    HashPair {
                        key: key.clone(),
                        value,
                    },
                );
                Ok(())
            }
            (other, _) => Err(RuntimeError::new(
                position,
                format!("index operator not supported: {}", other.type_name()),
            )),
        }
    }

    //=============================================
    //            Index and member access
    //=============================================

    fn eval_index(
        &mut self,
        left: &Value,
        index: &Value,
        position: Position,
    ) -> Result<Value, RuntimeError> {
        match (left, index) {
            (Value::Array(elements), Value::Integer(i)) => {
                let elements = elements.borrow();
                if *i < 0 || *i >= elements.len() as i64 {
                    return Ok(Value::Null);
                }
                Ok(elements[*i as usize].clone())
            }
            // Byte indexing, not rune indexing.
            (Value::String(s), Value::Integer(i)) => {
                let bytes = s.as_bytes();
                if *i < 0 || *i >= bytes.len() as i64 {
                    return Ok(Value::Null);
                }
                Ok(Value::String(
                    (bytes[*i as usize] as char).to_string(),
                ))
            }
            (Value::Hash(pairs), key) => {
                let hash_key = key.hash_key().ok_or_else(|| {
                    RuntimeError::new(
                        position,
                        format!("unusable as hash key: {}", key.type_name()),
                    )
                })?;
                Ok(pairs
                    .borrow()
                    .get(&hash_key)
                    .map(|pair| pair.value.clone())
                    .unwrap_or(Value::Null))
            }
            (other, _) => Err(RuntimeError::new(
                position,
                format!("index operator not supported: {}", other.type_name()),
            )),
        }
    }

    fn member_access(
        &mut self,
        object: &Value,
        property: &Identifier,
    ) -> Result<Value, RuntimeError> {
        match object {
            Value::Hash(pairs) => {
                let key = Value::String(property.name.clone());
                let hash_key = key.hash_key().expect("strings are hashable");
                Ok(pairs
                    .borrow()
                    .get(&hash_key)
                    .map(|pair| pair.value.clone())
                    .unwrap_or(Value::Null))
            }
            Value::Module(module) => module
                .members
                .borrow()
                .get(&property.name)
                .cloned()
                .ok_or_else(|| {
                    RuntimeError::new(
                        property.position,
                        format!("module has no member: {}", property.name),
                    )
                }),
            Value::Server(server) => server
                .borrow()
                .members
                .get(&property.name)
                .cloned()
                .ok_or_else(|| {
                    RuntimeError::new(
                        property.position,
                        format!("server has no member: {}", property.name),
                    )
                }),
            Value::StructInstance(instance) => instance
                .borrow()
                .fields
                .get(&property.name)
                .cloned()
                .ok_or_else(|| {
                    RuntimeError::new(
                        property.position,
                        format!("property not found: {}", property.name),
                    )
                }),
            other => Err(RuntimeError::new(
                property.position,
                format!(
                    "cannot access property {} on {}",
                    property.name,
                    other.type_name()
                ),
            )),
        }
    }

    //=============================================
    //            Imports
    //=============================================

    fn eval_import(
        &mut self,
        path: &str,
        position: Position,
        env: &EnvRef,
    ) -> Result<(), Signal> {
        if let Some(module) = self.modules.get(path) {
            let module = module.clone();
            env.borrow_mut().set(path.to_string(), module);
            return Ok(());
        }

        let mut file: PathBuf = std::path::Path::new(path).components().collect();
        file.set_extension("cl");
        debug!(module = path, file = %file.display(), "loading module from file");

        let source = std::fs::read_to_string(&file).map_err(|_| {
            RuntimeError::new(position, format!("could not read module {:?}", path))
        })?;

        let mut parser = Parser::from_source(&source);
        let program = parser.parse_program();
        if let Some(first) = parser.errors().first() {
            return Err(RuntimeError::new(
                position,
                format!("could not parse module {:?}: {}", path, first),
            )
            .into());
        }

        let module_env = Environment::new_enclosed(env.clone());
        self.eval_program(&program, &module_env)
            .map_err(Signal::Error)?;

        let members = module_env.borrow().bindings();
        let module = Value::Module(ModuleObject::new(path, members));
        self.modules.insert(path.to_string(), module.clone());
        env.borrow_mut().set(path.to_string(), module);
        Ok(())
    }
}

fn base_operator(operator: &str) -> &str {
    match operator {
        "+=" => "+",
        "-=" => "-",
        "*=" => "*",
        "/=" => "/",
        "%=" => "%",
        "**=" => "**",
        "//=" => "//",
        other => other,
    }
}

fn integer_infix(
    operator: &str,
    a: i64,
    b: i64,
    position: Position,
) -> Result<Value, RuntimeError> {
    match operator {
        "+" => Ok(Value::Integer(a.wrapping_add(b))),
        "-" => Ok(Value::Integer(a.wrapping_sub(b))),
        "*" => Ok(Value::Integer(a.wrapping_mul(b))),
        "/" => {
            if b == 0 {
                return Err(RuntimeError::new(position, "division by zero"));
            }
            Ok(Value::Integer(a.wrapping_div(b)))
        }
        "%" => {
            if b == 0 {
                return Err(RuntimeError::new(position, "modulus by zero"));
            }
            Ok(Value::Integer(a.wrapping_rem(b)))
        }
        // IEEE power, truncated back to an integer.
        "**" => Ok(Value::Integer((a as f64).powf(b as f64) as i64)),
        "//" => {
            if b == 0 {
                return Err(RuntimeError::new(position, "division by zero"));
            }
            Ok(Value::Integer((a as f64 / b as f64).floor() as i64))
        }
        "<" => Ok(Value::Boolean(a < b)),
        ">" => Ok(Value::Boolean(a > b)),
        "<=" => Ok(Value::Boolean(a <= b)),
        ">=" => Ok(Value::Boolean(a >= b)),
        "==" => Ok(Value::Boolean(a == b)),
        "!=" => Ok(Value::Boolean(a != b)),
        _ => Err(RuntimeError::new(
            position,
            format!("unknown operator: INTEGER {} INTEGER", operator),
        )),
    }
}

fn float_infix(
    operator: &str,
    a: f64,
    b: f64,
    position: Position,
) -> Result<Value, RuntimeError> {
    match operator {
        "+" => Ok(Value::Float(a + b)),
        "-" => Ok(Value::Float(a - b)),
        "*" => Ok(Value::Float(a * b)),
        "/" => {
            if b == 0.0 {
                return Err(RuntimeError::new(position, "division by zero"));
            }
            Ok(Value::Float(a / b))
        }
        "%" => {
            if b == 0.0 {
                return Err(RuntimeError::new(position, "modulus by zero"));
            }
            Ok(Value::Float(a % b))
        }
        "**" => Ok(Value::Float(a.powf(b))),
        "//" => {
            if b == 0.0 {
                return Err(RuntimeError::new(position, "division by zero"));
            }
            Ok(Value::Float((a / b).floor()))
        }
        "<" => Ok(Value::Boolean(a < b)),
        ">" => Ok(Value::Boolean(a > b)),
        "<=" => Ok(Value::Boolean(a <= b)),
        ">=" => Ok(Value::Boolean(a >= b)),
        "==" => Ok(Value::Boolean(a == b)),
        "!=" => Ok(Value::Boolean(a != b)),
        _ => Err(RuntimeError::new(
            position,
            format!("unknown operator: FLOAT {} FLOAT", operator),
        )),
    }
}
