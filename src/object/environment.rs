use super::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

pub type EnvRef = Rc<RefCell<Environment>>;

/// One frame of the lexical scope chain. Lookups walk `outer` links;
/// `update` mutates the nearest binding and refuses constants; `set`
/// always writes the current frame.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    consts: HashSet<String>,
    outer: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn new_enclosed(outer: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Self {
            outer: Some(outer),
            ..Self::default()
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    pub fn set_const(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.consts.insert(name.clone());
        self.store.insert(name, value);
    }

    /// Mutate the nearest binding up the chain. Returns false when the
    /// name is unbound or bound to a constant.
    pub fn update(&mut self, name: &str, value: Value) -> bool {
        if self.consts.contains(name) {
            return false;
        }
        if let Some(slot) = self.store.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.outer {
            Some(outer) => outer.borrow_mut().update(name, value),
            None => false,
        }
    }

    pub fn is_const(&self, name: &str) -> bool {
        if self.consts.contains(name) {
            return true;
        }
        if self.store.contains_key(name) {
            return false;
        }
        self.outer
            .as_ref()
            .map(|outer| outer.borrow().is_const(name))
            .unwrap_or(false)
    }

    /// Copy of the frame's own bindings, used to materialize modules.
    pub fn bindings(&self) -> HashMap<String, Value> {
        self.store.clone()
    }
}

fn ancestor(env: &EnvRef, distance: usize) -> Option<EnvRef> {
    let mut current = env.clone();
    for _ in 0..distance {
        let outer = current.borrow().outer.clone()?;
        current = outer;
    }
    Some(current)
}

/// Read a binding at a pre-resolved scope distance.
pub fn get_at(env: &EnvRef, distance: usize, name: &str) -> Option<Value> {
    let frame = ancestor(env, distance)?;
    let value = frame.borrow().store.get(name).cloned();
    value
}

/// Write a binding at a pre-resolved scope distance, refusing constants.
pub fn update_at(env: &EnvRef, distance: usize, name: &str, value: Value) -> bool {
    let Some(frame) = ancestor(env, distance) else {
        return false;
    };
    let mut frame = frame.borrow_mut();
    if frame.consts.contains(name) {
        return false;
    }
    frame.store.insert(name.to_string(), value);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outer_links() {
        let global = Environment::new();
        global.borrow_mut().set("x", Value::Integer(1));
        let inner = Environment::new_enclosed(global.clone());
        assert_eq!(inner.borrow().get("x"), Some(Value::Integer(1)));
        assert_eq!(inner.borrow().get("missing"), None);
    }

    #[test]
    fn set_shadows_without_touching_outer() {
        let global = Environment::new();
        global.borrow_mut().set("x", Value::Integer(1));
        let inner = Environment::new_enclosed(global.clone());
        inner.borrow_mut().set("x", Value::Integer(2));
        assert_eq!(inner.borrow().get("x"), Some(Value::Integer(2)));
        assert_eq!(global.borrow().get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn update_mutates_nearest_binding() {
        let global = Environment::new();
        global.borrow_mut().set("x", Value::Integer(1));
        let inner = Environment::new_enclosed(global.clone());
        assert!(inner.borrow_mut().update("x", Value::Integer(5)));
        assert_eq!(global.borrow().get("x"), Some(Value::Integer(5)));
    }

    #[test]
    fn update_refuses_constants() {
        let global = Environment::new();
        global.borrow_mut().set_const("k", Value::Integer(1));
        assert!(!global.borrow_mut().update("k", Value::Integer(2)));
        assert_eq!(global.borrow().get("k"), Some(Value::Integer(1)));
        assert!(global.borrow().is_const("k"));
    }

    #[test]
    fn distance_addressing_reaches_the_right_frame() {
        let global = Environment::new();
        global.borrow_mut().set("x", Value::Integer(1));
        let middle = Environment::new_enclosed(global.clone());
        middle.borrow_mut().set("x", Value::Integer(2));
        let inner = Environment::new_enclosed(middle);

        assert_eq!(get_at(&inner, 1, "x"), Some(Value::Integer(2)));
        assert_eq!(get_at(&inner, 2, "x"), Some(Value::Integer(1)));
        assert!(update_at(&inner, 2, "x", Value::Integer(9)));
        assert_eq!(global.borrow().get("x"), Some(Value::Integer(9)));
    }
}
