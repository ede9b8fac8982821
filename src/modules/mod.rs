//==================================================
// File: modules.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Built-in module registry for Code-Lang
// Objective: Seed the evaluator's module cache with the standard
//            library and serve the bare value builtins
//==================================================

pub mod arrays;
pub mod fmt;
pub mod fs;
pub mod hash;
pub mod http;
pub mod json;
pub mod math;
pub mod net;
pub mod os;
pub mod strings;
pub mod time;

use crate::object::{Builtin, BuiltinFn, Value};
use std::collections::HashMap;

/// Builtins reachable by bare name, without an import. The symbol
/// builder seeds its global scope with the same list.
pub const BARE_BUILTINS: &[&str] = &["len", "print", "first", "last", "rest", "push"];

pub(crate) fn builtin(name: &'static str, func: BuiltinFn) -> Value {
    Value::Builtin(Builtin { name, func })
}

/// The standard library: module name → pre-populated module value. The
/// evaluator consults this before attempting any file load.
pub fn registry() -> HashMap<String, Value> {
    let mut modules = HashMap::new();
    modules.insert("arrays".to_string(), arrays::module());
    modules.insert("fmt".to_string(), fmt::module());
    modules.insert("fs".to_string(), fs::module());
    modules.insert("hash".to_string(), hash::module());
    modules.insert("http".to_string(), http::module());
    modules.insert("json".to_string(), json::module());
    modules.insert("math".to_string(), math::module());
    modules.insert("net".to_string(), net::module());
    modules.insert("os".to_string(), os::module());
    modules.insert("strings".to_string(), strings::module());
    modules.insert("time".to_string(), time::module());
    modules
}

pub fn lookup_builtin(name: &str) -> Option<Value> {
    match name {
        "len" => Some(builtin("len", fmt::len)),
        "print" => Some(builtin("print", fmt::print)),
        "first" => Some(builtin("first", arrays::first)),
        "last" => Some(builtin("last", arrays::last)),
        "rest" => Some(builtin("rest", arrays::rest)),
        "push" => Some(builtin("push", arrays::push)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_every_standard_module() {
        let registry = registry();
        for name in [
            "arrays", "fmt", "fs", "hash", "http", "json", "math", "net", "os", "strings",
            "time",
        ] {
            assert!(
                matches!(registry.get(name), Some(Value::Module(_))),
                "missing module {name}"
            );
        }
    }

    #[test]
    fn bare_builtins_resolve() {
        for name in BARE_BUILTINS {
            assert!(lookup_builtin(name).is_some(), "missing builtin {name}");
        }
        assert!(lookup_builtin("nope").is_none());
    }
}
