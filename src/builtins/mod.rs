//! The prelude of primitive functions registered at startup (§4.6): a table
//! of `(name, impl)` pairs populated once into a fresh global `Environment`,
//! avoiding a globally-mutable dispatch table (§9's "built-in registration"
//! note).

mod arithmetic;
mod binding;
mod control;
mod list;
mod session;

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{BuiltinFn, Value};

/// The closed table of `(name, implementation)` pairs installed into every
/// fresh global environment. A plain slice rather than a lazily-built
/// `HashMap`: the table is small, built once per process, and never mutated
/// after `new_with_prelude` runs.
const PRELUDE: &[(&str, BuiltinFn)] = &[
    ("+", arithmetic::add),
    ("-", arithmetic::sub),
    ("*", arithmetic::mul),
    ("/", arithmetic::div),
    ("%", arithmetic::rem),
    ("^", arithmetic::pow),
    ("min", arithmetic::min),
    ("max", arithmetic::max),
    ("head", list::head),
    ("tail", list::tail),
    ("list", list::list),
    ("eval", list::eval_builtin),
    ("join", list::join),
    ("cons", list::cons),
    ("len", list::len),
    ("init", list::init),
    ("\\", binding::lambda),
    ("def", binding::def),
    ("=", binding::put),
    ("if", control::if_builtin),
    (">", control::gt),
    ("<", control::lt),
    (">=", control::ge),
    ("<=", control::le),
    ("==", control::eq),
    ("!=", control::ne),
    ("env", session::env_builtin),
    ("exit", session::exit_builtin),
];

impl Environment {
    /// A fresh global frame with every §4.6 builtin already bound.
    pub fn new_with_prelude() -> Rc<RefCell<Environment>> {
        let env = Environment::new();
        for (name, func) in PRELUDE {
            env.borrow_mut().put(*name, Value::builtin(name, *func));
        }
        env
    }
}

/// Checks an exact argument count, returning a §7 arity-mismatch error
/// otherwise. Every builtin calls this first so malformed calls never reach
/// argument-unpacking code.
fn expect_arity(name: &str, args: &[Value], expected: usize) -> Result<(), Value> {
    if args.len() != expected {
        return Err(LispError::ArityMismatch {
            builtin: name.to_string(),
            got: args.len(),
            expected: expected.to_string(),
        }
        .into());
    }
    Ok(())
}

fn expect_min_arity(name: &str, args: &[Value], min: usize) -> Result<(), Value> {
    if args.len() < min {
        return Err(LispError::ArityMismatch {
            builtin: name.to_string(),
            got: args.len(),
            expected: format!("at least {min}"),
        }
        .into());
    }
    Ok(())
}

fn expect_number(name: &str, index: usize, v: &Value) -> Result<i64, Value> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(LispError::TypeMismatch {
            builtin: name.to_string(),
            index,
            got: other.type_name(),
            expected: "Number",
        }
        .into()),
    }
}

fn expect_qexpr(name: &str, index: usize, v: Value) -> Result<Vec<Value>, Value> {
    match v {
        Value::QExpr(items) => Ok(items),
        other => Err(LispError::TypeMismatch {
            builtin: name.to_string(),
            index,
            got: other.type_name(),
            expected: "Q-Expression",
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_with_prelude_binds_every_builtin_name() {
        let env = Environment::new_with_prelude();
        for (name, _) in PRELUDE {
            assert!(env.borrow().contains(name), "missing builtin '{name}'");
        }
    }
}
