//! `\` (lambda construction) and the two flavors of variable definition,
//! `def` (global) and `=` (frame-local) (§4.6).

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::builtins::expect_min_arity;
use crate::env::{self, Environment};
use crate::error::LispError;
use crate::value::{Function, Lambda, Value};

/// Validates formals up front per §9's note: pre-parse `(required, rest)`
/// at construction time rather than re-checking the sentinel on every call.
fn validate_formals(formals: &[Value]) -> Result<(), Value> {
    for (i, f) in formals.iter().enumerate() {
        if !matches!(f, Value::Symbol(_)) {
            return Err(LispError::MalformedLambdaFormals { got: f.type_name() }.into());
        }
        if matches!(f, Value::Symbol(s) if s == "&") && i + 2 != formals.len() {
            return Err(LispError::MalformedLambdaVariadic.into());
        }
    }
    Ok(())
}

pub fn lambda(_env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = super::expect_arity("\\", &args, 2) {
        return e;
    }
    let body = args.remove(1);
    let formals = args.remove(0);

    if !matches!(formals, Value::QExpr(_)) {
        return LispError::TypeMismatch {
            builtin: "\\".to_string(),
            index: 0,
            got: formals.type_name(),
            expected: "Q-Expression",
        }
        .into();
    }
    if !matches!(body, Value::QExpr(_)) {
        return LispError::TypeMismatch {
            builtin: "\\".to_string(),
            index: 1,
            got: body.type_name(),
            expected: "Q-Expression",
        }
        .into();
    }

    let Value::QExpr(formal_items) = &formals else { unreachable!() };
    if let Err(e) = validate_formals(formal_items) {
        return e;
    }

    debug!("constructing lambda");
    Value::Function(Function::Lambda(Lambda {
        formals: Box::new(formals),
        body: Box::new(body),
        env: Environment::new(),
    }))
}

fn define(where_: &'static str, env: &Rc<RefCell<Environment>>, mut args: Vec<Value>, global: bool) -> Value {
    if let Err(e) = expect_min_arity(where_, &args, 1) {
        return e;
    }
    let names_arg = args.remove(0);
    let Value::QExpr(name_values) = names_arg else {
        return LispError::TypeMismatch {
            builtin: where_.to_string(),
            index: 0,
            got: names_arg.type_name(),
            expected: "Q-Expression",
        }
        .into();
    };

    let mut names = Vec::with_capacity(name_values.len());
    for (i, n) in name_values.into_iter().enumerate() {
        match n {
            Value::Symbol(s) => names.push(s),
            other => {
                return LispError::TypeMismatch {
                    builtin: where_.to_string(),
                    index: i,
                    got: other.type_name(),
                    expected: "Symbol",
                }
                .into()
            }
        }
    }

    if names.len() != args.len() {
        return LispError::ArityMismatch {
            builtin: where_.to_string(),
            got: args.len(),
            expected: names.len().to_string(),
        }
        .into();
    }

    for (name, value) in names.into_iter().zip(args.into_iter()) {
        if global {
            env::def(env, name, value);
        } else {
            env.borrow_mut().put(name, value);
        }
    }

    Value::sexpr(vec![])
}

pub fn def(env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    define("def", env, args, true)
}

pub fn put(env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    define("=", env, args, false)
}
