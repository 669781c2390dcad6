//! Reduces a `Value` under an `Environment` to another `Value` (§4.4).
//! List-headed values dispatch to the Applier (`apply.rs`); everything else
//! is either self-evaluating or a symbol lookup.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::apply;
use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;

#[tracing::instrument(skip(env, v), fields(v = %v))]
pub fn eval(env: &Rc<RefCell<Environment>>, v: Value) -> Value {
    match v {
        Value::SExpr(items) => eval_sexpr(env, items),
        Value::Symbol(name) => {
            trace!(name, "symbol lookup");
            env.borrow().lookup(&name)
        }
        // Number, Error, QExpr, Function, Termination are all self-evaluating.
        other => other,
    }
}

fn eval_sexpr(env: &Rc<RefCell<Environment>>, items: Vec<Value>) -> Value {
    let mut evaluated: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        let v = eval(env, item);
        if v.is_error() {
            return v;
        }
        evaluated.push(v);
    }

    if evaluated.is_empty() {
        return Value::sexpr(evaluated);
    }

    if evaluated.len() == 1 && !evaluated[0].is_function() {
        return evaluated.into_iter().next().unwrap();
    }

    let mut rest = evaluated;
    let f = rest.remove(0);
    let Value::Function(func) = f else {
        return LispError::NotAFunction { got: f.type_name() }.into();
    };

    apply::apply(env, func, rest)
}
