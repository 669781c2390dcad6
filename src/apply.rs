//! Binds arguments to formals (including the variadic `&` sentinel),
//! produces partial applications, and evaluates a saturated closure's body
//! in its captured environment chained to the caller's (§4.5).

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::env::Environment;
use crate::error::LispError;
use crate::eval::eval;
use crate::value::{Function, Lambda, Value};

const VARIADIC_SENTINEL: &str = "&";

#[tracing::instrument(skip(env, f, args))]
pub fn apply(env: &Rc<RefCell<Environment>>, f: Function, args: Vec<Value>) -> Value {
    match f {
        Function::Builtin { name, func } => {
            trace!(builtin = name, "dispatching to builtin");
            func(env, args)
        }
        Function::Lambda(lambda) => apply_lambda(env, lambda, args),
    }
}

fn formal_names(formals: &Value) -> Vec<String> {
    match formals {
        Value::QExpr(items) => items
            .iter()
            .map(|v| match v {
                Value::Symbol(s) => s.clone(),
                _ => unreachable!("lambda construction guarantees all-Symbol formals"),
            })
            .collect(),
        _ => unreachable!("lambda construction guarantees QExpr formals"),
    }
}

fn apply_lambda(caller_env: &Rc<RefCell<Environment>>, mut lambda: Lambda, args: Vec<Value>) -> Value {
    let total = formal_names(&lambda.formals).len();
    let given = args.len();

    let mut remaining_formals = formal_names(&lambda.formals);
    let mut args = args.into_iter();

    loop {
        let Some(val) = args.next() else { break };

        if remaining_formals.is_empty() {
            return LispError::TooManyArguments { got: given, expected: total }.into();
        }

        let sym = remaining_formals.remove(0);

        if sym == VARIADIC_SENTINEL {
            let Some(rest_name) = remaining_formals.first().cloned() else {
                return LispError::MalformedLambdaVariadic.into();
            };
            if remaining_formals.len() != 1 {
                return LispError::MalformedLambdaVariadic.into();
            }
            let mut rest_values = vec![val];
            rest_values.extend(args);
            lambda.env.borrow_mut().put(rest_name, Value::qexpr(rest_values));
            remaining_formals.clear();
            break;
        }

        lambda.env.borrow_mut().put(sym, val);
    }

    // A variadic tail with no arguments left to consume defaults to `{}`.
    if remaining_formals.first().map(String::as_str) == Some(VARIADIC_SENTINEL) {
        if remaining_formals.len() != 2 {
            return LispError::MalformedLambdaVariadic.into();
        }
        let rest_name = remaining_formals[1].clone();
        lambda.env.borrow_mut().put(rest_name, Value::qexpr(vec![]));
        remaining_formals.clear();
    }

    if remaining_formals.is_empty() {
        debug!("lambda saturated, evaluating body");
        lambda.env.borrow_mut().set_parent(Rc::clone(caller_env));
        let body_items = match lambda.body.as_ref() {
            Value::QExpr(items) => items.clone(),
            other => vec![other.clone()],
        };
        eval(&lambda.env, Value::sexpr(body_items))
    } else {
        // Partial application: deep-copy the lambda so this branch's
        // bindings don't leak into a sibling partial application.
        let remaining = Value::qexpr(
            remaining_formals
                .into_iter()
                .map(Value::symbol)
                .collect(),
        );
        Value::Function(Function::Lambda(Lambda {
            formals: Box::new(remaining),
            body: lambda.body,
            env: lambda.env,
        }))
        .deep_copy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lambda(formals: Vec<&str>, body: Vec<Value>) -> Lambda {
        Lambda {
            formals: Box::new(Value::qexpr(formals.into_iter().map(Value::symbol).collect())),
            body: Box::new(Value::qexpr(body)),
            env: Environment::new(),
        }
    }

    #[test]
    fn saturated_call_evaluates_body() {
        let caller = Environment::new();
        let lambda = make_lambda(vec!["x"], vec![Value::symbol("x")]);
        let result = apply_lambda(&caller, lambda, vec![Value::number(7)]);
        assert_eq!(result, Value::number(7));
    }

    #[test]
    fn partial_application_returns_closure_with_remaining_formals() {
        let caller = Environment::new();
        let lambda = make_lambda(vec!["x", "y"], vec![Value::symbol("x")]);
        let result = apply_lambda(&caller, lambda, vec![Value::number(10)]);
        match result {
            Value::Function(Function::Lambda(l)) => {
                assert_eq!(*l.formals, Value::qexpr(vec![Value::symbol("y")]));
            }
            other => panic!("expected partial lambda, got {other:?}"),
        }
    }

    #[test]
    fn too_many_arguments_is_an_error() {
        let caller = Environment::new();
        let lambda = make_lambda(vec!["x"], vec![Value::symbol("x")]);
        let result = apply_lambda(&caller, lambda, vec![Value::number(1), Value::number(2)]);
        assert_eq!(
            result,
            Value::error("Function passed too many arguments. Got 2, Expected 1.")
        );
    }

    #[test]
    fn variadic_tail_collects_remaining_args_as_qexpr() {
        let caller = Environment::new();
        let lambda = make_lambda(
            vec!["x", "&", "rest"],
            vec![Value::symbol("rest")],
        );
        let result = apply_lambda(
            &caller,
            lambda,
            vec![Value::number(1), Value::number(2), Value::number(3)],
        );
        assert_eq!(result, Value::qexpr(vec![Value::number(2), Value::number(3)]));
    }

    #[test]
    fn variadic_tail_defaults_to_empty_qexpr_when_exhausted() {
        let caller = Environment::new();
        let lambda = make_lambda(vec!["x", "&", "rest"], vec![Value::symbol("rest")]);
        let result = apply_lambda(&caller, lambda, vec![Value::number(1)]);
        assert_eq!(result, Value::qexpr(vec![]));
    }

    #[test]
    fn malformed_variadic_without_trailing_symbol_is_an_error() {
        let caller = Environment::new();
        let lambda = make_lambda(vec!["x", "&"], vec![Value::symbol("x")]);
        let result = apply_lambda(&caller, lambda, vec![Value::number(1)]);
        assert_eq!(
            result,
            Value::error("Function format invalid. Symbol '&' not followed by single symbol.")
        );
    }
}
