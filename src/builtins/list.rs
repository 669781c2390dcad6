//! List-manipulation builtins over `QExpr` values (§4.6).

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::builtins::{expect_arity, expect_qexpr};
use crate::env::Environment;
use crate::error::LispError;
use crate::eval::eval;
use crate::value::Value;

pub fn head(_env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = expect_arity("head", &args, 1) {
        return e;
    }
    let items = match expect_qexpr("head", 0, args.remove(0)) {
        Ok(items) => items,
        Err(e) => return e,
    };
    trace!(len = items.len(), "head");
    match items.into_iter().next() {
        Some(first) => Value::qexpr(vec![first]),
        None => Value::qexpr(vec![]),
    }
}

pub fn tail(_env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = expect_arity("tail", &args, 1) {
        return e;
    }
    let mut items = match expect_qexpr("tail", 0, args.remove(0)) {
        Ok(items) => items,
        Err(e) => return e,
    };
    if !items.is_empty() {
        items.remove(0);
    }
    Value::qexpr(items)
}

pub fn list(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    Value::qexpr(args)
}

pub fn eval_builtin(env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = expect_arity("eval", &args, 1) {
        return e;
    }
    let items = match expect_qexpr("eval", 0, args.remove(0)) {
        Ok(items) => items,
        Err(e) => return e,
    };
    eval(env, Value::sexpr(items))
}

pub fn join(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    let mut joined = Vec::new();
    for (i, a) in args.into_iter().enumerate() {
        match expect_qexpr("join", i, a) {
            Ok(items) => joined.extend(items),
            Err(e) => return e,
        }
    }
    Value::qexpr(joined)
}

pub fn cons(_env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = expect_arity("cons", &args, 2) {
        return e;
    }
    let xs = args.remove(1);
    let x = args.remove(0);

    let admissible = matches!(x, Value::Number(_) | Value::SExpr(_) | Value::QExpr(_));
    if !admissible {
        return LispError::TypeMismatch {
            builtin: "cons".to_string(),
            index: 0,
            got: x.type_name(),
            expected: "Number, S-Expression, or Q-Expression",
        }
        .into();
    }

    let mut items = match expect_qexpr("cons", 1, xs) {
        Ok(items) => items,
        Err(e) => return e,
    };
    items.insert(0, x);
    Value::qexpr(items)
}

pub fn len(_env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = expect_arity("len", &args, 1) {
        return e;
    }
    let items = match expect_qexpr("len", 0, args.remove(0)) {
        Ok(items) => items,
        Err(e) => return e,
    };
    Value::number(items.len() as i64)
}

pub fn init(_env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = expect_arity("init", &args, 1) {
        return e;
    }
    let mut items = match expect_qexpr("init", 0, args.remove(0)) {
        Ok(items) => items,
        Err(e) => return e,
    };
    items.pop();
    Value::qexpr(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<RefCell<Environment>> {
        Environment::new()
    }

    #[test]
    fn head_returns_first_element_as_qexpr() {
        let q = Value::qexpr(vec![Value::number(1), Value::number(2), Value::number(3)]);
        assert_eq!(head(&env(), vec![q]), Value::qexpr(vec![Value::number(1)]));
    }

    #[test]
    fn head_of_empty_qexpr_is_permissive() {
        assert_eq!(head(&env(), vec![Value::qexpr(vec![])]), Value::qexpr(vec![]));
    }

    #[test]
    fn tail_drops_the_first_element() {
        let q = Value::qexpr(vec![Value::number(1), Value::number(2)]);
        assert_eq!(tail(&env(), vec![q]), Value::qexpr(vec![Value::number(2)]));
    }

    #[test]
    fn list_wraps_args_into_qexpr() {
        let result = list(&env(), vec![Value::number(1), Value::number(2)]);
        assert_eq!(result, Value::qexpr(vec![Value::number(1), Value::number(2)]));
    }

    #[test]
    fn eval_retags_qexpr_as_sexpr_and_evaluates() {
        let env = Environment::new_with_prelude();
        let plus = env.borrow().lookup("+");
        let q = Value::qexpr(vec![plus, Value::number(40), Value::number(2)]);
        assert_eq!(eval_builtin(&env, vec![q]), Value::number(42));
    }

    #[test]
    fn join_concatenates_in_order() {
        let a = Value::qexpr(vec![Value::number(1)]);
        let b = Value::qexpr(vec![Value::number(2), Value::number(3)]);
        assert_eq!(
            join(&env(), vec![a, b]),
            Value::qexpr(vec![Value::number(1), Value::number(2), Value::number(3)])
        );
    }

    #[test]
    fn join_with_empty_is_identity() {
        let a = Value::qexpr(vec![Value::number(1)]);
        assert_eq!(join(&env(), vec![a.clone(), Value::qexpr(vec![])]), a.clone());
        assert_eq!(join(&env(), vec![Value::qexpr(vec![]), a.clone()]), a);
    }

    #[test]
    fn cons_prepends_to_qexpr() {
        let xs = Value::qexpr(vec![Value::number(2), Value::number(3)]);
        let result = cons(&env(), vec![Value::number(1), xs]);
        assert_eq!(
            result,
            Value::qexpr(vec![Value::number(1), Value::number(2), Value::number(3)])
        );
    }

    #[test]
    fn len_counts_elements() {
        let q = Value::qexpr(vec![Value::number(1), Value::number(2), Value::number(3)]);
        assert_eq!(len(&env(), vec![q]), Value::number(3));
    }

    #[test]
    fn init_drops_the_last_element() {
        let q = Value::qexpr(vec![Value::number(1), Value::number(2), Value::number(3)]);
        assert_eq!(init(&env(), vec![q]), Value::qexpr(vec![Value::number(1), Value::number(2)]));
    }

    #[test]
    fn head_on_sexpr_is_a_type_error() {
        let result = head(&env(), vec![Value::sexpr(vec![Value::number(1)])]);
        assert!(matches!(result, Value::Error(_)));
    }
}
