//! Conditional dispatch and comparisons (§4.6).

use std::cell::RefCell;
use std::rc::Rc;

use crate::builtins::{expect_arity, expect_number, expect_qexpr};
use crate::env::Environment;
use crate::eval::eval;
use crate::value::Value;

pub fn if_builtin(env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = expect_arity("if", &args, 3) {
        return e;
    }
    let else_branch = args.remove(2);
    let then_branch = args.remove(1);
    let cond = match expect_number("if", 0, &args[0]) {
        Ok(n) => n,
        Err(e) => return e,
    };

    let branch = if cond != 0 { then_branch } else { else_branch };
    let items = match expect_qexpr("if", 1, branch) {
        Ok(items) => items,
        Err(e) => return e,
    };
    eval(env, Value::sexpr(items))
}

fn numeric_cmp(name: &'static str, args: Vec<Value>, op: impl Fn(i64, i64) -> bool) -> Value {
    if let Err(e) = expect_arity(name, &args, 2) {
        return e;
    }
    let a = match expect_number(name, 0, &args[0]) {
        Ok(n) => n,
        Err(e) => return e,
    };
    let b = match expect_number(name, 1, &args[1]) {
        Ok(n) => n,
        Err(e) => return e,
    };
    Value::number(if op(a, b) { 1 } else { 0 })
}

pub fn gt(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    numeric_cmp(">", args, |a, b| a > b)
}

pub fn lt(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    numeric_cmp("<", args, |a, b| a < b)
}

pub fn ge(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    numeric_cmp(">=", args, |a, b| a >= b)
}

pub fn le(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    numeric_cmp("<=", args, |a, b| a <= b)
}

pub fn eq(_env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = expect_arity("==", &args, 2) {
        return e;
    }
    let b = args.remove(1);
    let a = args.remove(0);
    Value::number(if a == b { 1 } else { 0 })
}

pub fn ne(_env: &Rc<RefCell<Environment>>, mut args: Vec<Value>) -> Value {
    if let Err(e) = expect_arity("!=", &args, 2) {
        return e;
    }
    let b = args.remove(1);
    let a = args.remove(0);
    Value::number(if a != b { 1 } else { 0 })
}
