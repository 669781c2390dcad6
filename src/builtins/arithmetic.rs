//! Integer arithmetic builtins (§4.6). All operate on `Number` only and
//! fold left-to-right; overflow wraps (two's-complement), matching the
//! source's observed behavior rather than panicking (§9 open question).

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::builtins::{expect_min_arity, expect_number};
use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;

fn fold(name: &'static str, args: Vec<Value>, op: impl Fn(i64, i64) -> i64) -> Value {
    trace!(builtin = name, "folding arithmetic args");
    if let Err(e) = expect_min_arity(name, &args, 1) {
        return e;
    }

    let mut numbers = Vec::with_capacity(args.len());
    for (i, a) in args.into_iter().enumerate() {
        match expect_number(name, i, &a) {
            Ok(n) => numbers.push(n),
            Err(e) => return e,
        }
    }

    let mut acc = numbers[0];
    if name == "-" && numbers.len() == 1 {
        return Value::number(acc.wrapping_neg());
    }
    for n in &numbers[1..] {
        acc = op(acc, *n);
    }
    Value::number(acc)
}

pub fn add(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("+", args, |a, b| a.wrapping_add(b))
}

pub fn sub(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("-", args, |a, b| a.wrapping_sub(b))
}

pub fn mul(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("*", args, |a, b| a.wrapping_mul(b))
}

pub fn div(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    if let Err(e) = expect_min_arity("/", &args, 1) {
        return e;
    }
    let mut numbers = Vec::with_capacity(args.len());
    for (i, a) in args.into_iter().enumerate() {
        match expect_number("/", i, &a) {
            Ok(n) => numbers.push(n),
            Err(e) => return e,
        }
    }
    let mut acc = numbers[0];
    for n in &numbers[1..] {
        if *n == 0 {
            return LispError::DivisionByZero.into();
        }
        acc = acc.wrapping_div(*n);
    }
    Value::number(acc)
}

pub fn rem(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    if let Err(e) = expect_min_arity("%", &args, 1) {
        return e;
    }
    let mut numbers = Vec::with_capacity(args.len());
    for (i, a) in args.into_iter().enumerate() {
        match expect_number("%", i, &a) {
            Ok(n) => numbers.push(n),
            Err(e) => return e,
        }
    }
    let mut acc = numbers[0];
    for n in &numbers[1..] {
        if *n == 0 {
            return LispError::DivisionByZero.into();
        }
        acc = acc.wrapping_rem(*n);
    }
    Value::number(acc)
}

pub fn pow(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("^", args, |a, b| a.wrapping_pow(b as u32))
}

pub fn min(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("min", args, |a, b| a.min(b))
}

pub fn max(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("max", args, |a, b| a.max(b))
}
