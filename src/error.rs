//! The closed set of language-level error kinds (§7). A `LispError` is
//! raised by the evaluator, the Applier, or a builtin, and converted to a
//! `Value::Error` at the point it surfaces — it never escapes as a
//! Rust-level error past the evaluation boundary. This is distinct from
//! host errors (`anyhow`, in `main`/`cli`) for failures the language itself
//! never sees, such as a missing script file.

use thiserror::Error;

use crate::value::Value;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LispError {
    #[error("Unbound symbol '{0}'")]
    UndefinedSymbol(String),

    #[error("Function '{builtin}' passed incorrect type for argument {index}. Got {got}, Expected {expected}.")]
    TypeMismatch {
        builtin: String,
        index: usize,
        got: &'static str,
        expected: &'static str,
    },

    #[error("Function '{builtin}' passed incorrect number of arguments. Got {got}, Expected {expected}.")]
    ArityMismatch {
        builtin: String,
        got: usize,
        expected: String,
    },

    #[error("S-expression does not start with Function. Got {got}, Expected Function.")]
    NotAFunction { got: &'static str },

    #[error("Division By Zero!")]
    DivisionByZero,

    #[error("Function format invalid. Symbol '&' not followed by single symbol.")]
    MalformedLambdaVariadic,

    #[error("Cannot define non-symbol. Got {got}, Expected Symbol.")]
    MalformedLambdaFormals { got: &'static str },

    #[error("Function passed too many arguments. Got {got}, Expected {expected}.")]
    TooManyArguments { got: usize, expected: usize },

    #[error("invalid number")]
    InvalidNumber,

    #[error("{0}")]
    Evaluation(String),
}

impl LispError {
    /// Surfaces this error as a first-class `Value::Error`; the only place
    /// a `LispError` is allowed to become something the evaluator carries.
    pub fn into_value(self) -> Value {
        Value::error(self.to_string())
    }
}

impl From<LispError> for Value {
    fn from(err: LispError) -> Value {
        err.into_value()
    }
}
