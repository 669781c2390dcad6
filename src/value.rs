//! The tagged-union value representation (`Value`) shared by every other module.
//!
//! `Value` is intentionally a flat sum type rather than a single struct with
//! optional fields: each variant carries exactly the payload it needs, which
//! rules out the "read the wrong field" class of bug the C original is prone
//! to (see `lval_eq`'s `LVAL_SYM` case in the reference source).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::env::Environment;

/// A native Rust implementation of a built-in. Receives the caller's
/// environment (needed by `env`, `eval`, `def`, `=`) and the already
/// evaluated argument list, and returns a result `Value` (an `Error` value
/// on failure, never a Rust-level `Err`).
pub type BuiltinFn = fn(&Rc<RefCell<Environment>>, Vec<Value>) -> Value;

/// A user-defined function: formals (a `QExpr` of `Symbol`s, optionally
/// ending in `&` followed by one more symbol), a body (`QExpr`), and the
/// environment captured at `\` time.
#[derive(Clone)]
pub struct Lambda {
    pub formals: Box<Value>,
    pub body: Box<Value>,
    pub env: Rc<RefCell<Environment>>,
}

impl Lambda {
    /// Deep copy: formals/body copied recursively, environment frame copied
    /// (not its parent chain, which is shared).
    pub fn deep_copy(&self) -> Lambda {
        Lambda {
            formals: Box::new(self.formals.deep_copy()),
            body: Box::new(self.body.deep_copy()),
            env: Rc::new(RefCell::new(self.env.borrow().copy())),
        }
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("formals", &self.formals)
            .field("body", &self.body)
            .field("env", &"<captured env>")
            .finish()
    }
}

// The captured environment is deliberately excluded: two closures built from
// the same formals/body are the same function for every purpose the
// language exposes, regardless of what they closed over.
impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        self.formals == other.formals && self.body == other.body
    }
}

#[derive(Clone)]
pub enum Function {
    Builtin { name: &'static str, func: BuiltinFn },
    Lambda(Lambda),
}

impl Function {
    pub fn name(&self) -> String {
        match self {
            Function::Builtin { name, .. } => name.to_string(),
            Function::Lambda(_) => "\\".to_string(),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Builtin { name, .. } => write!(f, "<builtin: {name}>"),
            Function::Lambda(l) => write!(f, "<lambda: {l:?}>"),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Same built-in reference. A built-in is never equal to a
            // lambda, even one that happens to share its name.
            (Function::Builtin { func: a, .. }, Function::Builtin { func: b, .. }) => {
                std::ptr::eq(*a as *const (), *b as *const ())
            }
            (Function::Lambda(a), Function::Lambda(b)) => a == b,
            _ => false,
        }
    }
}

/// Every Lispy datum. See `deep_copy` and `PartialEq` for the copy/equality
/// semantics and `type_name` for error-message rendering.
#[derive(Clone, Debug)]
pub enum Value {
    Number(i64),
    Error(String),
    Symbol(String),
    SExpr(Vec<Value>),
    QExpr(Vec<Value>),
    Function(Function),
    Termination,
}

impl Value {
    pub fn number(n: i64) -> Value {
        Value::Number(n)
    }

    pub fn error(msg: impl Into<String>) -> Value {
        Value::Error(msg.into())
    }

    pub fn symbol(s: impl Into<String>) -> Value {
        Value::Symbol(s.into())
    }

    pub fn sexpr(items: Vec<Value>) -> Value {
        Value::SExpr(items)
    }

    pub fn qexpr(items: Vec<Value>) -> Value {
        Value::QExpr(items)
    }

    pub fn builtin(name: &'static str, func: BuiltinFn) -> Value {
        Value::Function(Function::Builtin { name, func })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Human-readable variant name, used to build the §7 error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Error(_) => "Error",
            Value::Symbol(_) => "Symbol",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
            Value::Function(_) => "Function",
            Value::Termination => "Termination",
        }
    }

    /// Produces an independent `Value` structurally equal to `self`. Child
    /// lists and captured environments are copied recursively; built-in
    /// function references are copied by reference (a function pointer and
    /// a static name, both `Copy`).
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Number(n) => Value::Number(*n),
            Value::Error(e) => Value::Error(e.clone()),
            Value::Symbol(s) => Value::Symbol(s.clone()),
            Value::SExpr(items) => Value::SExpr(items.iter().map(Value::deep_copy).collect()),
            Value::QExpr(items) => Value::QExpr(items.iter().map(Value::deep_copy).collect()),
            Value::Function(Function::Builtin { name, func }) => Value::Function(Function::Builtin {
                name,
                func: *func,
            }),
            Value::Function(Function::Lambda(l)) => Value::Function(Function::Lambda(l.deep_copy())),
            Value::Termination => Value::Termination,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            // Error and Symbol both compare by their string payload. (The
            // reference source compares Symbol by its error-message field,
            // which is a copy-paste bug; this compares by the symbol name,
            // the evidently intended behavior.)
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::SExpr(a), Value::SExpr(b)) => a == b,
            (Value::QExpr(a), Value::QExpr(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Termination, Value::Termination) => true,
            _ => false,
        }
    }
}

fn fmt_list(items: &[Value], open: char, close: char, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Error(msg) => write!(f, "Error: {msg}"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::SExpr(items) => fmt_list(items, '(', ')', f),
            Value::QExpr(items) => fmt_list(items, '{', '}', f),
            Value::Function(Function::Builtin { .. }) => write!(f, "<builtin>"),
            Value::Function(Function::Lambda(l)) => write!(f, "(\\ {} {})", l.formals, l.body),
            Value::Termination => write!(f, "<termination>"),
        }
    }
}
