//! Lexically scoped environments: an ordered association of symbol name to
//! `Value`, with an optional parent frame.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

use crate::error::LispError;
use crate::value::Value;

#[derive(Debug)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// A blank root frame with no parent and no bindings. Used for function
    /// call frames and for tests that don't want the prelude in scope.
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            bindings: HashMap::new(),
            parent: None,
        }))
    }

    /// A frame enclosed by `parent`; lookups that miss here fall through to it.
    pub fn new_enclosed(parent: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            bindings: HashMap::new(),
            parent: Some(parent),
        }))
    }

    pub fn parent(&self) -> Option<Rc<RefCell<Environment>>> {
        self.parent.clone()
    }

    /// Chains this frame onto `parent`, replacing whatever parent it had.
    /// Used by the Applier to give a saturated lambda's frame access to the
    /// caller's scope for the duration of the body evaluation.
    pub fn set_parent(&mut self, parent: Rc<RefCell<Environment>>) {
        self.parent = Some(parent);
    }

    /// Looks up `name`, walking the parent chain on a local miss. Returns a
    /// copy of the bound value (copy-on-read, matching `lenv_get`), or an
    /// unbound-symbol error value if no frame in the chain binds it.
    pub fn lookup(&self, name: &str) -> Value {
        trace!(name, "environment lookup");
        if let Some(v) = self.bindings.get(name) {
            return v.deep_copy();
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => LispError::UndefinedSymbol(name.to_string()).into_value(),
        }
    }

    /// Every `(name, value)` bound in *this* frame only, for the `env`
    /// builtin. Order is unspecified (backed by a `HashMap`).
    pub fn bindings(&self) -> Vec<(String, Value)> {
        self.bindings
            .iter()
            .map(|(k, v)| (k.clone(), v.deep_copy()))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
            || self.parent.as_ref().is_some_and(|p| p.borrow().contains(name))
    }

    /// Inserts or overwrites `name` in *this* frame only. Stores a copy of
    /// `value`; later mutation through the stored binding never reaches the
    /// caller's copy.
    pub fn put(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        trace!(name = %name, "environment put (frame-local)");
        self.bindings.insert(name, value.deep_copy());
    }

    /// Deep copy of this frame's own bindings; the returned frame shares the
    /// same parent pointer as `self` (not a copy of the parent chain).
    pub fn copy(&self) -> Environment {
        Environment {
            bindings: self
                .bindings
                .iter()
                .map(|(k, v)| (k.clone(), v.deep_copy()))
                .collect(),
            parent: self.parent.clone(),
        }
    }
}

/// Walks `env` to the root (parentless) frame and `put`s there. Modeled
/// directly on `lenv_def`'s `while (e->par) e = e->par;` walk.
pub fn def(env: &Rc<RefCell<Environment>>, name: impl Into<String>, value: Value) {
    let name = name.into();
    debug!(name = %name, "global define");
    let mut cursor = Rc::clone(env);
    loop {
        let next = cursor.borrow().parent();
        match next {
            Some(parent) => cursor = parent,
            None => break,
        }
    }
    cursor.borrow_mut().put(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_tracing;

    #[test]
    fn put_and_lookup_in_root_env() {
        setup_tracing();
        let env = Environment::new();
        env.borrow_mut().put("x", Value::number(10));
        assert_eq!(env.borrow().lookup("x"), Value::number(10));
    }

    #[test]
    fn lookup_falls_through_to_parent() {
        setup_tracing();
        let outer = Environment::new();
        outer.borrow_mut().put("x", Value::number(10));

        let inner = Environment::new_enclosed(Rc::clone(&outer));
        assert_eq!(inner.borrow().lookup("x"), Value::number(10));
    }

    #[test]
    fn put_in_inner_shadows_outer_without_mutating_it() {
        setup_tracing();
        let outer = Environment::new();
        outer.borrow_mut().put("x", Value::number(10));

        let inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.borrow_mut().put("x", Value::number(20));

        assert_eq!(inner.borrow().lookup("x"), Value::number(20));
        assert_eq!(outer.borrow().lookup("x"), Value::number(10));
    }

    #[test]
    fn lookup_of_unbound_symbol_is_an_error_value() {
        setup_tracing();
        let env = Environment::new();
        assert_eq!(env.borrow().lookup("ghost"), Value::error("Unbound symbol 'ghost'"));
    }

    #[test]
    fn def_walks_to_the_root_frame() {
        setup_tracing();
        let root = Environment::new();
        let child = Environment::new_enclosed(Rc::clone(&root));
        let grandchild = Environment::new_enclosed(Rc::clone(&child));

        def(&grandchild, "g", Value::number(1));

        assert!(root.borrow().contains("g"));
        assert!(!child.borrow().contains("g") || child.borrow().parent().is_some());
        assert_eq!(root.borrow().lookup("g"), Value::number(1));
    }

    #[test]
    fn copy_shares_parent_but_not_bindings() {
        setup_tracing();
        let outer = Environment::new();
        let inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.borrow_mut().put("x", Value::number(1));

        let copied = inner.borrow().copy();
        assert_eq!(copied.lookup("x"), Value::number(1));

        inner.borrow_mut().put("x", Value::number(2));
        assert_eq!(copied.lookup("x"), Value::number(1));
    }
}
