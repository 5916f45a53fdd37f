use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use rpal_core::abstract_syntax::Name;

use crate::{error::EvalError, value::Value};

/// one scope in a parent-linked chain.
///
/// children hold their parent by reference count, so a scope lives as long
/// as any closure that captured it. bindings sit behind a `RefCell` so a
/// slot can be filled after the closure that reads it has been built.
pub struct Env {
    bindings: RefCell<BTreeMap<Name, Value>>,
    parent: Option<Rc<Env>>,
}

impl Env {
    /// an empty scope with no parent.
    pub fn empty() -> Rc<Env> {
        Rc::new(Env {
            bindings: RefCell::new(BTreeMap::new()),
            parent: None,
        })
    }

    /// a fresh, empty scope whose parent is `parent`.
    pub fn extend(parent: &Rc<Env>) -> Rc<Env> {
        Rc::new(Env {
            bindings: RefCell::new(BTreeMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    pub fn define(&self, nm: Name, val: Value) {
        self.bindings.borrow_mut().insert(nm, val);
    }

    /// walk the chain outward, innermost binding wins.
    pub fn lookup(&self, nm: &Name) -> Result<Value, EvalError> {
        let mut scope = self;
        loop {
            if let Some(val) = scope.bindings.borrow().get(nm) {
                return Ok(val.clone());
            }
            match &scope.parent {
                Some(parent) => scope = parent,
                None => return Err(EvalError::Unbound(nm.to_string())),
            }
        }
    }
}
