//! Lexically scoped bindings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// A scope: a local name→value map plus an optional link to the enclosing
/// scope.
///
/// One environment exists for the top level; every function call creates
/// another one enclosed by the function's captured environment. Closures
/// keep their captured chain alive for as long as they themselves live.
#[derive(Debug)]
pub struct Environment {
    store: RefCell<HashMap<String, Rc<Object>>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a top-level environment.
    ///
    /// Returns an `Rc` because environments are shared between closures
    /// and their call scopes.
    pub fn new() -> Rc<Environment> {
        Rc::new(Environment {
            store: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    /// Creates an environment nested inside `outer`.
    pub fn enclosed(outer: Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            store: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    /// Resolve `name` here, or failing that anywhere up the outer chain.
    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        match self.store.borrow().get(name) {
            Some(val) => Some(val.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Bind `name` in this scope, shadowing but never touching any outer
    /// binding of the same name.
    pub fn set(&self, name: String, val: Rc<Object>) {
        self.store.borrow_mut().insert(name, val);
    }
}
