use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use super::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;

type Scope = IndexMap<String, Value>;

/// One scope in a chain of lexical scopes.
///
/// Cloning an `Environment` shares the scope rather than copying it, so a
/// closure and the call frame that created it see the same bindings. A scope
/// lives as long as the longest holder of a clone.
#[derive(Debug, Clone)]
pub struct Environment {
    values: Rc<RefCell<Scope>>,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            values: Rc::new(RefCell::new(IndexMap::new())),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: &Environment) -> Self {
        Self {
            values: Rc::new(RefCell::new(IndexMap::new())),
            enclosing: Some(Rc::new(enclosing.clone())),
        }
    }

    /// Bind or rebind `name` in this scope.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    /// Look `name` up here, then outward through each enclosing scope.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.lookup(&name.lexeme).ok_or_else(|| {
            RuntimeError::new(name.clone(), format!("Undefined variable '{}'.", name.lexeme))
        })
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.borrow().get(name) {
            return Some(value.clone());
        }
        self.enclosing.as_ref().and_then(|enclosing| enclosing.lookup(name))
    }

    /// Bindings of this scope only, in definition order.
    pub fn bindings(&self) -> Vec<(String, Value)> {
        self.values
            .borrow()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    pub fn same_scope(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.values, &other.values)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
