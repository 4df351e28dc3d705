use std::fmt;
use std::rc::Rc;

use crate::ast::{Expr, FuncDefinition};
use crate::interpreter::environment::Environment;

/// Runtime result of evaluating an expression.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    List(Rc<ListValue>),
    Function(Rc<Function>),
}

/// List data: the head and tail of a literal S-expression, kept unevaluated
/// until `car` reaches into it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValue {
    pub head: Expr,
    pub tail: Vec<Expr>,
}

/// A user function paired with the environment it was defined in.
pub struct Function {
    pub declaration: Rc<FuncDefinition>,
    pub closure: Environment,
}

impl Function {
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }
}

// The closure usually contains the function itself, so Debug stays shallow.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}/{}>", self.name(), self.arity())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::interpreter::value_utils::values_equal(self, other)
    }
}

impl Value {
    pub fn list(head: Expr, tail: Vec<Expr>) -> Self {
        Value::List(Rc::new(ListValue { head, tail }))
    }

    pub fn as_number(&self) -> Option<f64> {
        if let Value::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s.as_ref())
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&ListValue> {
        if let Value::List(list) = self {
            Some(list)
        } else {
            None
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_value(self))
    }
}
