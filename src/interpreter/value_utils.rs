use std::rc::Rc;

use crate::ast::Expr;
use crate::value::Value;

/// `nil`, numeric zero and `false` are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0,
        _ => true,
    }
}

/// Equality without coercion between kinds. Lists compare structurally,
/// functions by identity.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            Rc::ptr_eq(a, b)
                || (same_datum(&a.head, &b.head)
                    && a.tail.len() == b.tail.len()
                    && a.tail.iter().zip(b.tail.iter()).all(|(x, y)| same_datum(x, y)))
        }
        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

/// Structural comparison of unevaluated list elements, ignoring source lines.
fn same_datum(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Atom { value: a, .. }, Expr::Atom { value: b, .. }) => a == b,
        (Expr::Symbol { name: a }, Expr::Symbol { name: b }) => a.lexeme == b.lexeme,
        (Expr::Operator { op: a, operands: xs }, Expr::Operator { op: b, operands: ys }) => {
            a.kind == b.kind && all_same(xs, ys)
        }
        (Expr::Keyword { token: a, args: xs }, Expr::Keyword { token: b, args: ys }) => {
            a.kind == b.kind && all_same(xs, ys)
        }
        (Expr::List { head: a, tail: xs }, Expr::List { head: b, tail: ys }) => {
            same_datum(a, b) && all_same(xs, ys)
        }
        (Expr::Data(a), Expr::Data(b)) => {
            Rc::ptr_eq(a, b) || (same_datum(&a.head, &b.head) && all_same(&a.tail, &b.tail))
        }
        (
            Expr::Call { callee: a, args: xs, .. },
            Expr::Call { callee: b, args: ys, .. },
        ) => same_datum(a, b) && all_same(xs, ys),
        (Expr::FuncDefinition(a), Expr::FuncDefinition(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

fn all_same(xs: &[Expr], ys: &[Expr]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| same_datum(x, y))
}
