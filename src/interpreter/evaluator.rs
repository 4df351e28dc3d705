use std::rc::Rc;

use super::environment::Environment;
use super::error::RuntimeError;
use super::value_utils::{is_truthy, values_equal};
use crate::ast::{Expr, FuncDefinition};
use crate::format::format_number;
use crate::token::{Literal, Token, TokenKind};
use crate::value::{Function, Value};

/// Tree-walking evaluator. Owns the global scope and the scope that is
/// current while evaluating; a call swaps the current scope for the
/// duration of the body and always restores it.
pub struct Interpreter {
    globals: Environment,
    environment: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Environment::new();
        Self {
            environment: globals.clone(),
            globals,
        }
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Evaluate top-level expressions in order, handing every non-nil result
    /// to `emit`. The first error stops the remaining expressions.
    pub fn interpret<F>(&mut self, expressions: &[Expr], mut emit: F) -> Result<(), RuntimeError>
    where
        F: FnMut(&Value),
    {
        for expr in expressions {
            let value = self.evaluate(expr)?;
            tracing::trace!(%expr, %value, "evaluated top-level expression");
            if !value.is_nil() {
                emit(&value);
            }
        }
        Ok(())
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Atom { value, .. } => Ok(literal_value(value)),
            Expr::Data(list) => Ok(Value::List(Rc::clone(list))),
            Expr::Symbol { name } => self.environment.get(name),
            Expr::Operator { op, operands } => self.apply_operator(op, operands),
            Expr::Keyword { token, args } => self.apply_keyword(token, args),
            Expr::List { head, tail } => self.evaluate_list(head, tail),
            Expr::FuncDefinition(declaration) => {
                self.define_function(declaration);
                Ok(Value::Nil)
            }
            Expr::Call { callee, token, args } => {
                let callee = self.evaluate(callee)?;
                self.call(callee, token, args)
            }
        }
    }

    fn evaluate_list(&mut self, head: &Expr, tail: &[Expr]) -> Result<Value, RuntimeError> {
        match head {
            Expr::Operator { op, .. } => self.apply_operator(op, tail),
            Expr::Keyword { token, .. } => self.apply_keyword(token, tail),
            Expr::Atom { .. } => Ok(Value::list(head.clone(), tail.to_vec())),
            // ((make_adder 1) 2): call the head, then apply its result to the tail.
            Expr::Call { token, .. } => {
                let callee = self.evaluate(head)?;
                self.call(callee, token, tail)
            }
            other => Err(RuntimeError::new(
                other.token().clone(),
                "Cannot evaluate a list with this head.",
            )),
        }
    }

    fn define_function(&mut self, declaration: &Rc<FuncDefinition>) {
        let function = Function {
            declaration: Rc::clone(declaration),
            closure: self.environment.clone(),
        };
        self.environment
            .define(declaration.name.lexeme.to_string(), Value::Function(Rc::new(function)));
    }

    fn call(&mut self, callee: Value, token: &Token, args: &[Expr]) -> Result<Value, RuntimeError> {
        let mut arguments = Vec::with_capacity(args.len());
        for arg in args {
            arguments.push(self.evaluate(arg)?);
        }

        let function = match callee {
            Value::Function(function) => function,
            _ => return Err(RuntimeError::new(token.clone(), "Can only call functions.")),
        };

        if arguments.len() != function.arity() {
            let error = RuntimeError::new(
                token.clone(),
                format!(
                    "Expected {} arguments but got {}.",
                    function.arity(),
                    arguments.len()
                ),
            );
            return Err(error.with_note(declared_as(&function)));
        }

        self.call_function(&function, arguments)
    }

    /// Bind `arguments` in a fresh scope enclosed by the function's closure and
    /// evaluate the body there.
    #[tracing::instrument(level = "trace", skip_all, fields(function = %function.name()))]
    pub fn call_function(&mut self, function: &Function, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        let environment = Environment::with_enclosing(&function.closure);
        for (param, argument) in function.declaration.params.iter().zip(arguments) {
            environment.define(param.lexeme.to_string(), argument);
        }
        self.evaluate_in(&function.declaration.body, environment)
    }

    fn evaluate_in(&mut self, body: &Expr, environment: Environment) -> Result<Value, RuntimeError> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let result = self.evaluate(body);
        self.environment = previous;
        result
    }

    fn apply_operator(&mut self, op: &Token, operands: &[Expr]) -> Result<Value, RuntimeError> {
        if operands.len() != 2 {
            return Err(RuntimeError::new(
                op.clone(),
                "Binary operation must only have two operands",
            ));
        }
        let left = self.evaluate(&operands[0])?;
        let right = self.evaluate(&operands[1])?;

        match op.kind {
            TokenKind::Plus => {
                if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
                    return Ok(Value::Number(a + b));
                }
                match (left.as_string(), right.as_string()) {
                    (Some(a), Some(b)) => Ok(Value::String(Rc::from(format!("{}{}", a, b)))),
                    _ => Err(RuntimeError::new(
                        op.clone(),
                        "Operands must be two numbers or two strings.",
                    )),
                }
            }
            TokenKind::Minus => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Number(a - b))
            }
            TokenKind::Star => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Number(a * b))
            }
            TokenKind::Slash => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Number(a / b))
            }
            TokenKind::Less => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Bool(a < b))
            }
            TokenKind::Greater => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Bool(a > b))
            }
            TokenKind::Equal => Ok(Value::Bool(values_equal(&left, &right))),
            _ => Err(RuntimeError::new(op.clone(), "Invalid operator")),
        }
    }

    fn apply_keyword(&mut self, token: &Token, args: &[Expr]) -> Result<Value, RuntimeError> {
        match token.kind {
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Nil => Ok(Value::Nil),
            TokenKind::Car => {
                expect_args(token, args, 1, "CAR operation must have 1 operand")?;
                match self.evaluate(&args[0])? {
                    Value::List(list) => self.evaluate(&list.head),
                    other => Ok(other),
                }
            }
            TokenKind::Cdr => {
                expect_args(token, args, 1, "CDR operation must have 1 operand")?;
                let value = self.evaluate(&args[0])?;
                let list = value.as_list().ok_or_else(|| {
                    RuntimeError::new(
                        token.clone(),
                        "CDR operation must have a list as the first operand",
                    )
                })?;
                match list.tail.split_first() {
                    Some((first, rest)) => Ok(Value::list(first.clone(), rest.to_vec())),
                    None => Ok(Value::Nil),
                }
            }
            TokenKind::Cons => {
                expect_args(token, args, 2, "CONS operation must have 2 operands")?;
                let first = self.evaluate(&args[0])?;
                let second = self.evaluate(&args[1])?;
                let head = datum(token, &first)?;
                let tail = match &second {
                    Value::List(list) => {
                        let mut tail = Vec::with_capacity(list.tail.len() + 1);
                        tail.push(list.head.clone());
                        tail.extend(list.tail.iter().cloned());
                        tail
                    }
                    Value::Nil => Vec::new(),
                    other => vec![datum(token, other)?],
                };
                Ok(Value::list(head, tail))
            }
            TokenKind::Cond => {
                for (index, condition) in args.iter().enumerate().step_by(2) {
                    let condition = self.evaluate(condition)?;
                    if is_truthy(&condition) {
                        if let Some(result) = args.get(index + 1) {
                            return self.evaluate(result);
                        }
                    }
                }
                Err(RuntimeError::new(token.clone(), "Lack of true condition"))
            }
            TokenKind::NumberQ => {
                expect_args(token, args, 1, "NUMBER? operation must have 1 operand")?;
                let value = self.evaluate(&args[0])?;
                Ok(Value::Bool(matches!(value, Value::Number(_))))
            }
            TokenKind::SymbolQ => {
                expect_args(token, args, 1, "SYMBOL? operation must have 1 operand")?;
                Ok(Value::Bool(matches!(args[0], Expr::Symbol { .. })))
            }
            TokenKind::ListQ => {
                expect_args(token, args, 1, "LIST? operation must have 1 operand")?;
                let value = self.evaluate(&args[0])?;
                Ok(Value::Bool(matches!(value, Value::List(_))))
            }
            TokenKind::NilQ => {
                expect_args(token, args, 1, "NIL? operation must have 1 operand")?;
                let value = self.evaluate(&args[0])?;
                Ok(Value::Bool(value.is_nil()))
            }
            TokenKind::AndQ => {
                expect_args(token, args, 2, "AND? operation must have 2 operands")?;
                let left = self.evaluate(&args[0])?;
                let right = self.evaluate(&args[1])?;
                Ok(Value::Bool(is_truthy(&left) && is_truthy(&right)))
            }
            TokenKind::OrQ => {
                expect_args(token, args, 2, "OR? operation must have 2 operands")?;
                let left = self.evaluate(&args[0])?;
                let right = self.evaluate(&args[1])?;
                // A false `or?` yields nil, not `false`.
                if is_truthy(&left) || is_truthy(&right) {
                    Ok(Value::Bool(true))
                } else {
                    Ok(Value::Nil)
                }
            }
            TokenKind::NotQ => {
                expect_args(token, args, 1, "NOT? operation must have 1 operand")?;
                let value = self.evaluate(&args[0])?;
                Ok(Value::Bool(!is_truthy(&value)))
            }
            TokenKind::Set => {
                expect_args(token, args, 2, "SET operation must have 2 operands")?;
                let name = match &args[0] {
                    Expr::Symbol { name } => name,
                    _ => {
                        return Err(RuntimeError::new(
                            token.clone(),
                            "SET operation must have a symbol as the first operand",
                        ))
                    }
                };
                let value = self.evaluate(&args[1])?;
                self.environment.define(name.lexeme.to_string(), value);
                Ok(Value::Nil)
            }
            TokenKind::Define => Err(RuntimeError::new(
                token.clone(),
                "Unexpected 'define' outside a function definition.",
            )),
            _ => Err(RuntimeError::new(token.clone(), "Unknown keyword.")),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn expect_args(token: &Token, args: &[Expr], count: usize, message: &str) -> Result<(), RuntimeError> {
    if args.len() == count {
        Ok(())
    } else {
        Err(RuntimeError::new(token.clone(), message))
    }
}

fn number_operands(op: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(RuntimeError::new(op.clone(), "Operators must be numbers")),
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(Rc::clone(s)),
    }
}

fn declared_as(function: &Function) -> String {
    let declaration = &function.declaration;
    let mut form = format!("({}", declaration.name.lexeme);
    for param in &declaration.params {
        form.push(' ');
        form.push_str(&param.lexeme);
    }
    form.push(')');
    format!("'{}' is declared as {}", declaration.name.lexeme, form)
}

/// Turn an evaluated value back into list data so `cons` can store it.
fn datum(at: &Token, value: &Value) -> Result<Expr, RuntimeError> {
    let synthetic = |kind: TokenKind, lexeme: String, literal: Option<Literal>| {
        Token::new(kind, lexeme, literal, at.line)
    };
    let expr = match value {
        Value::Number(n) => {
            let literal = Literal::Number(*n);
            Expr::Atom {
                token: synthetic(TokenKind::Number, format_number(*n), Some(literal.clone())),
                value: literal,
            }
        }
        Value::String(s) => {
            let literal = Literal::String(Rc::clone(s));
            Expr::Atom {
                token: synthetic(TokenKind::String, format!("\"{}\"", s), Some(literal.clone())),
                value: literal,
            }
        }
        Value::Bool(true) => Expr::keyword(synthetic(TokenKind::True, "true".into(), None)),
        Value::Bool(false) => Expr::keyword(synthetic(TokenKind::False, "false".into(), None)),
        Value::Nil => Expr::keyword(synthetic(TokenKind::Nil, "nil".into(), None)),
        Value::List(list) => Expr::Data(Rc::clone(list)),
        Value::Function(_) => {
            return Err(RuntimeError::new(at.clone(), "Cannot store a function in a list."))
        }
    };
    Ok(expr)
}
