use std::fmt;
use std::rc::Rc;

use crate::token::{Literal, Token};
use crate::value::ListValue;

/// Expression tree produced by the parser. Nodes are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal number or string.
    Atom { value: Literal, token: Token },
    /// A reference to a bound name, resolved at evaluation time.
    Symbol { name: Token },
    /// A binary arithmetic/comparison application.
    Operator { op: Token, operands: Vec<Expr> },
    /// A special-form application.
    Keyword { token: Token, args: Vec<Expr> },
    /// Literal list data when `head` is an atom, otherwise a dispatch wrapper
    /// whose tail becomes the operands of an operator or keyword head.
    List { head: Box<Expr>, tail: Vec<Expr> },
    /// List data built at run time by `cons`. Evaluates to itself.
    Data(Rc<ListValue>),
    FuncDefinition(Rc<FuncDefinition>),
    Call { callee: Box<Expr>, token: Token, args: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDefinition {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Expr,
}

impl Expr {
    pub fn keyword(token: Token) -> Self {
        Expr::Keyword { token, args: Vec::new() }
    }

    pub fn operator(op: Token) -> Self {
        Expr::Operator { op, operands: Vec::new() }
    }

    /// The token that best locates this node in the source.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Atom { token, .. } => token,
            Expr::Symbol { name } => name,
            Expr::Operator { op, .. } => op,
            Expr::Keyword { token, .. } => token,
            Expr::List { head, .. } => head.token(),
            Expr::Data(list) => list.head.token(),
            Expr::FuncDefinition(def) => &def.name,
            Expr::Call { token, .. } => token,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, head: &dyn fmt::Display, rest: &[Expr]) -> fmt::Result {
    write!(f, "({}", head)?;
    for expr in rest {
        write!(f, " {}", expr)?;
    }
    write!(f, ")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom { value, .. } => write!(f, "{}", value),
            Expr::Symbol { name } => write!(f, "{}", name.lexeme),
            Expr::Operator { op, operands } if operands.is_empty() => write!(f, "{}", op.lexeme),
            Expr::Operator { op, operands } => write_list(f, &op.lexeme, operands),
            Expr::Keyword { token, args } if args.is_empty() => write!(f, "{}", token.lexeme),
            Expr::Keyword { token, args } => write_list(f, &token.lexeme, args),
            Expr::List { head, tail } => write_list(f, head, tail),
            Expr::Data(list) => write_list(f, &list.head, &list.tail),
            Expr::FuncDefinition(def) => {
                let params: Vec<&str> = def.params.iter().map(|p| p.lexeme.as_ref()).collect();
                write!(f, "(define {} ({}) {})", def.name.lexeme, params.join(" "), def.body)
            }
            Expr::Call { callee, args, .. } => write_list(f, callee, args),
        }
    }
}
