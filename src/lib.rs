pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod format;
pub mod interpreter;
pub mod lexer;
pub mod token;
pub mod value;

pub use ast::{Expr, FuncDefinition};
pub use interpreter::{Interpreter, Session};
pub use token::{Token, TokenKind};
pub use value::Value;
