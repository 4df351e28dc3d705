pub mod parser;
pub mod environment;
pub mod error;
pub mod value_utils;
pub mod evaluator;
pub mod session;

pub use error::{LispError, RuntimeError};
pub use environment::Environment;
pub use parser::{Parser, ParseError, ParseResult};
pub use evaluator::Interpreter;
pub use session::Session;

use crate::diagnostic::Diagnostic;
use crate::lexer::scan;
use crate::value::Value;

/// Run `source` in a fresh interpreter. Any syntax error stops the unit
/// before evaluation.
pub fn parse_and_run(source: &str) -> Result<Vec<Value>, LispError> {
    let scanned = scan(source);
    let parsed = parser::parse(scanned.tokens);

    let mut errors = scanned.errors;
    errors.extend(parsed.errors);
    if !errors.is_empty() {
        return Err(LispError::Syntax(errors));
    }

    let mut interpreter = Interpreter::new();
    let mut values = Vec::new();
    interpreter.interpret(&parsed.expressions, |value| values.push(value.clone()))?;
    Ok(values)
}

pub fn parse_and_run_with_diagnostics(source: &str) -> Result<Vec<Value>, Vec<Diagnostic>> {
    parse_and_run(source).map_err(|err| err.to_diagnostics())
}
