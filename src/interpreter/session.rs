use super::error::RuntimeError;
use super::evaluator::Interpreter;
use super::parser::parse;
use crate::diagnostic::SyntaxError;
use crate::lexer::scan;
use crate::value::Value;

/// One interpreter shared across many source units, plus the syntax errors
/// reported so far. The error flag stays set until `reset_diagnostics`.
pub struct Session {
    interpreter: Interpreter,
    diagnostics: Vec<SyntaxError>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scan, parse and evaluate `source`, collecting every non-nil value.
    pub fn run(&mut self, source: &str) -> Result<Vec<Value>, RuntimeError> {
        let mut values = Vec::new();
        self.run_with(source, |value| values.push(value.clone()))?;
        Ok(values)
    }

    /// Like `run`, but hands each value to `emit` as soon as it is produced,
    /// so values before a runtime error are not lost.
    ///
    /// Expressions the parser recovered are still evaluated when others in the
    /// same unit had syntax errors; check `had_error` afterwards.
    pub fn run_with<F>(&mut self, source: &str, emit: F) -> Result<(), RuntimeError>
    where
        F: FnMut(&Value),
    {
        let scanned = scan(source);
        tracing::debug!(tokens = scanned.tokens.len(), errors = scanned.errors.len(), "scanned");
        self.diagnostics.extend(scanned.errors);

        let parsed = parse(scanned.tokens);
        tracing::debug!(
            expressions = parsed.expressions.len(),
            errors = parsed.errors.len(),
            "parsed"
        );
        self.diagnostics.extend(parsed.errors);

        self.interpreter.interpret(&parsed.expressions, emit)
    }

    pub fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[SyntaxError] {
        &self.diagnostics
    }

    pub fn reset_diagnostics(&mut self) {
        self.diagnostics.clear();
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
