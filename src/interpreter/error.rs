use thiserror::Error;

use crate::diagnostic::{Diagnostic, Location, SyntaxError};
use crate::token::Token;

/// An error raised while evaluating; carries the token it is blamed on.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {}] Runtime Error: {message}", .token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
    /// Extra context shown under the rendered diagnostic.
    pub note: Option<String>,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        Self {
            token,
            message: message.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn line(&self) -> usize {
        self.token.line
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.message.clone())
            .with_code("E0201")
            .at(self.token.line, Location::of_token(&self.token));
        match &self.note {
            Some(note) => diagnostic.with_note(note.clone()),
            None => diagnostic,
        }
    }
}

/// Everything that can stop a source unit from producing its values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LispError {
    #[error("{}", format_syntax(.0))]
    Syntax(Vec<SyntaxError>),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

fn format_syntax(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl LispError {
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            LispError::Syntax(errors) => errors.iter().map(SyntaxError::to_diagnostic).collect(),
            LispError::Runtime(err) => vec![err.to_diagnostic()],
        }
    }
}
