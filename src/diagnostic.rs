use std::fmt;
use std::rc::Rc;

use owo_colors::OwoColorize;
use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Where on its line a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Reported by the scanner, which has no token to point at.
    Unknown,
    AtEnd,
    At(Rc<str>),
}

impl Location {
    pub fn of_token(token: &Token) -> Self {
        if token.kind == TokenKind::Eof {
            Location::AtEnd
        } else {
            Location::At(token.lexeme.clone())
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unknown => Ok(()),
            Location::AtEnd => write!(f, " at end"),
            Location::At(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

/// A scan-time or parse-time error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub location: Location,
    pub message: String,
}

impl SyntaxError {
    pub fn new(line: usize, location: Location, message: impl Into<String>) -> Self {
        Self {
            line,
            location,
            message: message.into(),
        }
    }

    pub fn at_token(token: &Token, message: impl Into<String>) -> Self {
        Self::new(token.line, Location::of_token(token), message)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.message.clone())
            .with_code("E0101")
            .at(self.line, self.location.clone())
    }
}

/// A complete diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: Option<String>,
    pub message: String,
    pub line: usize,
    pub location: Location,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            line: 0,
            location: Location::Unknown,
            notes: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn at(mut self, line: usize, location: Location) -> Self {
        self.line = line;
        self.location = location;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Diagnostic renderer for Rust-like error output
pub struct DiagnosticRenderer<'a> {
    source: &'a str,
    file_name: &'a str,
    use_color: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(source: &'a str, file_name: &'a str, use_color: bool) -> Self {
        Self {
            source,
            file_name,
            use_color,
        }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        let header = match &diagnostic.code {
            Some(code) => format!("{}[{}]", self.style_red_bold("error"), code),
            None => self.style_red_bold("error"),
        };
        output.push_str(&format!("{}: {}\n", header, self.style_bold(&diagnostic.message)));

        if let Some(content) = self.source.lines().nth(diagnostic.line.saturating_sub(1)) {
            let column = self.column_of(content, &diagnostic.location);
            output.push_str(&format!(
                "  {} {}:{}:{}\n",
                self.style_blue("-->"),
                self.file_name,
                diagnostic.line,
                column.map_or(1, |(start, _)| start + 1)
            ));

            let width = diagnostic.line.to_string().len();
            let gutter = format!("{} {}", " ".repeat(width + 1), self.style_blue("|"));
            output.push_str(&format!("{}\n", gutter));
            output.push_str(&format!(
                "{:>width$} {} {}\n",
                self.style_blue(&diagnostic.line.to_string()),
                self.style_blue("|"),
                content,
                width = width + 1
            ));
            if let Some((start, len)) = column {
                output.push_str(&format!(
                    "{} {}{}\n",
                    gutter,
                    " ".repeat(start),
                    self.style_red(&"^".repeat(len.max(1)))
                ));
            }
            output.push_str(&format!("{}\n", gutter));
        }

        for note in &diagnostic.notes {
            output.push_str(&format!(
                "  {} {} {}\n",
                self.style_blue("="),
                self.style_bold("note:"),
                note
            ));
        }

        output
    }

    /// Column and width of the lexeme on its line, if it can be found.
    fn column_of(&self, content: &str, location: &Location) -> Option<(usize, usize)> {
        match location {
            Location::At(lexeme) if !lexeme.is_empty() => content
                .find(lexeme.as_ref())
                .map(|byte| (content[..byte].chars().count(), lexeme.chars().count())),
            Location::AtEnd => Some((content.chars().count(), 1)),
            _ => None,
        }
    }

    fn style_red(&self, s: &str) -> String {
        if self.use_color {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }

    fn style_red_bold(&self, s: &str) -> String {
        if self.use_color {
            s.red().bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn style_blue(&self, s: &str) -> String {
        if self.use_color {
            s.blue().to_string()
        } else {
            s.to_string()
        }
    }

    fn style_bold(&self, s: &str) -> String {
        if self.use_color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }
}

/// Render multiple diagnostics
pub fn render_diagnostics(source: &str, file_name: &str, diagnostics: &[Diagnostic], use_color: bool) -> String {
    let renderer = DiagnosticRenderer::new(source, file_name, use_color);
    let mut output = String::new();

    for diagnostic in diagnostics {
        output.push_str(&renderer.render(diagnostic));
        output.push('\n');
    }

    let error_count = diagnostics.len();
    if error_count > 0 {
        output.push_str(&format!(
            "error: aborting due to {} error{}\n",
            error_count,
            if error_count == 1 { "" } else { "s" }
        ));
    }

    output
}
