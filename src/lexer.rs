use std::rc::Rc;

use chumsky::prelude::*;

use crate::diagnostic::{Location, SyntaxError};
use crate::token::{self, Literal, Token, TokenKind};

pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<SyntaxError>,
}

impl ScanResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Raw lexer output, before line numbers and diagnostics are attached.
/// Malformed input is kept as its own lexeme so one bad character never
/// stops the scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    Token(TokenKind),
    Number(f64),
    String(String),
    InvalidNumber,
    UnterminatedString,
    Unexpected(char),
}

pub fn lexer<'a>()
-> impl Parser<'a, &'a str, Vec<(Lexeme, SimpleSpan)>, extra::Err<Simple<'a, char>>> {
    let number = any()
        .filter(|c: &char| c.is_ascii_digit())
        .then(any().filter(|c: &char| c.is_ascii_digit() || *c == '.').repeated())
        .to_slice()
        .map(|s: &str| match s.parse::<f64>() {
            Ok(n) if s.matches('.').count() <= 1 => Lexeme::Number(n),
            _ => Lexeme::InvalidNumber,
        });

    // Strings may span lines and have no escapes.
    let string = just('"')
        .ignore_then(none_of("\"").repeated().collect::<String>())
        .then(just('"').or_not())
        .map(|(text, close)| match close {
            Some(_) => Lexeme::String(text),
            None => Lexeme::UnterminatedString,
        });

    let word = any()
        .filter(|c: &char| c.is_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == '_' || *c == '?')
                .repeated(),
        )
        .to_slice()
        .map(|s: &str| Lexeme::Token(token::keyword(s).unwrap_or(TokenKind::Symbol)));

    let punct = choice((
        just('(').to(TokenKind::LeftParen),
        just(')').to(TokenKind::RightParen),
        just('.').to(TokenKind::Dot),
        just(';').to(TokenKind::Semicolon),
        just('+').to(TokenKind::Plus),
        just('-').to(TokenKind::Minus),
        just('*').to(TokenKind::Star),
        just('/').to(TokenKind::Slash),
        just('=').to(TokenKind::Equal),
        just('<').to(TokenKind::Less),
        just('>').to(TokenKind::Greater),
    ))
    .map(Lexeme::Token);

    let unexpected = any().map(Lexeme::Unexpected);

    let comment = just("//").then(none_of("\n").repeated()).ignored();
    let skip = choice((comment, text::whitespace().at_least(1))).repeated();

    let token = choice((number, string, word, punct, unexpected))
        .map_with(|lexeme, e| (lexeme, e.span()));

    skip.clone()
        .ignore_then(token.then_ignore(skip).repeated().collect())
        .then_ignore(end())
}

fn line_at(source: &str, offset: usize) -> usize {
    1 + source[..offset].matches('\n').count()
}

fn scan_error(line: usize, message: impl Into<String>) -> SyntaxError {
    let error = SyntaxError::new(line, Location::Unknown, message);
    tracing::debug!(%error, "scan error");
    error
}

/// Scan a whole source unit. Never fails: problems are collected as
/// `SyntaxError`s and scanning resumes after the offending text.
pub fn scan(source: &str) -> ScanResult {
    let (lexemes, parse_errors) = lexer().parse(source).into_output_errors();

    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for (lexeme, span) in lexemes.unwrap_or_default() {
        let line = line_at(source, span.start);
        let text = &source[span.start..span.end];
        match lexeme {
            Lexeme::Token(kind) => tokens.push(Token::new(kind, text, None, line)),
            Lexeme::Number(n) => {
                tokens.push(Token::new(TokenKind::Number, text, Some(Literal::Number(n)), line))
            }
            Lexeme::String(s) => tokens.push(Token::new(
                TokenKind::String,
                text,
                Some(Literal::String(Rc::from(s))),
                line,
            )),
            Lexeme::InvalidNumber => {
                errors.push(scan_error(line, format!("Invalid number '{}'.", text)))
            }
            Lexeme::UnterminatedString => errors.push(scan_error(line, "Unterminated string.")),
            Lexeme::Unexpected(c) => {
                errors.push(scan_error(line, format!("Unexpected character '{}'.", c)))
            }
        }
    }

    for err in parse_errors {
        let line = line_at(source, err.span().start);
        let message = match err.found() {
            Some(c) => format!("Unexpected character '{}'.", c),
            None => "Unexpected end of input.".to_string(),
        };
        errors.push(scan_error(line, message));
    }

    tokens.push(Token::eof(line_at(source, source.len())));
    ScanResult { tokens, errors }
}
