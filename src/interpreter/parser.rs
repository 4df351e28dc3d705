use std::rc::Rc;

use crate::ast::{Expr, FuncDefinition};
use crate::diagnostic::SyntaxError;
use crate::token::{Token, TokenKind};

pub type ParseError = SyntaxError;

pub struct ParseResult {
    pub expressions: Vec<Expr>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Recursive-descent parser over a token stream ending in `Eof`.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    /// Parse every top-level expression, recovering after each error at the
    /// next `;` so later expressions are still produced.
    pub fn parse(mut self) -> ParseResult {
        let mut expressions = Vec::new();
        while !self.is_at_end() {
            if self.match_kind(TokenKind::Semicolon) {
                continue;
            }
            match self.expression() {
                Ok(expr) => expressions.push(expr),
                Err(err) => {
                    tracing::debug!(error = %err, "parse error");
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }
        ParseResult {
            expressions,
            errors: self.errors,
        }
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        if self.match_kind(TokenKind::LeftParen) {
            self.list()
        } else {
            self.atom()
        }
    }

    fn list(&mut self) -> Result<Expr, ParseError> {
        let head = self.expression()?;

        match head {
            Expr::Symbol { name } => self.function_call(name),
            Expr::Keyword { ref token, .. } if token.kind == TokenKind::Define => {
                self.function_definition()
            }
            head => {
                let tail = self.until_right_paren()?;
                self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
                Ok(Expr::List {
                    head: Box::new(head),
                    tail,
                })
            }
        }
    }

    fn function_call(&mut self, name: Token) -> Result<Expr, ParseError> {
        let args = self.until_right_paren()?;
        self.consume(TokenKind::RightParen, "Expect ')' after function call.")?;
        Ok(Expr::Call {
            callee: Box::new(Expr::Symbol { name: name.clone() }),
            token: name,
            args,
        })
    }

    /// `(define name (params...) body)` or `(define (name params...) body)`.
    fn function_definition(&mut self) -> Result<Expr, ParseError> {
        let header = self.match_kind(TokenKind::LeftParen);
        let name = self.consume(TokenKind::Symbol, "Expect function name.")?;
        if !header {
            self.consume(TokenKind::LeftParen, "Expect '(' after function name.")?;
        }
        let params = self.parameters()?;

        let body = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after function definition.")?;

        Ok(Expr::FuncDefinition(Rc::new(FuncDefinition { name, params, body })))
    }

    /// Parameter names up to and including the closing `)`.
    fn parameters(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut params = Vec::new();
        while !self.match_kind(TokenKind::RightParen) {
            params.push(self.consume(TokenKind::Symbol, "Expect parameter name.")?);
        }
        Ok(params)
    }

    fn until_right_paren(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = Vec::new();
        while !self.check(TokenKind::RightParen) && !self.is_at_end() {
            exprs.push(self.expression()?);
        }
        Ok(exprs)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();

        if token.kind.is_keyword() {
            self.advance();
            return Ok(Expr::keyword(token));
        }

        if token.kind.is_operator() {
            self.advance();
            return Ok(Expr::operator(token));
        }

        match token.kind {
            TokenKind::Number | TokenKind::String => {
                self.advance();
                let value = token
                    .literal
                    .clone()
                    .ok_or_else(|| ParseError::at_token(&token, "Literal token without a value."))?;
                Ok(Expr::Atom { value, token })
            }
            TokenKind::Symbol => {
                self.advance();
                Ok(Expr::Symbol { name: token })
            }
            _ => Err(ParseError::at_token(&token, "Expect expression.")),
        }
    }

    /// Skip tokens until just past a `;` or the end of input.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.advance().kind == TokenKind::Semicolon {
                return;
            }
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::at_token(self.peek(), message))
        }
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }
}

/// Parse a token sequence produced by the scanner.
pub fn parse(tokens: Vec<Token>) -> ParseResult {
    Parser::new(tokens).parse()
}
