use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural
    LeftParen,
    RightParen,
    Dot,
    Semicolon,

    // Arithmetic / comparison operators
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    Less,
    Greater,

    // Literals
    Symbol,
    String,
    Number,
    True,
    Nil,
    False,

    // Special-form keywords
    Define,
    Set,
    Cons,
    Cond,
    Car,
    Cdr,
    AndQ,
    OrQ,
    NotQ,
    NumberQ,
    SymbolQ,
    ListQ,
    NilQ,

    Eof,
}

impl TokenKind {
    /// Keywords that the parser turns into `Expr::Keyword` nodes.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Define
                | TokenKind::Set
                | TokenKind::Cons
                | TokenKind::Cond
                | TokenKind::Car
                | TokenKind::Cdr
                | TokenKind::True
                | TokenKind::Nil
                | TokenKind::False
                | TokenKind::AndQ
                | TokenKind::OrQ
                | TokenKind::NotQ
                | TokenKind::NumberQ
                | TokenKind::SymbolQ
                | TokenKind::ListQ
                | TokenKind::NilQ
        )
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Equal
                | TokenKind::Less
                | TokenKind::Greater
        )
    }
}

/// Looks up an identifier in the fixed keyword table.
pub fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "define" => TokenKind::Define,
        "set" => TokenKind::Set,
        "cons" => TokenKind::Cons,
        "cond" => TokenKind::Cond,
        "car" => TokenKind::Car,
        "cdr" => TokenKind::Cdr,
        "nil" => TokenKind::Nil,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "and?" => TokenKind::AndQ,
        "or?" => TokenKind::OrQ,
        "not?" => TokenKind::NotQ,
        "number?" => TokenKind::NumberQ,
        "symbol?" => TokenKind::SymbolQ,
        "list?" => TokenKind::ListQ,
        "nil?" => TokenKind::NilQ,
        _ => return None,
    };
    Some(kind)
}

/// Decoded value of a number or string token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(Rc<str>),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", crate::format::format_number(*n)),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Rc<str>,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<Rc<str>>, literal: Option<Literal>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", None, line)
    }
}
