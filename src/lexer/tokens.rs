use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("let", TokenKind::Let);
        map.insert("var", TokenKind::Var);
        map.insert("type", TokenKind::Type);
        map.insert("extern", TokenKind::Extern);
        map.insert("import", TokenKind::Import);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("loop", TokenKind::Loop);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("print", TokenKind::Print);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("defer", TokenKind::Defer);
        map.insert("as", TokenKind::As);
        map.insert("sizeof", TokenKind::Sizeof);
        map.insert("some", TokenKind::Some);
        map.insert("none", TokenKind::None);
        map.insert("nil", TokenKind::Nil);
        map.insert("context", TokenKind::Context);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);

        for primitive in PRIMITIVE_TYPES {
            map.insert(*primitive, TokenKind::Primitive);
        }
        map
    };
}

/// Keywords naming builtin types. They all lex to [`TokenKind::Primitive`].
pub const PRIMITIVE_TYPES: &[&str] = &[
    "void", "bool", "int", "str", "char", "f32", "f64", "i8", "i16", "i32", "i64", "isize", "u8",
    "u16", "u32", "u64", "usize", "struct", "enum",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    Integer,
    Float,
    String,
    Char,
    Comment,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    ShiftLeft,
    ShiftRight,

    Or,  // ||
    And, // &&
    Pipe,
    Ampersand,
    Caret,
    Tilde,

    Dot,
    DotDot,
    DotDotEquals,
    Ellipsis,
    Semicolon,
    Colon,
    ColonColon,
    Question,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Fn,
    Let,
    Var,
    Type,
    Extern,
    Import,
    If,
    Else,
    While,
    For,
    Loop,
    Switch,
    Case,
    Print,
    Return,
    Break,
    Continue,
    Defer,
    As,
    Sizeof,
    Some,
    None,
    Nil,
    Context,
    True,
    False,
    Primitive,
}

impl TokenKind {
    /// How the token kind reads in a diagnostic.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::String => "string literal",
            TokenKind::Char => "char literal",
            TokenKind::Comment => "comment",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::OpenCurly => "`{`",
            TokenKind::CloseCurly => "`}`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Assignment => "`=`",
            TokenKind::Equals => "`==`",
            TokenKind::Not => "`!`",
            TokenKind::NotEquals => "`!=`",
            TokenKind::Less => "`<`",
            TokenKind::LessEquals => "`<=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEquals => "`>=`",
            TokenKind::ShiftLeft => "`<<`",
            TokenKind::ShiftRight => "`>>`",
            TokenKind::Or => "`||`",
            TokenKind::And => "`&&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Caret => "`^`",
            TokenKind::Tilde => "`~`",
            TokenKind::Dot => "`.`",
            TokenKind::DotDot => "`..`",
            TokenKind::DotDotEquals => "`..=`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::ColonColon => "`::`",
            TokenKind::Question => "`?`",
            TokenKind::Comma => "`,`",
            TokenKind::Plus => "`+`",
            TokenKind::Dash => "`-`",
            TokenKind::Slash => "`/`",
            TokenKind::Star => "`*`",
            TokenKind::Fn => "`fn`",
            TokenKind::Let => "`let`",
            TokenKind::Var => "`var`",
            TokenKind::Type => "`type`",
            TokenKind::Extern => "`extern`",
            TokenKind::Import => "`import`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::For => "`for`",
            TokenKind::Loop => "`loop`",
            TokenKind::Switch => "`switch`",
            TokenKind::Case => "`case`",
            TokenKind::Print => "`print`",
            TokenKind::Return => "`return`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::Defer => "`defer`",
            TokenKind::As => "`as`",
            TokenKind::Sizeof => "`sizeof`",
            TokenKind::Some => "`some`",
            TokenKind::None => "`none`",
            TokenKind::Nil => "`nil`",
            TokenKind::Context => "`context`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Primitive => "primitive type",
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::Let
                | TokenKind::Var
                | TokenKind::Type
                | TokenKind::Extern
                | TokenKind::Import
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Loop
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Print
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Defer
                | TokenKind::As
                | TokenKind::Sizeof
                | TokenKind::Some
                | TokenKind::None
                | TokenKind::Nil
                | TokenKind::Context
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Primitive
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// A lexed token. `value` is the exact source text, quotes included for
/// string and char literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end of input"),
            _ => write!(f, "`{}`", self.value),
        }
    }
}
