use std::{fmt::Display, sync::Arc};

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position, Span};

/// The single error a failed lex or parse reports.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{file}:{}: {internal_error}", .span.start.0)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
    file: Arc<str>,
    expected: Vec<TokenKind>,
}

/// Which phase rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Lex,
    Syntax,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span, file: Arc<str>) -> Self {
        Error {
            internal_error: error_impl,
            span,
            file,
            expected: vec![],
        }
    }

    /// Attaches the token kinds that would have been accepted.
    pub fn with_expected(mut self, expected: &[TokenKind]) -> Self {
        self.expected = expected.to_vec();
        self
    }

    pub fn get_position(&self) -> Position {
        self.span.start
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn get_file(&self) -> &str {
        &self.file
    }

    pub fn get_expected(&self) -> &[TokenKind] {
        &self.expected
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn class(&self) -> ErrorClass {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedChar
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::EmptyCharLiteral
            | ErrorImpl::OverlongCharLiteral
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::InputTooLarge { .. }
            | ErrorImpl::TooManyTokens { .. }
            | ErrorImpl::IdentifierTooLong { .. }
            | ErrorImpl::StringTooLong { .. } => ErrorClass::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedExpression { .. }
            | ErrorImpl::ExpectedType { .. }
            | ErrorImpl::ExpectedDeclaration { .. }
            | ErrorImpl::UnclosedDelimiter { .. }
            | ErrorImpl::MalformedCaseClause { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorClass::Syntax,
        }
    }

    pub fn is_lex_error(&self) -> bool {
        self.class() == ErrorClass::Lex
    }

    pub fn is_syntax_error(&self) -> bool {
        self.class() == ErrorClass::Syntax
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedChar => "UnterminatedChar",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::EmptyCharLiteral => "EmptyCharLiteral",
            ErrorImpl::OverlongCharLiteral => "OverlongCharLiteral",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InputTooLarge { .. } => "InputTooLarge",
            ErrorImpl::TooManyTokens { .. } => "TooManyTokens",
            ErrorImpl::IdentifierTooLong { .. } => "IdentifierTooLong",
            ErrorImpl::StringTooLong { .. } => "StringTooLong",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::ExpectedType { .. } => "ExpectedType",
            ErrorImpl::ExpectedDeclaration { .. } => "ExpectedDeclaration",
            ErrorImpl::UnclosedDelimiter { .. } => "UnclosedDelimiter",
            ErrorImpl::MalformedCaseClause { .. } => "MalformedCaseClause",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add a closing `\"` to the string literal"))
            }
            ErrorImpl::UnterminatedChar => {
                ErrorTip::Suggestion(String::from("add a closing `'` to the char literal"))
            }
            ErrorImpl::InvalidEscape { escape } => ErrorTip::Suggestion(format!(
                "`{}` is not a valid escape, expected one of \\n \\r \\t \\\\ \\\" \\' \\0 \\xHH \\uHHHH",
                escape
            )),
            ErrorImpl::EmptyCharLiteral => {
                ErrorTip::Suggestion(String::from("a char literal must hold exactly one character"))
            }
            ErrorImpl::OverlongCharLiteral => ErrorTip::Suggestion(String::from(
                "a char literal must hold exactly one character, use a string instead",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InputTooLarge { size, limit } => ErrorTip::Suggestion(format!(
                "source is {} bytes, the limit is {}",
                size, limit
            )),
            ErrorImpl::TooManyTokens { limit } => {
                ErrorTip::Suggestion(format!("source holds more than {} tokens", limit))
            }
            ErrorImpl::IdentifierTooLong { limit } => {
                ErrorTip::Suggestion(format!("identifiers are limited to {} bytes", limit))
            }
            ErrorImpl::StringTooLong { limit } => {
                ErrorTip::Suggestion(format!("string literals are limited to {} bytes", limit))
            }
            ErrorImpl::UnexpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("expected {}, found {}", expected, found))
            }
            ErrorImpl::ExpectedExpression { found } => {
                ErrorTip::Suggestion(format!("expected expression, found {}", found))
            }
            ErrorImpl::ExpectedType { found } => {
                ErrorTip::Suggestion(format!("expected type, found {}", found))
            }
            ErrorImpl::ExpectedDeclaration { found } => ErrorTip::Suggestion(format!(
                "expected `fn`, `type`, `let`, `var`, `extern` or `import`, found {}",
                found
            )),
            ErrorImpl::UnclosedDelimiter { expected, opener } => ErrorTip::Suggestion(format!(
                "expected {} to close the delimiter opened at offset {}",
                expected, opener.start.0
            )),
            ErrorImpl::MalformedCaseClause { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "nesting is limited to {} levels, split the expression up",
                limit
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unrecognised character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated char literal")]
    UnterminatedChar,
    #[error("invalid escape sequence: {escape:?}")]
    InvalidEscape { escape: String },
    #[error("empty char literal")]
    EmptyCharLiteral,
    #[error("char literal holds more than one character")]
    OverlongCharLiteral,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("source is {size} bytes, the limit is {limit}")]
    InputTooLarge { size: usize, limit: usize },
    #[error("source holds more than {limit} tokens")]
    TooManyTokens { limit: usize },
    #[error("identifier longer than {limit} bytes")]
    IdentifierTooLong { limit: usize },
    #[error("string literal longer than {limit} bytes")]
    StringTooLong { limit: usize },

    // Syntactic
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("expected expression, found {found}")]
    ExpectedExpression { found: String },
    #[error("expected type, found {found}")]
    ExpectedType { found: String },
    #[error("expected declaration, found {found}")]
    ExpectedDeclaration { found: String },
    #[error("expected {expected} to close the delimiter opened at offset {}", .opener.start.0)]
    UnclosedDelimiter { expected: String, opener: Span },
    #[error("malformed case clause: {message}")]
    MalformedCaseClause { message: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
