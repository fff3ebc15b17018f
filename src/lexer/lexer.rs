use std::{iter::Peekable, str::CharIndices, sync::Arc};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    config::ParserLimits,
    errors::errors::{Error, ErrorImpl},
    Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handles a pattern match of the given byte length at the lexer's position.
/// Returns `None` for input that produces no token (whitespace, comments).
pub type RegexHandler = fn(&mut Lexer, usize) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).expect("lexer patterns are valid regexes"),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the current position wins,
    // so longer operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("^\\s+", skip_handler),
        pattern("^//[^\\n]*", comment_handler),
        pattern("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("^0[xX][0-9a-fA-F]+", MK_DEFAULT_HANDLER!(TokenKind::Integer)),
        pattern("^[0-9]+\\.[0-9]+([eE][+-]?[0-9]+)?", MK_DEFAULT_HANDLER!(TokenKind::Float)),
        pattern("^[0-9]+", MK_DEFAULT_HANDLER!(TokenKind::Integer)),
        pattern("^\"", string_handler),
        pattern("^'", char_handler),
        pattern("^\\.\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::Ellipsis)),
        pattern("^\\.\\.=", MK_DEFAULT_HANDLER!(TokenKind::DotDotEquals)),
        pattern("^\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::DotDot)),
        pattern("^\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot)),
        pattern("^::", MK_DEFAULT_HANDLER!(TokenKind::ColonColon)),
        pattern("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon)),
        pattern("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        pattern("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment)),
        pattern("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals)),
        pattern("^!", MK_DEFAULT_HANDLER!(TokenKind::Not)),
        pattern("^<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft)),
        pattern("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals)),
        pattern("^<", MK_DEFAULT_HANDLER!(TokenKind::Less)),
        pattern("^>>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight)),
        pattern("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals)),
        pattern("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater)),
        pattern("^&&", MK_DEFAULT_HANDLER!(TokenKind::And)),
        pattern("^&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand)),
        pattern("^\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or)),
        pattern("^\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe)),
        pattern("^\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret)),
        pattern("^~", MK_DEFAULT_HANDLER!(TokenKind::Tilde)),
        pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        pattern("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash)),
        pattern("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star)),
        pattern("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
        pattern("^\\?", MK_DEFAULT_HANDLER!(TokenKind::Question)),
        pattern("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        pattern("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        pattern("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket)),
        pattern("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket)),
        pattern("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        pattern("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
        pattern("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        pattern("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
    ];
}

/// On-demand tokenizer over one source unit.
///
/// Each call to [`Lexer::next_token`] scans exactly one token; once the input
/// is exhausted every further call yields `EOF`. [`Lexer::reset`] rewinds to
/// the start of the source.
#[derive(Clone)]
pub struct Lexer {
    source: Arc<str>,
    pos: usize,
    file: Arc<str>,
    keep_comments: bool,
    limits: ParserLimits,
    produced: usize,
}

impl Lexer {
    pub fn new(source: &str, file: Option<&str>) -> Lexer {
        let file_name: Arc<str> = Arc::from(file.unwrap_or("<input>"));

        Lexer {
            source: Arc::from(source),
            pos: 0,
            file: file_name,
            keep_comments: false,
            limits: ParserLimits::default(),
            produced: 0,
        }
    }

    pub fn with_comments(mut self, keep_comments: bool) -> Self {
        self.keep_comments = keep_comments;
        self
    }

    pub fn with_limits(mut self, limits: ParserLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.produced = 0;
    }

    pub fn file(&self) -> Arc<str> {
        Arc::clone(&self.file)
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Builds a token covering `len` bytes from the current position.
    pub fn make_token(&self, kind: TokenKind, len: usize) -> Token {
        MK_TOKEN!(
            kind,
            String::from(&self.source[self.pos..self.pos + len]),
            Span::new(self.pos as u32, (self.pos + len) as u32)
        )
    }

    fn error(&self, error: ErrorImpl, span: Span) -> Error {
        Error::new(error, span, Arc::clone(&self.file))
    }

    /// Scans the next token.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        if self.source.len() > self.limits.max_input_size {
            return Err(self.error(
                ErrorImpl::InputTooLarge {
                    size: self.source.len(),
                    limit: self.limits.max_input_size,
                },
                Span::new(0, 0),
            ));
        }

        loop {
            if self.at_eof() {
                return Ok(self.make_token(TokenKind::EOF, 0));
            }

            let remainder = &self.source[self.pos..];
            let matched = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(remainder)
                    .map(|found| (pattern.handler, found.end()))
            });

            let Some((handler, len)) = matched else {
                let ch = remainder.chars().next().unwrap_or_default();
                return Err(self.error(
                    ErrorImpl::UnrecognisedToken {
                        token: ch.to_string(),
                    },
                    Span::new(self.pos as u32, (self.pos + ch.len_utf8()) as u32),
                ));
            };

            if let Some(token) = handler(self, len)? {
                self.produced += 1;
                if self.produced > self.limits.max_token_count {
                    return Err(self.error(
                        ErrorImpl::TooManyTokens {
                            limit: self.limits.max_token_count,
                        },
                        token.span,
                    ));
                }

                tracing::trace!(kind = ?token.kind, value = %token.value, "lexed token");
                return Ok(token);
            }
        }
    }
}

fn skip_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    lexer.advance_n(len);
    Ok(None)
}

fn comment_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    let token = lexer.make_token(TokenKind::Comment, len);
    lexer.advance_n(len);

    if lexer.keep_comments {
        Ok(Some(token))
    } else {
        Ok(None)
    }
}

fn symbol_handler(lexer: &mut Lexer, len: usize) -> Result<Option<Token>, Error> {
    if len > lexer.limits.max_identifier_length {
        return Err(lexer.error(
            ErrorImpl::IdentifierTooLong {
                limit: lexer.limits.max_identifier_length,
            },
            Span::new(lexer.pos as u32, (lexer.pos + len) as u32),
        ));
    }

    let kind = RESERVED_LOOKUP
        .get(&lexer.source[lexer.pos..lexer.pos + len])
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let token = lexer.make_token(kind, len);
    lexer.advance_n(len);
    Ok(Some(token))
}

fn string_handler(lexer: &mut Lexer, _len: usize) -> Result<Option<Token>, Error> {
    let source = Arc::clone(&lexer.source);
    let start = lexer.pos;

    let Some(len) = scan_quoted(&source[start..], '"', true) else {
        return Err(lexer.error(
            ErrorImpl::UnterminatedString,
            Span::new(start as u32, source.len() as u32),
        ));
    };

    if len > lexer.limits.max_string_length {
        return Err(lexer.error(
            ErrorImpl::StringTooLong {
                limit: lexer.limits.max_string_length,
            },
            Span::new(start as u32, (start + len) as u32),
        ));
    }

    let body = &source[start + 1..start + len - 1];
    if let Err((from, to)) = unescape(body) {
        return Err(invalid_escape(lexer, body, start + 1, from, to));
    }

    let token = lexer.make_token(TokenKind::String, len);
    lexer.advance_n(len);
    Ok(Some(token))
}

fn char_handler(lexer: &mut Lexer, _len: usize) -> Result<Option<Token>, Error> {
    let source = Arc::clone(&lexer.source);
    let start = lexer.pos;

    let Some(len) = scan_quoted(&source[start..], '\'', false) else {
        let line_end = source[start..]
            .find('\n')
            .map(|offset| start + offset)
            .unwrap_or(source.len());
        return Err(lexer.error(
            ErrorImpl::UnterminatedChar,
            Span::new(start as u32, line_end as u32),
        ));
    };

    let span = Span::new(start as u32, (start + len) as u32);
    let body = &source[start + 1..start + len - 1];

    match unescape(body) {
        Err((from, to)) => return Err(invalid_escape(lexer, body, start + 1, from, to)),
        Ok(value) => match value.chars().count() {
            0 => return Err(lexer.error(ErrorImpl::EmptyCharLiteral, span)),
            1 => {}
            _ => return Err(lexer.error(ErrorImpl::OverlongCharLiteral, span)),
        },
    }

    let token = lexer.make_token(TokenKind::Char, len);
    lexer.advance_n(len);
    Ok(Some(token))
}

fn invalid_escape(lexer: &Lexer, body: &str, body_start: usize, from: usize, to: usize) -> Error {
    lexer.error(
        ErrorImpl::InvalidEscape {
            escape: String::from(&body[from..to]),
        },
        Span::new((body_start + from) as u32, (body_start + to) as u32),
    )
}

/// Finds the closing quote of a literal starting at `text[0]`.
///
/// Returns the byte length of the literal including both quotes, or `None`
/// when the input (or, for char literals, the line) ends first.
fn scan_quoted(text: &str, quote: char, allow_newlines: bool) -> Option<usize> {
    let mut chars = text.char_indices().skip(1);

    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '\n' if !allow_newlines => return None,
            ch if ch == quote => return Some(i + ch.len_utf8()),
            _ => {}
        }
    }

    None
}

/// Decodes the escape sequences in a literal body (the text between quotes).
///
/// On failure returns the byte range of the offending escape within `body`.
pub fn unescape(body: &str) -> Result<String, (usize, usize)> {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let Some((_, escaped)) = chars.next() else {
            return Err((i, body.len()));
        };

        match escaped {
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            't' => result.push('\t'),
            '\\' => result.push('\\'),
            '"' => result.push('"'),
            '\'' => result.push('\''),
            '0' => result.push('\0'),
            'x' => {
                let value = read_hex(&mut chars, 2).ok_or_else(|| (i, next_index(&mut chars, body)))?;
                result.push(char::from(value as u8));
            }
            'u' => {
                let value = read_hex(&mut chars, 4).ok_or_else(|| (i, next_index(&mut chars, body)))?;
                let decoded = char::from_u32(value).ok_or((i, next_index(&mut chars, body)))?;
                result.push(decoded);
            }
            other => return Err((i, i + 1 + other.len_utf8())),
        }
    }

    Ok(result)
}

fn read_hex(chars: &mut Peekable<CharIndices>, digits: usize) -> Option<u32> {
    let mut value = 0;

    for _ in 0..digits {
        let digit = chars.peek().and_then(|(_, ch)| ch.to_digit(16))?;
        value = value * 16 + digit;
        chars.next();
    }

    Some(value)
}

fn next_index(chars: &mut Peekable<CharIndices>, body: &str) -> usize {
    chars.peek().map(|(index, _)| *index).unwrap_or(body.len())
}

/// Tokenizes a whole source unit. The last token is always `EOF`.
pub fn tokenize(source: &str, file: Option<&str>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
