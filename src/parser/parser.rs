//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parse entry points.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Declaration handlers (top level)
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers

use std::{collections::HashMap, sync::Arc};

use crate::{
    ast::ast::{Expr, SourceFile, Stmt, Type},
    config::{ParserConfig, ParserLimits},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    cursor::TokenStream,
    decl::parse_decl,
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, DeclHandler, DeclLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    types::{create_token_type_lookups, parse_type, TypeNUDHandler, TypeNUDLookup},
};

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and maintains lookup tables for
/// parsing declarations, statements, expressions, and types.
pub struct Parser {
    /// Buffered tokens from the lexer
    tokens: TokenStream,
    /// The name of the source being parsed
    file: Arc<str>,
    limits: ParserLimits,
    /// Current recursion depth, bounded by `limits.max_nesting_depth`
    depth: usize,
    /// Lookup table for top-level declaration handlers
    decl_lookup: DeclLookup,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type handlers
    type_nud_lookup: TypeNUDLookup,
}

impl Parser {
    /// Creates a parser over `source` with every lookup table registered.
    pub fn new(source: &str, file: Option<&str>, config: &ParserConfig) -> Self {
        let lexer = Lexer::new(source, file)
            .with_comments(config.keep_comments)
            .with_limits(config.limits.clone());
        let file = lexer.file();

        let mut parser = Parser {
            tokens: TokenStream::new(lexer, config.collect_tokens),
            file,
            limits: config.limits.clone(),
            depth: 0,
            decl_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
        };

        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.tokens.current()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens.current().kind
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens.peek().kind
    }

    /// Returns the kind of the token `n` places ahead. `peek_nth_kind(1)` is
    /// the same as `peek_kind`.
    pub fn peek_nth_kind(&mut self, n: usize) -> TokenKind {
        self.tokens.peek_nth(n).kind
    }

    /// Advances to the next token and returns the consumed one.
    pub fn advance(&mut self) -> Token {
        self.tokens.advance()
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Span) -> Span {
        Span {
            start: start.start,
            end: Position(self.tokens.previous_end()),
        }
    }

    pub fn file(&self) -> Arc<str> {
        Arc::clone(&self.file)
    }

    pub fn error(&self, error: ErrorImpl, span: Span) -> Error {
        Error::new(error, span, self.file())
    }

    /// An `UnexpectedToken` error at the current token.
    pub fn unexpected(&self, expected: &str, kinds: &[TokenKind]) -> Error {
        let token = self.current_token();
        self.error(
            ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: token.to_string(),
            },
            token.span,
        )
        .with_expected(kinds)
    }

    /// Consumes a token of the given kind or fails with `UnexpectedToken`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(self.unexpected(expected_kind.describe(), &[expected_kind]));
        }

        Ok(self.advance())
    }

    /// Consumes the closing delimiter for `opener`, failing with
    /// `UnclosedDelimiter` so the error can point back at the opener.
    pub fn expect_closer(&mut self, closer: TokenKind, opener: Span) -> Result<Token, Error> {
        if self.current_token_kind() != closer {
            return Err(self
                .error(
                    ErrorImpl::UnclosedDelimiter {
                        expected: closer.describe().to_string(),
                        opener,
                    },
                    self.current_token().span,
                )
                .with_expected(&[closer]));
        }

        Ok(self.advance())
    }

    /// Consumes an optional string literal and returns its decoded contents.
    pub fn optional_string(&mut self) -> Result<Option<String>, Error> {
        if self.current_token_kind() != TokenKind::String {
            return Ok(None);
        }

        let token = self.advance();
        decode_quoted(self, &token).map(Some)
    }

    /// Runs `f` one nesting level deeper, failing once the configured depth
    /// is reached instead of growing the stack further.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.enter()?;
        let result = f(self);
        self.leave(1);
        result
    }

    /// Claims one nesting level. Every successful call must be paired with a
    /// matching `leave`.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= self.limits.max_nesting_depth {
            return Err(self.error(
                ErrorImpl::NestingTooDeep {
                    limit: self.limits.max_nesting_depth,
                },
                self.current_token().span,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    /// Releases `levels` nesting levels claimed with `enter`.
    pub fn leave(&mut self, levels: usize) {
        self.depth -= levels;
    }

    /// Returns a reference to the declaration lookup table.
    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Binding power of the current token, `Default` if it is not an infix
    /// or postfix operator.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Whether the current token can begin a type.
    pub fn at_type_start(&self) -> bool {
        self.type_nud_lookup.contains_key(&self.current_token_kind())
    }

    /// Registers a left denotation (infix or postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Leaves the binding power alone: tokens such as `-` and `(` are both
    /// prefix and infix, and the infix level must survive.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a top-level declaration handler for a token.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Registers a type handler for a token.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Resolves a finished parse: a stored lexical error wins over both the
    /// result and any syntax error.
    fn finish<T>(mut self, result: Result<T, Error>) -> Result<(T, Vec<Token>), Error> {
        if let Some(error) = self.tokens.take_lex_error() {
            return Err(error);
        }

        let value = result?;
        Ok((value, self.tokens.into_tokens()))
    }

    /// Requires that the whole input has been consumed.
    fn expect_end(&mut self) -> Result<(), Error> {
        if self.has_tokens() {
            return Err(self.unexpected("end of input", &[TokenKind::EOF]));
        }
        Ok(())
    }
}

/// Decodes the body of a string or char literal token.
pub fn decode_quoted(parser: &Parser, token: &Token) -> Result<String, Error> {
    let body = &token.value[1..token.value.len() - 1];

    crate::lexer::lexer::unescape(body).map_err(|(from, to)| {
        let start = token.span.start.0 + 1;
        parser.error(
            ErrorImpl::InvalidEscape {
                escape: String::from(&body[from..to]),
            },
            Span::new(start + from as u32, start + to as u32),
        )
    })
}

/// A parsed source unit and, if requested, every token consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub ast: SourceFile,
    pub tokens: Vec<Token>,
}

fn parse_source_file(parser: &mut Parser, source_len: usize) -> Result<SourceFile, Error> {
    let mut declarations = vec![];

    while parser.has_tokens() {
        declarations.push(parse_decl(parser)?);
    }

    Ok(SourceFile {
        declarations,
        span: Span::new(0, source_len as u32),
    })
}

/// Parses a source unit into its AST.
///
/// `file` names the source in diagnostics and defaults to `<input>`.
pub fn parse(source: &str, file: Option<&str>) -> Result<SourceFile, Error> {
    parse_with_config(source, file, &ParserConfig::default()).map(|output| output.ast)
}

/// Parses a source unit with explicit options and limits.
pub fn parse_with_config(
    source: &str,
    file: Option<&str>,
    config: &ParserConfig,
) -> Result<ParseOutput, Error> {
    let mut parser = Parser::new(source, file, config);
    tracing::debug!(file = %parser.file, bytes = source.len(), "parsing source");

    let result = parse_source_file(&mut parser, source.len());
    let (ast, tokens) = parser.finish(result)?;

    tracing::debug!(
        declarations = ast.declarations.len(),
        tokens = tokens.len(),
        "parsed source"
    );
    Ok(ParseOutput { ast, tokens })
}

/// Parses a source holding exactly one expression.
pub fn parse_expression_source(source: &str, file: Option<&str>) -> Result<Expr, Error> {
    let mut parser = Parser::new(source, file, &ParserConfig::default());
    let result = parse_expr(&mut parser, BindingPower::Default)
        .and_then(|expr| parser.expect_end().map(|_| expr));
    parser.finish(result).map(|(expr, _)| expr)
}

/// Parses a source holding exactly one type.
pub fn parse_type_source(source: &str, file: Option<&str>) -> Result<Type, Error> {
    let mut parser = Parser::new(source, file, &ParserConfig::default());
    let result = parse_type(&mut parser).and_then(|ty| parser.expect_end().map(|_| ty));
    parser.finish(result).map(|(ty, _)| ty)
}

/// Parses a source holding exactly one statement.
pub fn parse_statement_source(source: &str, file: Option<&str>) -> Result<Stmt, Error> {
    let mut parser = Parser::new(source, file, &ParserConfig::default());
    let result = parse_stmt(&mut parser).and_then(|stmt| parser.expect_end().map(|_| stmt));
    parser.finish(result).map(|(stmt, _)| stmt)
}
