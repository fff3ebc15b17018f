//! Lookahead buffer between the lexer and the parser.
//!
//! Tokens are pulled from the [`Lexer`] on demand and the buffer always holds
//! at least two of them, so the parser can inspect the current token and the
//! one after it through `&self`. Comment tokens are dropped here.
//!
//! A lexical error does not surface immediately: it is stored, and the
//! stream continues with `EOF` from the error position. The parse entry
//! points check for a stored error before reporting anything else.

use std::collections::VecDeque;

use crate::{
    errors::errors::Error,
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Span,
};

/// Minimum number of buffered tokens
const LOOKAHEAD: usize = 2;

struct Buffered {
    token: Token,
    /// Comments lexed directly before `token`
    comments: Vec<Token>,
}

pub struct TokenStream {
    lexer: Lexer,
    buffer: VecDeque<Buffered>,
    lex_error: Option<Error>,
    /// Set once the lexer has finished, repeated for every later pull
    eof: Option<Token>,
    collected: Option<Vec<Token>>,
    previous_end: u32,
}

impl TokenStream {
    pub fn new(lexer: Lexer, collect_tokens: bool) -> Self {
        let mut stream = TokenStream {
            lexer,
            buffer: VecDeque::with_capacity(LOOKAHEAD + 1),
            lex_error: None,
            eof: None,
            collected: collect_tokens.then(Vec::new),
            previous_end: 0,
        };
        stream.fill(LOOKAHEAD);
        stream
    }

    fn fill(&mut self, count: usize) {
        while self.buffer.len() < count {
            let buffered = self.pull();
            self.buffer.push_back(buffered);
        }
    }

    fn pull(&mut self) -> Buffered {
        let mut comments = vec![];

        loop {
            if let Some(eof) = &self.eof {
                return Buffered {
                    token: eof.clone(),
                    comments,
                };
            }

            match self.lexer.next_token() {
                Ok(token) if token.kind == TokenKind::Comment => {
                    if self.collected.is_some() {
                        comments.push(token);
                    }
                }
                Ok(token) => {
                    if token.kind == TokenKind::EOF {
                        self.eof = Some(token.clone());
                    }
                    return Buffered { token, comments };
                }
                Err(error) => {
                    tracing::debug!(%error, "lexer failed, continuing with end of input");
                    let at = error.get_span().start.0;
                    let eof = Token {
                        kind: TokenKind::EOF,
                        value: String::new(),
                        span: Span::new(at, at),
                    };
                    self.lex_error = Some(error);
                    self.eof = Some(eof.clone());
                    return Buffered {
                        token: eof,
                        comments,
                    };
                }
            }
        }
    }

    pub fn current(&self) -> &Token {
        &self.buffer[0].token
    }

    pub fn peek(&self) -> &Token {
        &self.buffer[1].token
    }

    /// The token `n` places after the current one, lexing further if needed.
    pub fn peek_nth(&mut self, n: usize) -> &Token {
        self.fill(n + 1);
        &self.buffer[n].token
    }

    /// Consumes the current token. Past the end this keeps returning `EOF`.
    pub fn advance(&mut self) -> Token {
        let Buffered { token, comments } = match self.buffer.pop_front() {
            Some(buffered) => buffered,
            None => self.pull(),
        };
        self.fill(LOOKAHEAD);

        if token.kind != TokenKind::EOF {
            self.previous_end = token.span.end.0;
            if let Some(collected) = &mut self.collected {
                collected.extend(comments);
                collected.push(token.clone());
            }
        }

        token
    }

    /// End offset of the last consumed token.
    pub fn previous_end(&self) -> u32 {
        self.previous_end
    }

    pub fn take_lex_error(&mut self) -> Option<Error> {
        self.lex_error.take()
    }

    /// Consumed tokens plus the final `EOF`. Empty unless collection was
    /// requested.
    pub fn into_tokens(mut self) -> Vec<Token> {
        let Some(mut tokens) = self.collected.take() else {
            return vec![];
        };

        if let Some(Buffered { token, comments }) = self.buffer.pop_front() {
            tokens.extend(comments);
            tokens.push(token);
        }
        tokens
    }
}
