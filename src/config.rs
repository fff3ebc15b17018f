//! Parser configuration and safety limits.
//!
//! Limits guard against pathological input: deeply nested expressions that
//! would otherwise overflow the stack, and oversized sources or literals.
//! Every limit has a permissive default and can be overridden from TOML:
//!
//! ```toml
//! keep_comments = true
//!
//! [limits]
//! max_nesting_depth = 64
//! ```

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserLimits {
    /// Maximum source size in bytes
    pub max_input_size: usize,
    /// Maximum number of tokens per source unit
    pub max_token_count: usize,
    /// Maximum identifier length in bytes
    pub max_identifier_length: usize,
    /// Maximum string literal length in bytes, quotes included
    pub max_string_length: usize,
    /// Maximum recursion depth across expressions, statements and types
    pub max_nesting_depth: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_input_size: 10_000_000,
            max_token_count: 1_000_000,
            max_identifier_length: 1_000,
            max_string_length: 10_000_000,
            max_nesting_depth: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Have the lexer emit `Comment` tokens. The parser never sees them, but
    /// they show up in the collected token list.
    pub keep_comments: bool,
    /// Keep every consumed token in `ParseOutput::tokens`.
    pub collect_tokens: bool,
    pub limits: ParserLimits,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse parser config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_comments(mut self, keep_comments: bool) -> Self {
        self.keep_comments = keep_comments;
        self
    }

    pub fn with_tokens(mut self, collect_tokens: bool) -> Self {
        self.collect_tokens = collect_tokens;
        self
    }

    pub fn with_limits(mut self, limits: ParserLimits) -> Self {
        self.limits = limits;
        self
    }
}
