//! Lexical analysis module for the parser.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into tokens for parsing. It handles:
//!
//! - On-demand tokenization using an ordered table of regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Validation of string and char escape sequences
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
