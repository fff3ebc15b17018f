//! Error types and error handling for the parser.
//!
//! This module defines the error types used by the lexer and parser:
//!
//! - Error structures with source span information
//! - Lexical and syntactic error variants
//! - Human readable names and suggestions for display

pub mod errors;
