//! Lexical analysis module for the interpreter.
//!
//! This module contains the tokenizer that converts source text into a
//! stream of tokens for parsing. It handles:
//!
//! - Lazy, pull-model tokenization (one token per call)
//! - Significant indentation via an indent-width stack (Indent/Dedent)
//! - Recognition of reserved words, identifiers, literals, and operators
//! - Line tracking for error reporting
//! - Comments, raw string literals, and malformed-input recovery
//!
//! Tokenization never aborts: anything the tokenizer cannot recognize is
//! reported on stderr and emitted as an `Unknown` token so downstream
//! stages can fail with context.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
