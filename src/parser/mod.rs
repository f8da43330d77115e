//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive descent parser that transforms the
//! token stream into a Program. It handles:
//!
//! - Statement parsing (declarations, control flow, functions)
//! - Expression parsing (flat binary tier, literals, calls, indexing)
//! - Scope bookkeeping against the symbol table while parsing, so
//!   undeclared names, redeclarations, and arity mistakes are parse errors
//! - Error recovery by synchronizing to the next statement boundary
//!
//! Blocks are delimited by `Indent`/`Dedent` tokens from the lexer, with a
//! closing `end` keyword consumed after the matching `Dedent`.

pub mod expr;
pub mod parser;
pub mod stmt;
