//! Lexical scoping for the interpreter pipeline.
//!
//! This module provides the scope machinery shared by three stages:
//!
//! - A generic scope stack (a vector of string-keyed maps) with
//!   innermost-to-outermost lookup and clean push/pop
//! - The symbol table the parser and type checker record declarations in
//!
//! The interpreter's runtime environment is the same scope stack
//! instantiated over runtime values. Exiting a scope discards its bindings
//! entirely, so sibling scopes never observe each other's names.

pub mod scope;
pub mod symbols;
