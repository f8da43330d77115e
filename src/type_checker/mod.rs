//! Type checking and semantic analysis module.
//!
//! This module performs semantic analysis on the AST. It walks the program
//! in source order while:
//!
//! - Inferring a value kind for every expression
//! - Verifying operand kinds for arithmetic, comparisons, and indexing
//! - Resolving call targets and re-checking arity
//! - Collecting and unifying function return kinds
//! - Managing scopes so block-local declarations stay local
//!
//! The analyzer shares the symbol table the parser built and refines the
//! kinds recorded there. It stops at the first violation found.

pub mod type_checker;
