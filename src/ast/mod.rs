//! AST (Abstract Syntax Tree) module.
//!
//! Contains all definitions related to the AST structure.
//!
//! Submodules:
//! - ast: the program root
//! - expressions: the expression node enum
//! - statements: the statement node enum
//! - types: value-kind tags shared by the symbol table and type checker

pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
