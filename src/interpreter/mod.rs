//! Tree-walking evaluator for the language.
//!
//! This module executes the parsed program directly. It covers:
//!
//! - Runtime values and the control-flow signal for `return`
//! - Statement execution and expression evaluation
//! - Scope handling backed by the same stack the front end uses
//! - A pluggable output sink so `say` can be captured in tests
//!
//! The static analyzer runs first, but the evaluator re-checks types at
//! every operation; analysis never removes a runtime check.

pub mod expr;
pub mod interpreter;
pub mod stmt;
pub mod value;

#[cfg(test)]
mod tests;
