//! Error types and error handling for the interpreter pipeline.
//!
//! This module defines the error values used by the parser, the type
//! checker, and the runtime. It includes:
//!
//! - An error structure carrying the source line
//! - Specific error variants for each pipeline stage
//! - Error naming and display functionality
//! - Helpful tips and suggestions
//!
//! Tokenizer diagnostics are the exception: they go straight to stderr and
//! never abort tokenization.

pub mod errors;

#[cfg(test)]
mod tests;
