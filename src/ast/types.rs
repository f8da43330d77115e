//! Value-kind tags for the language.
//!
//! Kinds are recorded in the symbol table during parsing and refined by the
//! type checker. They classify what a name or expression will hold at
//! runtime without carrying the value itself.

use std::fmt::Display;

/// The kind of value a symbol or expression produces.
///
/// `None` marks a declaration whose kind is not known yet; the type checker
/// forward-infers it on first use in a comparison. `Error` is a sentinel for
/// expressions that could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    None,
    Integer,
    String,
    List,
    Dict,
    Function,
    Error,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
