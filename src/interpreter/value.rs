//! Runtime values and control-flow signals.

use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use crate::ast::statements::Stmt;
use crate::ast::types::ValueKind;

/// A function captured by `define function`.
///
/// The body and parameter names are shared between the binding and every
/// call in flight, so recursive calls do not copy the body.
#[derive(Debug)]
pub struct FunctionValue {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Stmt>,
}

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Produced by a bare `return` or by a call that falls off the end of
    /// the function body.
    Void,
    Integer(i64),
    Str(String),
    List(Vec<Value>),
    Dict(HashMap<String, Value>),
    Function(Rc<FunctionValue>),
}

impl Value {
    /// The kind tag matching what the front end records for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Void => ValueKind::None,
            Value::Integer(_) => ValueKind::Integer,
            Value::Str(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Dict(_) => ValueKind::Dict,
            Value::Function(_) => ValueKind::Function,
        }
    }
}

/// Equality as `match` sees it. Functions compare by identity, everything
/// else by structure.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) => true,
            (Value::Integer(left), Value::Integer(right)) => left == right,
            (Value::Str(left), Value::Str(right)) => left == right,
            (Value::List(left), Value::List(right)) => left == right,
            (Value::Dict(left), Value::Dict(right)) => left == right,
            (Value::Function(left), Value::Function(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Void => write!(f, "[void]"),
            Value::Integer(number) => write!(f, "{number}"),
            Value::Str(text) => write!(f, "{text}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (position, item) in items.iter().enumerate() {
                    if position > 0 {
                        write!(f, ", ")?;
                    }
                    write_nested(f, item)?;
                }
                write!(f, "]")
            }
            Value::Dict(entries) => {
                write!(f, "{{")?;
                for (position, (key, value)) in entries.iter().enumerate() {
                    if position > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: ")?;
                    write_nested(f, value)?;
                }
                write!(f, "}}")
            }
            Value::Function(_) => write!(f, "[function]"),
        }
    }
}

/// Strings inside a container render quoted; everything else renders the
/// same as at top level.
fn write_nested(f: &mut std::fmt::Formatter<'_>, value: &Value) -> std::fmt::Result {
    match value {
        Value::Str(text) => write!(f, "{text:?}"),
        other => write!(f, "{other}"),
    }
}

/// How a statement finished.
///
/// `Return` carries its value up through enclosing blocks and loops to the
/// nearest call boundary; at the top level it simply ends the program.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
}
