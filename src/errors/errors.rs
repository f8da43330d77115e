use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    line: u32,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: u32) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    /// The bare message text, without stage or line context. This is what a
    /// `catch` block binds, so a thrown string round-trips exactly.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::IntegerOperandRequired { .. } => "IntegerOperandRequired",
            ErrorImpl::UntypedComparison => "UntypedComparison",
            ErrorImpl::ConditionNotInteger { .. } => "ConditionNotInteger",
            ErrorImpl::LoopBoundNotInteger { .. } => "LoopBoundNotInteger",
            ErrorImpl::IndexTargetNotIndexable { .. } => "IndexTargetNotIndexable",
            ErrorImpl::InconsistentReturn { .. } => "InconsistentReturn",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::ZeroStep => "ZeroStep",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::KeyNotFound { .. } => "KeyNotFound",
            ErrorImpl::Thrown { .. } => "Thrown",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you forget an `end`?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` already declared in this scope",
                variable
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::NotAFunction { name } => ErrorTip::Suggestion(format!(
                "`{}` is not a function, was it declared with `define function`?",
                name
            )),
            ErrorImpl::UnexpectedArguments {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Function `{}` takes {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::IntegerOperandRequired { operand } => ErrorTip::Suggestion(format!(
                "Arithmetic needs integer operands, `{}` is not one",
                operand
            )),
            ErrorImpl::UntypedComparison => ErrorTip::Suggestion(String::from(
                "Declare or initialize both operands before comparing them",
            )),
            ErrorImpl::ConditionNotInteger { .. } => ErrorTip::Suggestion(String::from(
                "Conditions are integers, nonzero means true",
            )),
            ErrorImpl::LoopBoundNotInteger { .. } => ErrorTip::Suggestion(String::from(
                "Loop start, end, and step must all be integers",
            )),
            ErrorImpl::IndexTargetNotIndexable { received } => ErrorTip::Suggestion(format!(
                "Only lists and dictionaries can be indexed, received `{}`",
                received
            )),
            ErrorImpl::InconsistentReturn { function } => ErrorTip::Suggestion(format!(
                "Every `return` in `{}` must produce the same type",
                function
            )),
            ErrorImpl::DivisionByZero => {
                ErrorTip::Suggestion(String::from("The right side of `/` evaluated to zero"))
            }
            ErrorImpl::ZeroStep => ErrorTip::Suggestion(String::from(
                "A loop with step 0 would never finish",
            )),
            ErrorImpl::IndexOutOfBounds { index, length } => ErrorTip::Suggestion(format!(
                "Index {} is outside the list, valid indexes are 0 to {}",
                index,
                length.saturating_sub(1)
            )),
            ErrorImpl::KeyNotFound { key } => {
                ErrorTip::Suggestion(format!("Key `{}` is not present in the dictionary", key))
            }
            ErrorImpl::Thrown { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("variable {variable:?} already declared in this scope")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("{name:?} is not a function")]
    NotAFunction { name: String },
    #[error("function {function:?} expected {expected} arguments, received {received}")]
    UnexpectedArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("operand {operand:?} must be an integer")]
    IntegerOperandRequired { operand: String },
    #[error("cannot compare operands with unknown types")]
    UntypedComparison,
    #[error("condition must evaluate to an integer, got {received}")]
    ConditionNotInteger { received: String },
    #[error("loop bounds and step must be integers, got {received}")]
    LoopBoundNotInteger { received: String },
    #[error("index target must be a list or dictionary, got {received}")]
    IndexTargetNotIndexable { received: String },
    #[error("function {function:?} has inconsistent return types")]
    InconsistentReturn { function: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("step cannot be zero")]
    ZeroStep,
    #[error("index {index} is out of bounds for a list of length {length}")]
    IndexOutOfBounds { index: i64, length: usize },
    #[error("key {key:?} not found in dictionary")]
    KeyNotFound { key: String },
    #[error("{message}")]
    Thrown { message: String },
}
