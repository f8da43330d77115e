//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "otherwise".to_string(),
        },
        10,
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_error_line() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "end".to_string(),
        },
        42,
    );

    assert_eq!(error.get_line(), 42);
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            expected: "Integer".to_string(),
            received: "String".to_string(),
        },
        1,
    );

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(
        error.message(),
        "types do not match: expected Integer, received String"
    );
}

#[test]
fn test_variable_not_declared_error() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "foo".to_string(),
        },
        3,
    );

    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_variable_already_declared_error() {
    let error = Error::new(
        ErrorImpl::VariableAlreadyDeclared {
            variable: "x".to_string(),
        },
        2,
    );

    assert_eq!(error.get_error_name(), "VariableAlreadyDeclared");
}

#[test]
fn test_unexpected_arguments_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedArguments {
            function: "add".to_string(),
            expected: 2,
            received: 3,
        },
        7,
    );

    assert_eq!(error.get_error_name(), "UnexpectedArguments");
    assert_eq!(
        error.message(),
        "function \"add\" expected 2 arguments, received 3"
    );
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "total".to_string(),
        },
        5,
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Variable `total` not declared"),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_thrown_error_has_no_tip() {
    let error = Error::new(
        ErrorImpl::Thrown {
            message: "bad input".to_string(),
        },
        9,
    );

    assert_eq!(error.get_error_name(), "Thrown");
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_thrown_message_round_trips() {
    let error = Error::new(
        ErrorImpl::Thrown {
            message: "negative amount".to_string(),
        },
        4,
    );

    assert_eq!(error.message(), "negative amount");
}

#[test]
fn test_division_by_zero_error() {
    let error = Error::new(ErrorImpl::DivisionByZero, 12);

    assert_eq!(error.get_error_name(), "DivisionByZero");
    assert_eq!(error.message(), "division by zero");
}

#[test]
fn test_index_out_of_bounds_message() {
    let error = Error::new(ErrorImpl::IndexOutOfBounds { index: 5, length: 3 }, 8);

    assert_eq!(error.get_error_name(), "IndexOutOfBounds");
    assert_eq!(
        error.message(),
        "index 5 is out of bounds for a list of length 3"
    );
}
