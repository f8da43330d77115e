//! Expression evaluation.
//!
//! Every operation re-checks the kinds of the values it receives. The
//! analyzer already rejected most mismatches, but values flow through
//! untyped bindings and function calls, so nothing here trusts it.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::expressions::Expr;
use crate::ast::types::ValueKind;
use crate::errors::errors::{Error, ErrorImpl};
use crate::lexer::tokens::{Token, TokenKind};

use super::interpreter::Interpreter;
use super::stmt::run_block;
use super::value::{Flow, Value};

pub fn evaluate_expr(interpreter: &mut Interpreter, expr: &Expr) -> Result<Value, Error> {
    match expr {
        Expr::Literal { value } => match value.kind {
            TokenKind::Number => Ok(Value::Integer(number_value(value)?)),
            _ => Ok(Value::Str(value.lexeme.clone())),
        },
        Expr::Variable { name } => match interpreter.environment.get(&name.lexeme) {
            Some(value) => Ok(value.clone()),
            None => Err(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name.lexeme.clone(),
                },
                name.line,
            )),
        },
        Expr::Binary {
            left,
            operator,
            right,
        } => evaluate_binary(interpreter, left, operator, right),
        Expr::Paren { inner } => evaluate_expr(interpreter, inner),
        Expr::ListLiteral { elements, .. } => {
            let mut items = Vec::with_capacity(elements.len());
            for element in elements {
                items.push(evaluate_expr(interpreter, element)?);
            }
            Ok(Value::List(items))
        }
        Expr::DictLiteral { entries, .. } => {
            let mut map = HashMap::with_capacity(entries.len());
            for (key, value) in entries {
                let key_value = evaluate_expr(interpreter, key)?;
                let value_value = evaluate_expr(interpreter, value)?;
                match key_value {
                    Value::Str(text) => {
                        map.insert(text, value_value);
                    }
                    other => {
                        return Err(type_mismatch(ValueKind::String, &other, key.token().line))
                    }
                }
            }
            Ok(Value::Dict(map))
        }
        Expr::Index { base, index } => {
            let container = evaluate_expr(interpreter, base)?;
            let position = evaluate_expr(interpreter, index)?;
            read_index(&container, &position, base, index)
        }
        Expr::Assign { name, value } => {
            let value = evaluate_expr(interpreter, value)?;
            assign_variable(interpreter, name, value.clone())?;
            Ok(value)
        }
        Expr::IndexAssign {
            target,
            index,
            value,
        } => {
            let value = evaluate_expr(interpreter, value)?;
            assign_index(interpreter, target, index, value.clone())?;
            Ok(value)
        }
        Expr::Call { name, arguments } => evaluate_call(interpreter, name, arguments),
    }
}

/// Calls a function value bound to `name`.
///
/// Arguments are evaluated left to right before the count is checked.
/// Parameters are bound in a fresh scope, which is popped whether the body
/// returns, falls off the end, or fails.
pub fn evaluate_call(
    interpreter: &mut Interpreter,
    name: &Token,
    arguments: &[Expr],
) -> Result<Value, Error> {
    let callee = match interpreter.environment.get(&name.lexeme) {
        Some(Value::Function(function)) => Rc::clone(function),
        Some(_) => {
            return Err(Error::new(
                ErrorImpl::NotAFunction {
                    name: name.lexeme.clone(),
                },
                name.line,
            ))
        }
        None => {
            return Err(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name.lexeme.clone(),
                },
                name.line,
            ))
        }
    };

    let mut evaluated = Vec::with_capacity(arguments.len());
    for argument in arguments {
        evaluated.push(evaluate_expr(interpreter, argument)?);
    }
    if evaluated.len() != callee.parameters.len() {
        return Err(Error::new(
            ErrorImpl::UnexpectedArguments {
                function: name.lexeme.clone(),
                expected: callee.parameters.len(),
                received: evaluated.len(),
            },
            name.line,
        ));
    }

    interpreter.environment.enter_scope();
    for (parameter, value) in callee.parameters.iter().zip(evaluated) {
        interpreter.environment.insert(parameter, value);
    }
    let flow = run_block(interpreter, &callee.body);
    interpreter.environment.exit_scope();

    match flow? {
        Flow::Return(value) => Ok(value),
        Flow::Normal => Ok(Value::Void),
    }
}

/// Stores through the innermost visible binding.
pub fn assign_variable(
    interpreter: &mut Interpreter,
    name: &Token,
    value: Value,
) -> Result<(), Error> {
    match interpreter.environment.get_mut(&name.lexeme) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: name.lexeme.clone(),
            },
            name.line,
        )),
    }
}

/// Mutates one container slot in place.
///
/// The index expressions are evaluated in source order, left to right,
/// then the root binding is borrowed mutably and the chain is walked down
/// to the final slot. A final dictionary index may name a fresh key, which
/// inserts it; intermediate indexes must already resolve.
pub fn assign_index(
    interpreter: &mut Interpreter,
    target: &Expr,
    index: &Expr,
    value: Value,
) -> Result<(), Error> {
    let mut chain = vec![index];
    let mut root = target;
    while let Expr::Index { base, index } = root {
        chain.push(index);
        root = base;
    }
    chain.reverse();

    let mut indexes = Vec::with_capacity(chain.len());
    for step in chain {
        indexes.push((evaluate_expr(interpreter, step)?, step.token().line));
    }
    let (last_index, last_line) = indexes.pop().expect("chain holds at least one index");

    let mut scratch;
    let mut slot = match root {
        Expr::Variable { name } => match interpreter.environment.get_mut(&name.lexeme) {
            Some(slot) => slot,
            None => {
                return Err(Error::new(
                    ErrorImpl::VariableNotDeclared {
                        variable: name.lexeme.clone(),
                    },
                    name.line,
                ))
            }
        },
        // Anything else indexes a temporary; the write lands on a copy.
        other => {
            scratch = evaluate_expr(interpreter, other)?;
            &mut scratch
        }
    };

    for (step_index, line) in &indexes {
        slot = index_slot(slot, step_index, *line)?;
    }

    match (slot, last_index) {
        (Value::List(items), Value::Integer(position)) => {
            let length = items.len();
            if position < 0 || position as usize >= length {
                return Err(Error::new(
                    ErrorImpl::IndexOutOfBounds {
                        index: position,
                        length,
                    },
                    last_line,
                ));
            }
            items[position as usize] = value;
            Ok(())
        }
        (Value::Dict(entries), Value::Str(key)) => {
            entries.insert(key, value);
            Ok(())
        }
        (Value::List(_), other) => Err(type_mismatch(ValueKind::Integer, &other, last_line)),
        (Value::Dict(_), other) => Err(type_mismatch(ValueKind::String, &other, last_line)),
        (other, _) => Err(Error::new(
            ErrorImpl::IndexTargetNotIndexable {
                received: other.kind().to_string(),
            },
            last_line,
        )),
    }
}

/// Borrows one element of a container mutably. Used for the intermediate
/// steps of a chained index assignment.
fn index_slot<'a>(
    container: &'a mut Value,
    index: &Value,
    line: u32,
) -> Result<&'a mut Value, Error> {
    match (container, index) {
        (Value::List(items), Value::Integer(position)) => {
            let length = items.len();
            if *position < 0 || *position as usize >= length {
                return Err(Error::new(
                    ErrorImpl::IndexOutOfBounds {
                        index: *position,
                        length,
                    },
                    line,
                ));
            }
            Ok(&mut items[*position as usize])
        }
        (Value::Dict(entries), Value::Str(key)) => match entries.get_mut(key) {
            Some(slot) => Ok(slot),
            None => Err(Error::new(
                ErrorImpl::KeyNotFound { key: key.clone() },
                line,
            )),
        },
        (Value::List(_), other) => Err(type_mismatch(ValueKind::Integer, other, line)),
        (Value::Dict(_), other) => Err(type_mismatch(ValueKind::String, other, line)),
        (other, _) => Err(Error::new(
            ErrorImpl::IndexTargetNotIndexable {
                received: other.kind().to_string(),
            },
            line,
        )),
    }
}

/// Reads one element out of a container.
fn read_index(
    container: &Value,
    position: &Value,
    base: &Expr,
    index: &Expr,
) -> Result<Value, Error> {
    match (container, position) {
        (Value::List(items), Value::Integer(at)) => {
            let length = items.len();
            if *at < 0 || *at as usize >= length {
                return Err(Error::new(
                    ErrorImpl::IndexOutOfBounds { index: *at, length },
                    index.token().line,
                ));
            }
            Ok(items[*at as usize].clone())
        }
        (Value::Dict(entries), Value::Str(key)) => match entries.get(key) {
            Some(value) => Ok(value.clone()),
            None => Err(Error::new(
                ErrorImpl::KeyNotFound { key: key.clone() },
                index.token().line,
            )),
        },
        (Value::List(_), other) => Err(type_mismatch(
            ValueKind::Integer,
            other,
            index.token().line,
        )),
        (Value::Dict(_), other) => Err(type_mismatch(
            ValueKind::String,
            other,
            index.token().line,
        )),
        (other, _) => Err(Error::new(
            ErrorImpl::IndexTargetNotIndexable {
                received: other.kind().to_string(),
            },
            base.token().line,
        )),
    }
}

/// Evaluates both operands, requires integers, then applies the operator.
/// Comparisons come out as 1 or 0.
fn evaluate_binary(
    interpreter: &mut Interpreter,
    left: &Expr,
    operator: &Token,
    right: &Expr,
) -> Result<Value, Error> {
    let left_value = evaluate_expr(interpreter, left)?;
    let right_value = evaluate_expr(interpreter, right)?;
    let lhs = integer_operand(&left_value, left)?;
    let rhs = integer_operand(&right_value, right)?;

    let result = match operator.kind {
        TokenKind::Plus => lhs.wrapping_add(rhs),
        TokenKind::Dash => lhs.wrapping_sub(rhs),
        TokenKind::Star => lhs.wrapping_mul(rhs),
        TokenKind::Slash => {
            if rhs == 0 {
                return Err(Error::new(ErrorImpl::DivisionByZero, operator.line));
            }
            lhs.wrapping_div(rhs)
        }
        TokenKind::Greater => (lhs > rhs) as i64,
        TokenKind::GreaterEquals => (lhs >= rhs) as i64,
        TokenKind::Less => (lhs < rhs) as i64,
        TokenKind::LessEquals => (lhs <= rhs) as i64,
        TokenKind::Equals => (lhs == rhs) as i64,
        TokenKind::NotEquals => (lhs != rhs) as i64,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator.lexeme.clone(),
                },
                operator.line,
            ))
        }
    };

    Ok(Value::Integer(result))
}

/// An arithmetic or comparison operand must be an integer at runtime.
fn integer_operand(value: &Value, operand: &Expr) -> Result<i64, Error> {
    match value {
        Value::Integer(number) => Ok(*number),
        _ => Err(Error::new(
            ErrorImpl::IntegerOperandRequired {
                operand: operand.token().lexeme.clone(),
            },
            operand.token().line,
        )),
    }
}

/// Converts a number lexeme to its runtime value. A trailing `L` is
/// stripped and a fractional tail is truncated, so `1.5` evaluates to 1.
fn number_value(token: &Token) -> Result<i64, Error> {
    let lexeme = token.lexeme.strip_suffix('L').unwrap_or(&token.lexeme);
    let integral = match lexeme.split_once('.') {
        Some((whole, _)) => whole,
        None => lexeme,
    };
    integral.parse::<i64>().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.lexeme.clone(),
            },
            token.line,
        )
    })
}

fn type_mismatch(expected: ValueKind, received: &Value, line: u32) -> Error {
    Error::new(
        ErrorImpl::TypeMatchError {
            expected: expected.to_string(),
            received: received.kind().to_string(),
        },
        line,
    )
}
