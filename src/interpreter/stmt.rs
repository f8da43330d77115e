//! Statement execution.
//!
//! Every scope entered here is exited on all paths before the result
//! propagates, so the environment depth is the same after a statement as
//! before it regardless of returns or errors.

use std::rc::Rc;

use crate::ast::expressions::Expr;
use crate::ast::statements::Stmt;
use crate::errors::errors::{Error, ErrorImpl};
use crate::lexer::tokens::Token;

use super::expr::{assign_index, assign_variable, evaluate_call, evaluate_expr};
use super::interpreter::Interpreter;
use super::value::{Flow, FunctionValue, Value};

pub fn execute_stmt(interpreter: &mut Interpreter, stmt: &Stmt) -> Result<Flow, Error> {
    match stmt {
        Stmt::VarDecl {
            name, initializer, ..
        } => {
            let value = match initializer {
                Some(initializer) => evaluate_expr(interpreter, initializer)?,
                None => Value::Void,
            };
            // Defines in the current scope, overwriting a binding already
            // made in that exact scope.
            interpreter.environment.insert(&name.lexeme, value);
            Ok(Flow::Normal)
        }
        Stmt::Assign { name, value } => {
            let value = evaluate_expr(interpreter, value)?;
            assign_variable(interpreter, name, value)?;
            Ok(Flow::Normal)
        }
        Stmt::IndexAssign {
            target,
            index,
            value,
        } => {
            let value = evaluate_expr(interpreter, value)?;
            assign_index(interpreter, target, index, value)?;
            Ok(Flow::Normal)
        }
        Stmt::Say { value } => {
            let value = evaluate_expr(interpreter, value)?;
            interpreter.say(&value);
            Ok(Flow::Normal)
        }
        Stmt::When { branches } => {
            for branch in branches {
                match &branch.condition {
                    Some(condition) => {
                        let value = evaluate_expr(interpreter, condition)?;
                        if condition_value(condition, &value)? != 0 {
                            return run_scoped_block(interpreter, &branch.body);
                        }
                    }
                    // The bare `otherwise` arm runs if reached.
                    None => return run_scoped_block(interpreter, &branch.body),
                }
            }
            Ok(Flow::Normal)
        }
        Stmt::Match { scrutinee, cases } => {
            let value = evaluate_expr(interpreter, scrutinee)?;
            for case in cases {
                let pattern = evaluate_expr(interpreter, &case.pattern)?;
                if pattern == value {
                    return run_scoped_block(interpreter, &case.body);
                }
            }
            // No arm matched; nothing runs.
            Ok(Flow::Normal)
        }
        Stmt::While { condition, body } => {
            loop {
                let value = evaluate_expr(interpreter, condition)?;
                if condition_value(condition, &value)? == 0 {
                    break;
                }
                match run_scoped_block(interpreter, body)? {
                    Flow::Normal => {}
                    flow => return Ok(flow),
                }
            }
            Ok(Flow::Normal)
        }
        Stmt::For {
            iterator,
            start,
            end,
            step,
            body,
        }
        | Stmt::With {
            iterator,
            start,
            end,
            step,
            body,
        } => {
            // One wrapping scope for the whole loop; iterations share it.
            interpreter.environment.enter_scope();
            let flow = run_counted_loop(interpreter, iterator, start, end, step.as_ref(), body);
            interpreter.environment.exit_scope();
            flow
        }
        Stmt::FunctionDef {
            name,
            parameters,
            body,
        } => {
            let function = FunctionValue {
                name: name.lexeme.clone(),
                parameters: parameters
                    .iter()
                    .map(|parameter| parameter.lexeme.clone())
                    .collect(),
                body: body.clone(),
            };
            interpreter
                .environment
                .insert(&name.lexeme, Value::Function(Rc::new(function)));
            Ok(Flow::Normal)
        }
        Stmt::Call { name, arguments } => {
            evaluate_call(interpreter, name, arguments)?;
            Ok(Flow::Normal)
        }
        Stmt::Return { value } => {
            let value = match value {
                Some(value) => evaluate_expr(interpreter, value)?,
                None => Value::Void,
            };
            Ok(Flow::Return(value))
        }
        Stmt::Throw { value } => {
            let thrown = evaluate_expr(interpreter, value)?;
            Err(Error::new(
                ErrorImpl::Thrown {
                    message: thrown.to_string(),
                },
                value.token().line,
            ))
        }
        Stmt::TryCatch {
            try_body,
            exception,
            catch_body,
        } => match run_scoped_block(interpreter, try_body) {
            Err(error) => {
                interpreter.environment.enter_scope();
                interpreter
                    .environment
                    .insert(&exception.lexeme, Value::Str(error.message()));
                let flow = run_block(interpreter, catch_body);
                interpreter.environment.exit_scope();
                flow
            }
            // Normal completion passes through, and so does `return`;
            // only runtime errors are caught.
            flow => flow,
        },
    }
}

/// Runs the statements of a block in the current scope, stopping early
/// when one of them returns.
pub fn run_block(interpreter: &mut Interpreter, body: &[Stmt]) -> Result<Flow, Error> {
    for stmt in body {
        match execute_stmt(interpreter, stmt)? {
            Flow::Normal => {}
            flow => return Ok(flow),
        }
    }
    Ok(Flow::Normal)
}

/// Runs a block in a fresh child scope.
fn run_scoped_block(interpreter: &mut Interpreter, body: &[Stmt]) -> Result<Flow, Error> {
    interpreter.environment.enter_scope();
    let flow = run_block(interpreter, body);
    interpreter.environment.exit_scope();
    flow
}

/// Shared body of the counted loops.
///
/// The iterator is bound from the start value before the end bound is
/// evaluated, because the with-loop's `until` clause may name it. Bounds
/// and step are fixed once; the end bound is inclusive, with the step's
/// sign picking the direction. The counter itself is host-side state: the
/// iterator binding is rewritten from it at the top of every pass, so a
/// body-level `set` on the iterator lasts only until the pass ends.
fn run_counted_loop(
    interpreter: &mut Interpreter,
    iterator: &Token,
    start: &Expr,
    end: &Expr,
    step: Option<&Expr>,
    body: &[Stmt],
) -> Result<Flow, Error> {
    let start_value = loop_bound(interpreter, start)?;
    interpreter
        .environment
        .insert(&iterator.lexeme, Value::Integer(start_value));

    let end_value = loop_bound(interpreter, end)?;
    let step_value = match step {
        Some(step) => {
            let step_value = loop_bound(interpreter, step)?;
            if step_value == 0 {
                return Err(Error::new(ErrorImpl::ZeroStep, step.token().line));
            }
            step_value
        }
        None => 1,
    };

    let mut current = start_value;
    loop {
        let finished = if step_value > 0 {
            current > end_value
        } else {
            current < end_value
        };
        if finished {
            break;
        }

        interpreter
            .environment
            .insert(&iterator.lexeme, Value::Integer(current));
        match run_block(interpreter, body)? {
            Flow::Normal => {}
            flow => return Ok(flow),
        }

        current = current.wrapping_add(step_value);
    }

    Ok(Flow::Normal)
}

/// Evaluates a loop bound or step, which must come out an integer.
fn loop_bound(interpreter: &mut Interpreter, bound: &Expr) -> Result<i64, Error> {
    match evaluate_expr(interpreter, bound)? {
        Value::Integer(value) => Ok(value),
        other => Err(Error::new(
            ErrorImpl::LoopBoundNotInteger {
                received: other.kind().to_string(),
            },
            bound.token().line,
        )),
    }
}

/// A condition must come out an integer; nonzero is taken as true.
fn condition_value(condition: &Expr, value: &Value) -> Result<i64, Error> {
    match value {
        Value::Integer(number) => Ok(*number),
        other => Err(Error::new(
            ErrorImpl::ConditionNotInteger {
                received: other.kind().to_string(),
            },
            condition.token().line,
        )),
    }
}
