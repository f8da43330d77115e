use crate::{
    ast::{
        ast::Program,
        expressions::Expr,
        statements::Stmt,
        types::ValueKind,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    scope::symbols::{Symbol, SymbolTable},
};

/// Analysis state: the symbol table inherited from the parser, plus a
/// stack of return-kind collectors, one per function definition currently
/// being walked. Returns inside a nested function body land in that
/// function's collector, not the enclosing one.
pub struct TypeChecker {
    pub symbols: SymbolTable,
    return_collectors: Vec<Vec<ValueKind>>,
}

impl TypeChecker {
    pub fn new(symbols: SymbolTable) -> Self {
        TypeChecker {
            symbols,
            return_collectors: vec![],
        }
    }
}

/// Analyzes a parsed program against the symbol table the parser built.
///
/// Global declarations survive parsing; block-local declarations were
/// discarded with their scopes and are re-declared here as the walk
/// re-enters the blocks that introduce them.
///
/// # Returns
///
/// A tuple containing:
/// - The TypeChecker (with the refined symbol table)
/// - The first semantic error found, if any
pub fn type_check(program: &Program, symbols: SymbolTable) -> (TypeChecker, Option<Error>) {
    let mut type_checker = TypeChecker::new(symbols);

    for stmt in program.iter() {
        if let Err(error) = type_check_stmt(&mut type_checker, stmt) {
            return (type_checker, Some(error));
        }
    }

    (type_checker, None)
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::VarDecl {
            name,
            initializer,
            declared_kind,
            is_long,
        } => {
            let inferred = match initializer {
                Some(value) => type_check_expr(type_checker, value)?,
                None => ValueKind::None,
            };

            if let Some(declared) = declared_kind {
                if inferred != ValueKind::None && inferred != *declared {
                    let token = initializer.as_ref().map(|value| value.token()).unwrap_or(name);
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            expected: declared.to_string(),
                            received: inferred.to_string(),
                        },
                        token.line,
                    ));
                }
            }

            let kind = declared_kind.unwrap_or(inferred);
            if type_checker.symbols.exists_in_current_scope(&name.lexeme) {
                type_checker.symbols.update_kind(&name.lexeme, kind);
            } else {
                let mut symbol = Symbol::new(name.clone(), kind);
                symbol.is_long = *is_long;
                type_checker.symbols.add(symbol)?;
            }

            Ok(())
        }
        Stmt::Assign { name, value } => {
            check_assignment(type_checker, name, value)?;
            Ok(())
        }
        Stmt::IndexAssign {
            target,
            index,
            value,
        } => {
            check_index_target(type_checker, target)?;
            type_check_expr(type_checker, index)?;
            type_check_expr(type_checker, value)?;
            Ok(())
        }
        Stmt::Say { value } => {
            type_check_expr(type_checker, value)?;
            Ok(())
        }
        Stmt::When { branches } => {
            for branch in branches {
                if let Some(condition) = &branch.condition {
                    check_condition(type_checker, condition)?;
                }
                for stmt in &branch.body {
                    type_check_stmt(type_checker, stmt)?;
                }
            }
            Ok(())
        }
        Stmt::Match { scrutinee, cases } => {
            let scrutinee_kind = type_check_expr(type_checker, scrutinee)?;
            for case in cases {
                let pattern_kind = type_check_expr(type_checker, &case.pattern)?;
                if scrutinee_kind != ValueKind::None
                    && pattern_kind != ValueKind::None
                    && pattern_kind != scrutinee_kind
                {
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            expected: scrutinee_kind.to_string(),
                            received: pattern_kind.to_string(),
                        },
                        case.pattern.token().line,
                    ));
                }
                for stmt in &case.body {
                    type_check_stmt(type_checker, stmt)?;
                }
            }
            Ok(())
        }
        Stmt::While { condition, body } => {
            check_condition(type_checker, condition)?;
            for stmt in body {
                type_check_stmt(type_checker, stmt)?;
            }
            Ok(())
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
            // The loop scope opens before the bounds are checked because
            // the with-loop's until clause names the iterator.
            type_checker.symbols.enter_scope();
            type_checker
                .symbols
                .add(Symbol::new(iterator.clone(), ValueKind::Integer))?;

            check_loop_bound(type_checker, start)?;
            check_loop_bound(type_checker, end)?;
            if let Some(step) = step {
                check_loop_bound(type_checker, step)?;
            }

            for stmt in body {
                type_check_stmt(type_checker, stmt)?;
            }
            type_checker.symbols.exit_scope();
            Ok(())
        }
        Stmt::FunctionDef {
            name,
            parameters,
            body,
        } => type_check_function(type_checker, name, parameters, body),
        Stmt::Call { name, arguments } => {
            check_call(type_checker, name, arguments)?;
            Ok(())
        }
        Stmt::Return { value } => {
            let kind = match value {
                Some(value) => type_check_expr(type_checker, value)?,
                None => ValueKind::None,
            };
            if let Some(collector) = type_checker.return_collectors.last_mut() {
                collector.push(kind);
            }
            Ok(())
        }
        Stmt::Throw { value } => {
            let kind = type_check_expr(type_checker, value)?;
            if kind != ValueKind::String {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: ValueKind::String.to_string(),
                        received: kind.to_string(),
                    },
                    value.token().line,
                ));
            }
            Ok(())
        }
        Stmt::TryCatch {
            try_body,
            exception,
            catch_body,
        } => {
            for stmt in try_body {
                type_check_stmt(type_checker, stmt)?;
            }

            type_checker.symbols.enter_scope();
            type_checker
                .symbols
                .add(Symbol::new(exception.clone(), ValueKind::String))?;
            for stmt in catch_body {
                type_check_stmt(type_checker, stmt)?;
            }
            type_checker.symbols.exit_scope();
            Ok(())
        }
    }
}

/// Walks a function definition: fresh scope, integer parameters, body
/// statements, then unification of every return kind collected anywhere in
/// the body. The unified kind is written back onto the function's symbol
/// so later call sites see it.
fn type_check_function(
    type_checker: &mut TypeChecker,
    name: &Token,
    parameters: &[Token],
    body: &[Stmt],
) -> Result<(), Error> {
    if !type_checker.symbols.exists_in_current_scope(&name.lexeme) {
        type_checker
            .symbols
            .add(Symbol::function(name.clone(), parameters.to_vec()))?;
    }

    type_checker.symbols.enter_scope();
    for parameter in parameters {
        type_checker
            .symbols
            .add(Symbol::new(parameter.clone(), ValueKind::Integer))?;
    }

    type_checker.return_collectors.push(vec![]);
    let walk = body
        .iter()
        .try_for_each(|stmt| type_check_stmt(type_checker, stmt));
    let collected = type_checker
        .return_collectors
        .pop()
        .expect("collector pushed above");
    walk?;

    type_checker.symbols.exit_scope();

    let mut unified = ValueKind::None;
    for kind in collected {
        if kind == ValueKind::None {
            continue;
        }
        if unified == ValueKind::None {
            unified = kind;
        } else if kind != unified {
            return Err(Error::new(
                ErrorImpl::InconsistentReturn {
                    function: name.lexeme.clone(),
                },
                name.line,
            ));
        }
    }

    type_checker
        .symbols
        .update_return_kind(&name.lexeme, unified);

    Ok(())
}

pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr) -> Result<ValueKind, Error> {
    match expr {
        Expr::Literal { value } => match value.kind {
            TokenKind::Number => Ok(ValueKind::Integer),
            _ => Ok(ValueKind::String),
        },
        Expr::Variable { name } => match type_checker.symbols.lookup(&name.lexeme) {
            Some(symbol) => Ok(symbol.kind),
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
        } => type_check_binary(type_checker, left, operator, right),
        Expr::Paren { inner } => type_check_expr(type_checker, inner),
        Expr::ListLiteral { elements, .. } => {
            let mut element_kind = ValueKind::None;
            for element in elements {
                let kind = type_check_expr(type_checker, element)?;
                if element_kind == ValueKind::None {
                    element_kind = kind;
                } else if kind != element_kind && kind != ValueKind::None {
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            expected: element_kind.to_string(),
                            received: kind.to_string(),
                        },
                        element.token().line,
                    ));
                }
            }
            Ok(ValueKind::List)
        }
        Expr::DictLiteral { entries, .. } => {
            let mut key_kind = ValueKind::None;
            let mut value_kind = ValueKind::None;
            for (key, value) in entries {
                let kind = type_check_expr(type_checker, key)?;
                if key_kind == ValueKind::None {
                    key_kind = kind;
                } else if kind != key_kind && kind != ValueKind::None {
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            expected: key_kind.to_string(),
                            received: kind.to_string(),
                        },
                        key.token().line,
                    ));
                }

                let kind = type_check_expr(type_checker, value)?;
                if value_kind == ValueKind::None {
                    value_kind = kind;
                } else if kind != value_kind && kind != ValueKind::None {
                    return Err(Error::new(
                        ErrorImpl::TypeMatchError {
                            expected: value_kind.to_string(),
                            received: kind.to_string(),
                        },
                        value.token().line,
                    ));
                }
            }
            Ok(ValueKind::Dict)
        }
        Expr::Index { base, index } => {
            check_index_target(type_checker, base)?;
            let index_kind = type_check_expr(type_checker, index)?;
            if index_kind != ValueKind::Integer {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: ValueKind::Integer.to_string(),
                        received: index_kind.to_string(),
                    },
                    index.token().line,
                ));
            }
            // Element kinds are not tracked, so every index access reads
            // as an integer.
            Ok(ValueKind::Integer)
        }
        Expr::Assign { name, value } => check_assignment(type_checker, name, value),
        Expr::IndexAssign {
            target,
            index,
            value,
        } => {
            check_index_target(type_checker, target)?;
            type_check_expr(type_checker, index)?;
            type_check_expr(type_checker, value)
        }
        Expr::Call { name, arguments } => check_call(type_checker, name, arguments),
    }
}

fn type_check_binary(
    type_checker: &mut TypeChecker,
    left: &Expr,
    operator: &Token,
    right: &Expr,
) -> Result<ValueKind, Error> {
    let left_kind = type_check_expr(type_checker, left)?;

    match operator.kind {
        TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash => {
            // The left operand is checked before the right one is walked.
            if left_kind != ValueKind::Integer {
                return Err(integer_operand_error(left));
            }
            let right_kind = type_check_expr(type_checker, right)?;
            if right_kind != ValueKind::Integer {
                return Err(integer_operand_error(right));
            }
            Ok(ValueKind::Integer)
        }
        _ => {
            let right_kind = type_check_expr(type_checker, right)?;
            let left_kind = infer_comparison_operand(type_checker, left, left_kind);
            let right_kind = infer_comparison_operand(type_checker, right, right_kind);

            if left_kind == ValueKind::None || right_kind == ValueKind::None {
                return Err(Error::new(ErrorImpl::UntypedComparison, operator.line));
            }
            if left_kind != right_kind {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: left_kind.to_string(),
                        received: right_kind.to_string(),
                    },
                    operator.line,
                ));
            }
            Ok(ValueKind::Integer)
        }
    }
}

/// A bare variable with no established kind on either side of a comparison
/// is retroactively inferred as an integer, and the declaration's recorded
/// kind is updated to match.
fn infer_comparison_operand(
    type_checker: &mut TypeChecker,
    operand: &Expr,
    kind: ValueKind,
) -> ValueKind {
    if kind == ValueKind::None {
        if let Expr::Variable { name } = operand {
            type_checker
                .symbols
                .update_kind(&name.lexeme, ValueKind::Integer);
            return ValueKind::Integer;
        }
    }
    kind
}

fn integer_operand_error(operand: &Expr) -> Error {
    Error::new(
        ErrorImpl::IntegerOperandRequired {
            operand: operand.token().lexeme.clone(),
        },
        operand.token().line,
    )
}

/// `set NAME as EXPR` and the expression form `NAME = EXPR` share this:
/// the value kind must be compatible with the symbol's recorded kind
/// (unknown kinds are compatible with anything), and a known value kind is
/// written back to the symbol.
fn check_assignment(
    type_checker: &mut TypeChecker,
    name: &Token,
    value: &Expr,
) -> Result<ValueKind, Error> {
    let recorded = match type_checker.symbols.lookup(&name.lexeme) {
        Some(symbol) => symbol.kind,
        None => {
            return Err(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name.lexeme.clone(),
                },
                name.line,
            ))
        }
    };

    let value_kind = type_check_expr(type_checker, value)?;

    if recorded != ValueKind::None && value_kind != ValueKind::None && value_kind != recorded {
        return Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: recorded.to_string(),
                received: value_kind.to_string(),
            },
            name.line,
        ));
    }

    if value_kind != ValueKind::None {
        type_checker.symbols.update_kind(&name.lexeme, value_kind);
    }

    Ok(value_kind)
}

fn check_index_target(type_checker: &mut TypeChecker, target: &Expr) -> Result<(), Error> {
    let kind = type_check_expr(type_checker, target)?;
    if kind != ValueKind::List && kind != ValueKind::Dict {
        return Err(Error::new(
            ErrorImpl::IndexTargetNotIndexable {
                received: kind.to_string(),
            },
            target.token().line,
        ));
    }
    Ok(())
}

fn check_condition(type_checker: &mut TypeChecker, condition: &Expr) -> Result<(), Error> {
    let kind = type_check_expr(type_checker, condition)?;
    if kind != ValueKind::Integer {
        return Err(Error::new(
            ErrorImpl::ConditionNotInteger {
                received: kind.to_string(),
            },
            condition.token().line,
        ));
    }
    Ok(())
}

fn check_loop_bound(type_checker: &mut TypeChecker, bound: &Expr) -> Result<(), Error> {
    let kind = type_check_expr(type_checker, bound)?;
    if kind != ValueKind::Integer {
        return Err(Error::new(
            ErrorImpl::LoopBoundNotInteger {
                received: kind.to_string(),
            },
            bound.token().line,
        ));
    }
    Ok(())
}

/// Shared by the call statement and the call expression: the callee must
/// resolve to a function symbol, arity must match its parameter list, and
/// each argument is analyzed. The call's kind is whatever return kind the
/// function has recorded so far, which is still `None` for a function
/// whose body has not been analyzed yet.
fn check_call(
    type_checker: &mut TypeChecker,
    name: &Token,
    arguments: &[Expr],
) -> Result<ValueKind, Error> {
    let (expected, return_kind) = match type_checker.symbols.lookup(&name.lexeme) {
        None => {
            return Err(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name.lexeme.clone(),
                },
                name.line,
            ))
        }
        Some(symbol) if symbol.kind != ValueKind::Function => {
            return Err(Error::new(
                ErrorImpl::NotAFunction {
                    name: name.lexeme.clone(),
                },
                name.line,
            ))
        }
        Some(symbol) => (symbol.parameters.len(), symbol.return_kind),
    };

    if arguments.len() != expected {
        return Err(Error::new(
            ErrorImpl::UnexpectedArguments {
                function: name.lexeme.clone(),
                expected,
                received: arguments.len(),
            },
            name.line,
        ));
    }

    for argument in arguments {
        type_check_expr(type_checker, argument)?;
    }

    Ok(return_kind)
}
