use crate::{
    ast::{
        expressions::Expr,
        statements::{MatchCase, Stmt, WhenBranch},
        types::ValueKind,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::expr::{parse_call, parse_expr},
    scope::symbols::Symbol,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.current_token_kind() {
        TokenKind::Let => parse_var_decl_stmt(parser),
        TokenKind::Set => parse_set_stmt(parser),
        TokenKind::Say => parse_say_stmt(parser),
        TokenKind::When => parse_when_stmt(parser),
        TokenKind::Match => parse_match_stmt(parser),
        TokenKind::Repeat => parse_repeat_stmt(parser),
        TokenKind::Define => parse_function_def_stmt(parser),
        TokenKind::Call => parse_call_stmt(parser),
        TokenKind::Return => parse_return_stmt(parser),
        TokenKind::Throw => parse_throw_stmt(parser),
        TokenKind::Try => parse_try_catch_stmt(parser),
        _ => {
            let token = parser.current_token();
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.lexeme.clone(),
                },
                token.line,
            ))
        }
    }
}

/// Parses statements up to the `Dedent` that closes the current block,
/// consuming it. Blank-line `Newline` tokens between statements are
/// skipped. The caller is responsible for the scope around the block and
/// for the `end` keyword that follows the `Dedent`.
fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut statements = vec![];

    while parser.current_token_kind() != TokenKind::Dedent {
        if parser.current_token_kind() == TokenKind::Newline {
            parser.advance();
            continue;
        }
        if parser.current_token_kind() == TokenKind::EOF {
            let token = parser.current_token();
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.lexeme.clone(),
                    message: String::from("block is not closed"),
                },
                token.line,
            ));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::Dedent)?;

    Ok(statements)
}

/// `let NAME [be|=] EXPR [as TYPE]` with both the initializer and the type
/// hint optional. The name goes into the current scope; a duplicate in the
/// same scope is rejected here, while shadowing an outer name is fine.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().lexeme.clone(),
            message: String::from("expected identifier during variable declaration"),
        },
        parser.current_token().line,
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let initializer;
    if parser.current_token().is_one_of_many(&[TokenKind::Be, TokenKind::Assignment]) {
        parser.advance();
        initializer = Some(parse_expr(parser)?);
    } else {
        initializer = None;
    }

    let mut is_long = matches!(
        &initializer,
        Some(Expr::Literal { value })
            if value.kind == TokenKind::Number && value.lexeme.ends_with('L')
    );

    let declared_kind;
    if parser.current_token_kind() == TokenKind::As {
        parser.advance();
        let error = Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().lexeme.clone(),
                message: String::from("expected a type name after `as`"),
            },
            parser.current_token().line,
        );
        let type_token = parser.expect_error(TokenKind::Identifier, Some(error))?;
        declared_kind = Some(match type_token.lexeme.as_str() {
            "integer" => ValueKind::Integer,
            "string" => ValueKind::String,
            "list" => ValueKind::List,
            "dict" => ValueKind::Dict,
            "long" => {
                is_long = true;
                ValueKind::Integer
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnknownType {
                        type_: type_token.lexeme.clone(),
                    },
                    type_token.line,
                ))
            }
        });
    } else {
        declared_kind = None;
    }

    let mut symbol = Symbol::new(name.clone(), declared_kind.unwrap_or(ValueKind::None));
    symbol.is_long = is_long;
    parser.symbols_mut().add(symbol)?;

    Ok(Stmt::VarDecl {
        name,
        initializer,
        declared_kind,
        is_long,
    })
}

/// `set NAME as EXPR` or `set NAME[INDEX]... as EXPR`. The name must
/// already be visible; chained brackets fold into a nested index target so
/// inner containers can be assigned through.
pub fn parse_set_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().lexeme.clone(),
            message: String::from("expected identifier after `set`"),
        },
        parser.current_token().line,
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    if !parser.symbols().exists(&name.lexeme) {
        return Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: name.lexeme.clone(),
            },
            name.line,
        ));
    }

    if parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        let mut target = Expr::Variable { name };
        let mut index = parse_expr(parser)?;
        parser.expect(TokenKind::CloseBracket)?;

        while parser.current_token_kind() == TokenKind::OpenBracket {
            parser.advance();
            let next = parse_expr(parser)?;
            parser.expect(TokenKind::CloseBracket)?;
            target = Expr::Index {
                base: Box::new(target),
                index: Box::new(index),
            };
            index = next;
        }

        parser.expect(TokenKind::As)?;
        let value = parse_expr(parser)?;

        return Ok(Stmt::IndexAssign {
            target,
            index,
            value,
        });
    }

    parser.expect(TokenKind::As)?;
    let value = parse_expr(parser)?;

    Ok(Stmt::Assign { name, value })
}

pub fn parse_say_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let value = parse_expr(parser)?;

    Ok(Stmt::Say { value })
}

/// `when EXPR then` block, zero or more `otherwise when EXPR then` blocks,
/// an optional final bare `otherwise` block, then `end`. The second-token
/// peek distinguishes a chained branch from the default branch.
pub fn parse_when_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let mut branches = vec![];

    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::Then)?;
    branches.push(WhenBranch {
        condition: Some(condition),
        body: parse_scoped_block(parser)?,
    });

    while parser.current_token_kind() == TokenKind::Otherwise {
        if parser.peek_next_kind() == TokenKind::When {
            parser.advance();
            parser.advance();
            let condition = parse_expr(parser)?;
            parser.expect(TokenKind::Then)?;
            branches.push(WhenBranch {
                condition: Some(condition),
                body: parse_scoped_block(parser)?,
            });
        } else {
            parser.advance();
            branches.push(WhenBranch {
                condition: None,
                body: parse_scoped_block(parser)?,
            });
            break;
        }
    }

    parser.expect(TokenKind::End)?;

    Ok(Stmt::When { branches })
}

/// An `Indent`-delimited body with its own symbol-table scope.
fn parse_scoped_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    expect_indent(parser)?;
    parser.symbols_mut().enter_scope();
    let body = parse_block(parser)?;
    parser.symbols_mut().exit_scope();
    Ok(body)
}

/// Consumes the `Indent` opening a block body. Blank lines between the
/// block header and the body show up as `Newline` tokens and are skipped.
fn expect_indent(parser: &mut Parser) -> Result<(), Error> {
    while parser.current_token_kind() == TokenKind::Newline {
        parser.advance();
    }
    parser.expect(TokenKind::Indent)?;
    Ok(())
}

/// `match EXPR` over an indented run of `case EXPR` blocks, then `end`.
pub fn parse_match_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let scrutinee = parse_expr(parser)?;
    expect_indent(parser)?;

    let mut cases = vec![];

    while parser.current_token_kind() != TokenKind::Dedent {
        if parser.current_token_kind() == TokenKind::Newline {
            parser.advance();
            continue;
        }
        let error = Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().lexeme.clone(),
                message: String::from("expected `case` inside match"),
            },
            parser.current_token().line,
        );
        parser.expect_error(TokenKind::Case, Some(error))?;
        let pattern = parse_expr(parser)?;
        cases.push(MatchCase {
            pattern,
            body: parse_scoped_block(parser)?,
        });
    }

    parser.expect(TokenKind::Dedent)?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::Match { scrutinee, cases })
}

pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    match parser.current_token_kind() {
        TokenKind::While => parse_while_stmt(parser),
        TokenKind::For => parse_for_stmt(parser),
        TokenKind::With => parse_with_stmt(parser),
        _ => {
            let token = parser.current_token();
            Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.lexeme.clone(),
                    message: String::from("expected `while`, `for`, or `with` after `repeat`"),
                },
                token.line,
            ))
        }
    }
}

fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let condition = parse_expr(parser)?;
    let body = parse_scoped_block(parser)?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::While { condition, body })
}

/// `repeat for NAME from EXPR to EXPR [step EXPR]`. The loop scope wraps
/// the header too, and the iterator is declared before the bounds are
/// parsed, so the bounds may reference it.
fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().lexeme.clone(),
            message: String::from("expected loop variable after `for`"),
        },
        parser.current_token().line,
    );
    let iterator = parser.expect_error(TokenKind::Identifier, Some(error))?;

    parser.symbols_mut().enter_scope();
    parser
        .symbols_mut()
        .add(Symbol::new(iterator.clone(), ValueKind::Integer))?;

    parser.expect(TokenKind::From)?;
    let start = parse_expr(parser)?;
    parser.expect(TokenKind::To)?;
    let end = parse_expr(parser)?;

    let step;
    if parser.current_token_kind() == TokenKind::Step {
        parser.advance();
        step = Some(parse_expr(parser)?);
    } else {
        step = None;
    }

    expect_indent(parser)?;
    let body = parse_block(parser)?;
    parser.symbols_mut().exit_scope();
    parser.expect(TokenKind::End)?;

    Ok(Stmt::For {
        iterator,
        start,
        end,
        step,
        body,
    })
}

/// `repeat with (NAME) starting at EXPR, until NAME OP EXPR, step EXPR`.
///
/// The `until` clause restates the loop variable with a comparison whose
/// right-hand side is the end bound; the operator itself carries no
/// meaning at run time, where direction follows the step sign. Commas
/// between the clauses are optional. The iterator is declared before the
/// header expressions are parsed, since the `until` clause names it.
fn parse_with_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().lexeme.clone(),
            message: String::from("expected loop variable after `with (`"),
        },
        parser.current_token().line,
    );
    let iterator = parser.expect_error(TokenKind::Identifier, Some(error))?;
    parser.expect(TokenKind::CloseParen)?;

    parser.symbols_mut().enter_scope();
    parser
        .symbols_mut()
        .add(Symbol::new(iterator.clone(), ValueKind::Integer))?;

    parser.expect(TokenKind::Starting)?;
    parser.expect(TokenKind::At)?;
    let start = parse_expr(parser)?;

    skip_comma(parser);
    parser.expect(TokenKind::Until)?;
    let until_name = parser.expect(TokenKind::Identifier)?;
    if until_name.lexeme != iterator.lexeme {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: until_name.lexeme.clone(),
                message: String::from("the `until` clause must test the loop variable"),
            },
            until_name.line,
        ));
    }
    expect_comparison(parser)?;
    let end = parse_expr(parser)?;

    let step;
    skip_comma(parser);
    if parser.current_token_kind() == TokenKind::Step {
        parser.advance();
        step = Some(parse_expr(parser)?);
    } else {
        step = None;
    }

    expect_indent(parser)?;
    let body = parse_block(parser)?;
    parser.symbols_mut().exit_scope();
    parser.expect(TokenKind::End)?;

    Ok(Stmt::With {
        iterator,
        start,
        end,
        step,
        body,
    })
}

fn skip_comma(parser: &mut Parser) {
    if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
    }
}

fn expect_comparison(parser: &mut Parser) -> Result<Token, Error> {
    const COMPARISONS: [TokenKind; 6] = [
        TokenKind::Less,
        TokenKind::LessEquals,
        TokenKind::Greater,
        TokenKind::GreaterEquals,
        TokenKind::Equals,
        TokenKind::NotEquals,
    ];
    if parser.current_token().is_one_of_many(&COMPARISONS) {
        Ok(parser.advance().clone())
    } else {
        let token = parser.current_token();
        Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.lexeme.clone(),
                message: String::from("expected a comparison in the `until` clause"),
            },
            token.line,
        ))
    }
}

/// `define function NAME with (P1, P2, ...)` body `end`. The function
/// symbol is added to the enclosing scope before the body is parsed, which
/// is what lets the body call itself.
pub fn parse_function_def_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    parser.expect(TokenKind::Function)?;

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().lexeme.clone(),
            message: String::from("expected a function name after `define function`"),
        },
        parser.current_token().line,
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    parser.expect(TokenKind::With)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }
        parameters.push(parser.expect(TokenKind::Identifier)?);
    }
    parser.expect(TokenKind::CloseParen)?;

    parser
        .symbols_mut()
        .add(Symbol::function(name.clone(), parameters.clone()))?;

    expect_indent(parser)?;
    parser.symbols_mut().enter_scope();
    for parameter in &parameters {
        parser
            .symbols_mut()
            .add(Symbol::new(parameter.clone(), ValueKind::Integer))?;
    }
    let body = parse_block(parser)?;
    parser.symbols_mut().exit_scope();
    parser.expect(TokenKind::End)?;

    Ok(Stmt::FunctionDef {
        name,
        parameters,
        body,
    })
}

pub fn parse_call_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let (name, arguments) = parse_call(parser)?;

    Ok(Stmt::Call { name, arguments })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let value;
    if parser.current_token().is_one_of_many(&[
        TokenKind::Newline,
        TokenKind::Dedent,
        TokenKind::EOF,
    ]) {
        value = None;
    } else {
        value = Some(parse_expr(parser)?);
    }

    Ok(Stmt::Return { value })
}

pub fn parse_throw_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let value = parse_expr(parser)?;

    Ok(Stmt::Throw { value })
}

/// `try` body `catch (NAME)` body `end`. The caught name is bound as a
/// string-kind symbol inside the catch body's scope only.
pub fn parse_try_catch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let try_body = parse_scoped_block(parser)?;

    parser.expect(TokenKind::Catch)?;
    parser.expect(TokenKind::OpenParen)?;
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().lexeme.clone(),
            message: String::from("expected an exception name after `catch (`"),
        },
        parser.current_token().line,
    );
    let exception = parser.expect_error(TokenKind::Identifier, Some(error))?;
    parser.expect(TokenKind::CloseParen)?;

    expect_indent(parser)?;
    parser.symbols_mut().enter_scope();
    parser
        .symbols_mut()
        .add(Symbol::new(exception.clone(), ValueKind::String))?;
    let catch_body = parse_block(parser)?;
    parser.symbols_mut().exit_scope();

    parser.expect(TokenKind::End)?;

    Ok(Stmt::TryCatch {
        try_body,
        exception,
        catch_body,
    })
}
