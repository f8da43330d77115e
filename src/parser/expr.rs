use crate::{
    ast::{expressions::Expr, types::ValueKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    MK_TOKEN,
};

use super::parser::Parser;

/// Operators accepted by the single binary tier, all at the same
/// precedence. The legacy `=` is handled one layer up, not here.
pub const BINARY_OPERATORS: [TokenKind; 10] = [
    TokenKind::Plus,
    TokenKind::Dash,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Greater,
    TokenKind::Less,
    TokenKind::GreaterEquals,
    TokenKind::LessEquals,
    TokenKind::Equals,
    TokenKind::NotEquals,
];

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_assignment_expr(parser)
}

/// The outermost expression layer. A bare `=` after a binary expression
/// folds the left side into an assignment; anything else passes through.
/// Only a variable or an index expression can stand on the left.
pub fn parse_assignment_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let left = parse_binary_expr(parser)?;

    if parser.current_token_kind() != TokenKind::Assignment {
        return Ok(left);
    }

    let operator = parser.advance().clone();
    let value = Box::new(parse_assignment_expr(parser)?);

    match left {
        Expr::Variable { name } => Ok(Expr::Assign { name, value }),
        Expr::Index { base, index } => Ok(Expr::IndexAssign {
            target: base,
            index,
            value,
        }),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: operator.lexeme.clone(),
                message: String::from("left side of `=` must be a variable or an index"),
            },
            operator.line,
        )),
    }
}

/// A primary expression followed by zero or more `(operator, primary)`
/// pairs, folded left-associatively. There is no precedence ladder, so
/// `2 + 3 * 4` parses as `(2 + 3) * 4`.
pub fn parse_binary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut left = parse_primary_expr(parser)?;

    while parser.current_token().is_one_of_many(&BINARY_OPERATORS) {
        let operator = parser.advance().clone();
        let right = parse_primary_expr(parser)?;
        left = Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        };
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = match parser.current_token_kind() {
        TokenKind::Number | TokenKind::String => Expr::Literal {
            value: parser.advance().clone(),
        },
        // A dash directly in front of a number literal is a negative
        // literal, folded into a single token here since the grammar has
        // no unary operators.
        TokenKind::Dash if parser.peek_next_kind() == TokenKind::Number => {
            let dash = parser.advance().clone();
            let number = parser.advance().clone();
            Expr::Literal {
                value: MK_TOKEN!(
                    TokenKind::Number,
                    format!("-{}", number.lexeme),
                    dash.line
                ),
            }
        }
        TokenKind::Identifier => {
            let name = parser.advance().clone();
            if !parser.symbols().exists(&name.lexeme) {
                return Err(Error::new(
                    ErrorImpl::VariableNotDeclared {
                        variable: name.lexeme.clone(),
                    },
                    name.line,
                ));
            }
            Expr::Variable { name }
        }
        TokenKind::Call => {
            parser.advance();
            let (name, arguments) = parse_call(parser)?;
            Expr::Call { name, arguments }
        }
        TokenKind::OpenParen => {
            parser.advance();
            let inner = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            Expr::Paren {
                inner: Box::new(inner),
            }
        }
        TokenKind::OpenBracket => parse_list_literal(parser)?,
        TokenKind::OpenCurly => parse_dict_literal(parser)?,
        _ => {
            let token = parser.current_token();
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.lexeme.clone(),
                },
                token.line,
            ));
        }
    };

    // Postfix indexing, which may chain: xs[0][1]
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        let index = parse_expr(parser)?;
        parser.expect(TokenKind::CloseBracket)?;
        expr = Expr::Index {
            base: Box::new(expr),
            index: Box::new(index),
        };
    }

    Ok(expr)
}

/// Parses `NAME(ARG, ...)` after the `call` keyword has been consumed,
/// validating callee and arity against the symbol table. Used by both the
/// call statement and the call expression.
pub fn parse_call(parser: &mut Parser) -> Result<(Token, Vec<Expr>), Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().lexeme.clone(),
            message: String::from("expected a function name after `call`"),
        },
        parser.current_token().line,
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let expected = match parser.symbols().lookup(&name.lexeme) {
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
        Some(symbol) => symbol.parameters.len(),
    };

    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }
        arguments.push(parse_expr(parser)?);
    }
    parser.expect(TokenKind::CloseParen)?;

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

    Ok((name, arguments))
}

fn parse_list_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone();

    let mut elements = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }
        elements.push(parse_expr(parser)?);
    }
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::ListLiteral { open, elements })
}

/// `{ k1, v1, k2, v2, ... }`: keys and values alternate, comma-separated.
/// An odd number of entries fails on the missing value.
fn parse_dict_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone();

    let mut entries = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }
        let key = parse_expr(parser)?;
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
        let value = parse_expr(parser)?;
        entries.push((key, value));
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::DictLiteral { open, entries })
}
