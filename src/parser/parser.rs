//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the top-level parse
//! entry point. Statement grammars live in `stmt`, expression grammars in
//! `expr`; both operate on the Parser through the token-cursor helpers and
//! the symbol table defined here.

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    scope::symbols::SymbolTable,
};

use super::stmt::parse_stmt;

/// Token kinds that can begin a statement. Error recovery scans forward to
/// one of these (or a line/block boundary) before giving up on the stream.
pub const STATEMENT_KEYWORDS: [TokenKind; 11] = [
    TokenKind::Let,
    TokenKind::Set,
    TokenKind::Say,
    TokenKind::When,
    TokenKind::Match,
    TokenKind::Repeat,
    TokenKind::Define,
    TokenKind::Call,
    TokenKind::Return,
    TokenKind::Throw,
    TokenKind::Try,
];

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream, tracks the current position in it,
/// and owns the symbol table that declarations are recorded in while
/// parsing. Undeclared names and call arity are validated at the point a
/// reference is parsed, so those failures surface as parse errors.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Declarations seen so far, scoped alongside the block structure
    symbols: SymbolTable,
}

impl Parser {
    /// Creates a new Parser instance over a token stream produced by
    /// [`tokenize`](crate::lexer::lexer::tokenize). The stream is expected
    /// to end with an `EOF` token.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            symbols: SymbolTable::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("token stream ends with EOF"))
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token after the current one. Used for the
    /// two-token decisions in the grammar, such as `otherwise` versus
    /// `otherwise when` and a `-` directly in front of a number literal.
    pub fn peek_next_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous token. Never
    /// moves past the trailing `EOF` token.
    pub fn advance(&mut self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
            &self.tokens[self.pos - 1]
        } else {
            &self.tokens[self.pos]
        }
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Optional custom error to return if expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.lexeme.clone(),
                    },
                    token.line,
                )),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len() && self.current_token_kind() != TokenKind::EOF
    }

    /// Read access to the symbol table for reference validation.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Write access to the symbol table for declarations and scopes.
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Consumes the parser, yielding the symbol table so the semantic pass
    /// can pick up the declarations recorded during parsing.
    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }

    /// Discards tokens up to the next statement keyword, `Newline`,
    /// `Dedent`, or `EOF`. Called after a parse error so the reported
    /// diagnostic is not followed by a cascade from the same statement.
    pub fn synchronize(&mut self) {
        while self.has_tokens() {
            let kind = self.current_token_kind();
            if kind == TokenKind::Newline || kind == TokenKind::Dedent {
                return;
            }
            if self.current_token().is_one_of_many(&STATEMENT_KEYWORDS) {
                return;
            }
            self.advance();
        }
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance
/// and parses top-level statements until EOF, skipping the blank-line
/// `Newline` tokens between them.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with state after parsing)
/// - Result containing either the Program or the first Error hit
pub fn parse(tokens: Vec<Token>) -> (Parser, Result<Program, Error>) {
    let mut parser = Parser::new(tokens);

    let mut statements = vec![];

    while parser.has_tokens() {
        if parser.current_token_kind() == TokenKind::Newline {
            parser.advance();
            continue;
        }
        match parse_stmt(&mut parser) {
            Ok(stmt) => statements.push(stmt),
            Err(error) => {
                parser.synchronize();
                return (parser, Err(error));
            }
        }
    }

    (parser, Ok(Program { statements }))
}
