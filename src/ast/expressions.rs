use crate::lexer::tokens::Token;

/// Expression nodes.
///
/// Literal nodes keep the source token; the lexeme is converted to a value
/// at evaluation time, so what the tokenizer saw is what the runtime gets.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A number or string literal token.
    Literal { value: Token },
    /// A reference to a declared name.
    Variable { name: Token },
    /// A single-tier binary operation. There is no precedence ladder:
    /// `2 + 3 * 4` parses as `(2 + 3) * 4`.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    /// A parenthesized subexpression.
    Paren { inner: Box<Expr> },
    /// `[e1, e2, ...]`
    ListLiteral { open: Token, elements: Vec<Expr> },
    /// `{ k1, v1, k2, v2, ... }` with keys and values alternating.
    DictLiteral {
        open: Token,
        entries: Vec<(Expr, Expr)>,
    },
    /// Postfix `base[index]`.
    Index { base: Box<Expr>, index: Box<Expr> },
    /// Legacy `name = value` in expression position.
    Assign { name: Token, value: Box<Expr> },
    /// Legacy `base[index] = value` in expression position.
    IndexAssign {
        target: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    /// `call name(arguments)`
    Call { name: Token, arguments: Vec<Expr> },
}

impl Expr {
    /// A representative token for the expression, used for error lines.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Literal { value } => value,
            Expr::Variable { name } => name,
            Expr::Binary { left, .. } => left.token(),
            Expr::Paren { inner } => inner.token(),
            Expr::ListLiteral { open, .. } => open,
            Expr::DictLiteral { open, .. } => open,
            Expr::Index { base, .. } => base.token(),
            Expr::Assign { name, .. } => name,
            Expr::IndexAssign { target, .. } => target.token(),
            Expr::Call { name, .. } => name,
        }
    }
}
