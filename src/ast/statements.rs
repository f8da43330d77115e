use crate::lexer::tokens::Token;

use super::{expressions::Expr, types::ValueKind};

/// One arm of a `when` statement. The final bare `otherwise` arm has no
/// condition.
#[derive(Debug, Clone)]
pub struct WhenBranch {
    pub condition: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// One arm of a `match` statement.
#[derive(Debug, Clone)]
pub struct MatchCase {
    pub pattern: Expr,
    pub body: Vec<Stmt>,
}

/// Statement nodes.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `let NAME [be EXPR] [as TYPE]`
    VarDecl {
        name: Token,
        initializer: Option<Expr>,
        declared_kind: Option<ValueKind>,
        is_long: bool,
    },
    /// `set NAME as EXPR`
    Assign { name: Token, value: Expr },
    /// `set NAME[INDEX] as EXPR`. The target is the indexed base, which may
    /// itself be an index expression for nested containers.
    IndexAssign {
        target: Expr,
        index: Expr,
        value: Expr,
    },
    /// `say EXPR`
    Say { value: Expr },
    /// `when ... then ... otherwise when ... otherwise ... end`
    When { branches: Vec<WhenBranch> },
    /// `match EXPR` with `case` arms.
    Match {
        scrutinee: Expr,
        cases: Vec<MatchCase>,
    },
    /// `repeat while EXPR`
    While { condition: Expr, body: Vec<Stmt> },
    /// `repeat for NAME from EXPR to EXPR [step EXPR]`
    For {
        iterator: Token,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
    },
    /// `repeat with (NAME) starting at EXPR, until ..., step EXPR`.
    /// Same shape as the counted loop; only the keywords differ.
    With {
        iterator: Token,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
    },
    /// `define function NAME with (P1, ...) ... end`
    FunctionDef {
        name: Token,
        parameters: Vec<Token>,
        body: Vec<Stmt>,
    },
    /// `call NAME(ARGS)` as a statement; the result is discarded.
    Call { name: Token, arguments: Vec<Expr> },
    /// `return [EXPR]`
    Return { value: Option<Expr> },
    /// `throw EXPR`
    Throw { value: Expr },
    /// `try ... catch (NAME) ... end`
    TryCatch {
        try_body: Vec<Stmt>,
        exception: Token,
        catch_body: Vec<Stmt>,
    },
}
