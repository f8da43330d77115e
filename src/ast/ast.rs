use std::slice::Iter;

use super::statements::Stmt;

/// The parsed program: top-level statements in source order.
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }
}
