use crate::ast::types::ValueKind;
use crate::errors::errors::{Error, ErrorImpl};
use crate::lexer::tokens::Token;
use crate::scope::scope::ScopeStack;

/// One declared name: a variable or a function.
///
/// For variables `kind` is the inferred or annotated value kind and
/// `is_long` records a `long` annotation or an `L`-suffixed initializer.
/// For functions `kind` is [`ValueKind::Function`], `parameters` holds the
/// parameter tokens in declaration order, and `return_kind` is refined by
/// the type checker once the body has been analyzed.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub token: Token,
    pub kind: ValueKind,
    pub is_long: bool,
    pub parameters: Vec<Token>,
    pub return_kind: ValueKind,
}

impl Symbol {
    pub fn new(token: Token, kind: ValueKind) -> Symbol {
        Symbol {
            token,
            kind,
            is_long: false,
            parameters: Vec::new(),
            return_kind: ValueKind::None,
        }
    }

    pub fn function(token: Token, parameters: Vec<Token>) -> Symbol {
        Symbol {
            token,
            kind: ValueKind::Function,
            is_long: false,
            parameters,
            return_kind: ValueKind::None,
        }
    }

    pub fn name(&self) -> &str {
        &self.token.lexeme
    }
}

/// Scope-aware table of declarations, shared by the parser and the type
/// checker. The parser records names as it encounters declarations so it
/// can reject uses of undeclared variables at parse time; the type checker
/// then refines the recorded kinds.
pub struct SymbolTable {
    scopes: ScopeStack<Symbol>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            scopes: ScopeStack::new(),
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.enter_scope();
    }

    /// Pops the current scope. Declarations made in it are discarded, so a
    /// name declared inside a block must be re-declared by any later pass
    /// that wants to see it again.
    pub fn exit_scope(&mut self) {
        self.scopes.exit_scope();
    }

    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Adds a declaration to the current scope.
    ///
    /// Fails if the current scope already holds the name. Shadowing an
    /// outer scope's binding is allowed; re-declaring within the same
    /// scope is not.
    pub fn add(&mut self, symbol: Symbol) -> Result<(), Error> {
        if self.scopes.contains_in_current_scope(symbol.name()) {
            let error = if symbol.kind == ValueKind::Function {
                ErrorImpl::FunctionAlreadyDeclared {
                    function: symbol.name().to_string(),
                }
            } else {
                ErrorImpl::VariableAlreadyDeclared {
                    variable: symbol.name().to_string(),
                }
            };
            return Err(Error::new(error, symbol.token.line));
        }
        let name = symbol.token.lexeme.clone();
        self.scopes.insert(&name, symbol);
        Ok(())
    }

    /// True if `name` is declared in any enclosing scope.
    pub fn exists(&self, name: &str) -> bool {
        self.scopes.contains(name)
    }

    /// True if `name` is declared in the current scope specifically.
    pub fn exists_in_current_scope(&self, name: &str) -> bool {
        self.scopes.contains_in_current_scope(name)
    }

    /// Resolves `name` to its nearest declaration, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.get(name)
    }

    /// Overwrites the recorded kind of the nearest declaration of `name`.
    /// Returns false if the name is not declared anywhere.
    pub fn update_kind(&mut self, name: &str, kind: ValueKind) -> bool {
        match self.scopes.get_mut(name) {
            Some(symbol) => {
                symbol.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Overwrites the recorded return kind of the outermost declaration of
    /// `name`. Functions are declared in the scope enclosing their body,
    /// so when the checker walks the body the declaration of interest is
    /// the oldest one, behind any parameter that shadows the name.
    pub fn update_return_kind(&mut self, name: &str, kind: ValueKind) -> bool {
        match self.scopes.get_mut_outermost(name) {
            Some(symbol) => {
                symbol.return_kind = kind;
                true
            }
            None => false,
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
