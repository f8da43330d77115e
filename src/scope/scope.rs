use std::collections::HashMap;

/// A stack of name-to-value maps representing nested lexical scopes.
///
/// The stack is created with a single global scope and is never empty:
/// `exit_scope` refuses to pop the outermost frame. Lookups walk from the
/// innermost scope outward, so an inner binding shadows an outer one with
/// the same name without disturbing it.
pub struct ScopeStack<T> {
    scopes: Vec<HashMap<String, T>>,
}

impl<T> ScopeStack<T> {
    pub fn new() -> ScopeStack<T> {
        ScopeStack {
            scopes: vec![HashMap::new()],
        }
    }

    /// Pushes a fresh, empty scope onto the stack.
    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the current scope, discarding every binding made in it.
    ///
    /// # Panics
    ///
    /// Panics if called with only the global scope on the stack. Every
    /// caller pushes and pops in strict balance, so reaching that state
    /// is a bug in the calling stage, not in user input.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() == 1 {
            panic!("cannot exit the global scope");
        }
        self.scopes.pop();
    }

    /// Number of scopes currently on the stack, the global scope included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Binds `name` in the current scope, overwriting any existing binding
    /// in that scope. Bindings in outer scopes are left untouched.
    pub fn insert(&mut self, name: &str, value: T) {
        self.scopes
            .last_mut()
            .expect("scope stack is never empty")
            .insert(name.to_string(), value);
    }

    /// Finds `name` searching from the innermost scope outward.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Mutable variant of [`get`](ScopeStack::get), innermost scope first.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(value) = scope.get_mut(name) {
                return Some(value);
            }
        }
        None
    }

    /// Finds `name` searching from the outermost scope inward. Used where
    /// the oldest declaration must win, such as updating the recorded
    /// return type of a function from inside its own body.
    pub fn get_mut_outermost(&mut self, name: &str) -> Option<&mut T> {
        for scope in self.scopes.iter_mut() {
            if let Some(value) = scope.get_mut(name) {
                return Some(value);
            }
        }
        None
    }

    /// True if `name` is bound in any scope on the stack.
    pub fn contains(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains_key(name))
    }

    /// True if `name` is bound in the current (innermost) scope only.
    pub fn contains_in_current_scope(&self, name: &str) -> bool {
        self.scopes
            .last()
            .expect("scope stack is never empty")
            .contains_key(name)
    }
}

impl<T> Default for ScopeStack<T> {
    fn default() -> Self {
        ScopeStack::new()
    }
}
