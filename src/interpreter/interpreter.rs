//! Interpreter state and the top-level run loop.
//!
//! The interpreter owns the runtime environment, a scope stack of values
//! mirroring the scopes the parser tracked, and the sink `say` writes to.
//! Statements and expressions are walked by the free functions in the
//! sibling modules.

use crate::ast::ast::Program;
use crate::errors::errors::Error;
use crate::scope::scope::ScopeStack;

use super::stmt::execute_stmt;
use super::value::{Flow, Value};

/// Where `say` lines go.
enum Output {
    Stdout,
    Buffer(Vec<String>),
}

/// The state of an executing program.
pub struct Interpreter {
    /// Runtime bindings, innermost scope last.
    pub environment: ScopeStack<Value>,
    output: Output,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            environment: ScopeStack::new(),
            output: Output::Stdout,
        }
    }

    /// An interpreter whose `say` output is collected instead of printed.
    pub fn with_buffer() -> Self {
        Interpreter {
            environment: ScopeStack::new(),
            output: Output::Buffer(vec![]),
        }
    }

    /// Runs every top-level statement in order. A `return` at the top
    /// level stops the walk without being an error.
    pub fn run(&mut self, program: &Program) -> Result<(), Error> {
        for stmt in program.iter() {
            if let Flow::Return(_) = execute_stmt(self, stmt)? {
                break;
            }
        }
        Ok(())
    }

    /// Writes one rendered value to the configured sink.
    pub fn say(&mut self, value: &Value) {
        match &mut self.output {
            Output::Stdout => println!("{value}"),
            Output::Buffer(lines) => lines.push(value.to_string()),
        }
    }

    /// Lines collected by a buffering interpreter. Empty when printing
    /// straight to stdout.
    pub fn buffered_lines(&self) -> &[String] {
        match &self.output {
            Output::Stdout => &[],
            Output::Buffer(lines) => lines,
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Executes a program against a fresh interpreter printing to stdout.
///
/// # Returns
///
/// A tuple of the interpreter (for inspecting the final environment) and
/// the result of the run.
pub fn interpret(program: &Program) -> (Interpreter, Result<(), Error>) {
    let mut interpreter = Interpreter::new();
    let result = interpreter.run(program);
    (interpreter, result)
}
