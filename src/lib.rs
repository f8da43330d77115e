#![allow(clippy::module_inception)]

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// Prints a stage error with the offending source line.
pub fn display_error(error: &Error, file_name: &str, source: &str) {
    /*
        Error: VariableNotDeclared (Variable `x` not declared)
        -> script.say:3
           |
         3 | say x
           |
    */

    let line = error.get_line();
    let line_text = get_line(source, line);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    match error.get_tip() {
        ErrorTip::None => println!("Error: {} ({})", error.get_error_name(), error.message()),
        tip => println!("Error: {} ({})", error.get_error_name(), tip),
    }
    println!("-> {}:{}", file_name, line);
    println!("{:>padding$}", "|");

    let (line_text_removed, _) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());
    println!("{:>padding$}", "|");
}

/// The 1-based source line, or an empty string past the end of the file.
pub fn get_line(source: &str, line: u32) -> String {
    source
        .lines()
        .nth(line.saturating_sub(1) as usize)
        .unwrap_or("")
        .to_string()
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
