//! Unit tests for the evaluator.
//!
//! Programs are tokenized and parsed, then run against a buffering
//! interpreter so `say` output can be asserted line by line. The analyzer
//! is deliberately not in the loop here; these tests exercise the runtime
//! checks directly.

use super::interpreter::Interpreter;
use crate::errors::errors::Error;
use crate::lexer::lexer::tokenize;
use crate::parser::parser::parse;

fn run(source: &str) -> (Interpreter, Result<(), Error>) {
    let tokens = tokenize(source);
    let (_, result) = parse(tokens);
    let program = result.expect("source should parse");

    let mut interpreter = Interpreter::with_buffer();
    let outcome = interpreter.run(&program);
    (interpreter, outcome)
}

fn run_lines(source: &str) -> Vec<String> {
    let (interpreter, outcome) = run(source);
    assert!(outcome.is_ok(), "runtime error: {outcome:?}");
    interpreter.buffered_lines().to_vec()
}

fn run_error(source: &str) -> Error {
    let (_, outcome) = run(source);
    outcome.expect_err("program should fail at runtime")
}

#[test]
fn test_say_number() {
    assert_eq!(run_lines("say 5"), ["5"]);
}

#[test]
fn test_say_string() {
    assert_eq!(run_lines("say \"hello\""), ["hello"]);
}

#[test]
fn test_declared_variable_reads_back() {
    assert_eq!(run_lines("let x be 5\nsay x"), ["5"]);
}

#[test]
fn test_uninitialized_variable_is_void() {
    assert_eq!(run_lines("let x\nsay x"), ["[void]"]);
}

#[test]
fn test_binary_chain_evaluates_left_to_right() {
    // No precedence ladder: 2 + 3 * 4 is (2 + 3) * 4.
    assert_eq!(run_lines("say 2 + 3 * 4"), ["20"]);
}

#[test]
fn test_division_truncates() {
    assert_eq!(run_lines("say 7 / 2"), ["3"]);
}

#[test]
fn test_division_by_zero_is_reported() {
    let error = run_error("say 10 / 0");

    assert_eq!(error.get_error_name(), "DivisionByZero");
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_comparisons_yield_one_or_zero() {
    assert_eq!(run_lines("say 3 > 2"), ["1"]);
    assert_eq!(run_lines("say 2 > 3"), ["0"]);
}

#[test]
fn test_long_suffix_is_stripped() {
    assert_eq!(run_lines("say 100000L"), ["100000"]);
}

#[test]
fn test_fractional_literal_truncates() {
    assert_eq!(run_lines("say 1.5"), ["1"]);
}

#[test]
fn test_negative_literal() {
    assert_eq!(run_lines("say -3 + 1"), ["-2"]);
}

#[test]
fn test_set_reassigns() {
    assert_eq!(run_lines("let x be 1\nset x as 2\nsay x"), ["2"]);
}

#[test]
fn test_arithmetic_on_string_operand_fails() {
    let error = run_error("let s be \"a\"\nsay s + 1");

    assert_eq!(error.get_error_name(), "IntegerOperandRequired");
}

#[test]
fn test_when_picks_first_true_branch() {
    let source = "let x be 5\nwhen x > 10 then\n    say 1\notherwise when x > 3 then\n    say 2\notherwise\n    say 3\nend";
    assert_eq!(run_lines(source), ["2"]);
}

#[test]
fn test_when_falls_through_to_default() {
    let source = "let x be 1\nwhen x > 10 then\n    say 1\notherwise when x > 3 then\n    say 2\notherwise\n    say 3\nend";
    assert_eq!(run_lines(source), ["3"]);
}

#[test]
fn test_match_runs_first_equal_case() {
    let source = "let x be 2\nmatch x\n    case 1\n        say 10\n    case 2\n        say 20\nend";
    assert_eq!(run_lines(source), ["20"]);
}

#[test]
fn test_match_without_hit_does_nothing() {
    let source = "let x be 9\nmatch x\n    case 1\n        say 10\n    case 2\n        say 20\nend";
    assert_eq!(run_lines(source), Vec::<String>::new());
}

#[test]
fn test_match_compares_strings_by_value() {
    let source = "let s be \"b\"\nmatch s\n    case \"a\"\n        say 1\n    case \"b\"\n        say 2\nend";
    assert_eq!(run_lines(source), ["2"]);
}

#[test]
fn test_while_loop_accumulates() {
    let source =
        "let total be 0\nlet i be 1\nrepeat while i <= 5\n    set total as total + i\n    set i as i + 1\nend\nsay total";
    assert_eq!(run_lines(source), ["15"]);
}

#[test]
fn test_for_loop_includes_end_bound() {
    let source = "let total be 0\nrepeat for i from 1 to 5\n    set total as total + i\nend\nsay total";
    assert_eq!(run_lines(source), ["15"]);
}

#[test]
fn test_for_loop_step() {
    let source = "repeat for i from 0 to 6 step 2\n    say i\nend";
    assert_eq!(run_lines(source), ["0", "2", "4", "6"]);
}

#[test]
fn test_with_loop_counts_down() {
    let source = "repeat with (k) starting at 10, until k <= 0, step -2\n    say k\nend";
    assert_eq!(run_lines(source), ["10", "8", "6", "4", "2", "0"]);
}

#[test]
fn test_zero_step_is_an_error() {
    let error = run_error("repeat for i from 1 to 5 step 0\n    say i\nend");

    assert_eq!(error.get_error_name(), "ZeroStep");
}

#[test]
fn test_iterator_reassignment_is_clobbered_each_pass() {
    // The loop counter is host-side; the iterator binding is rewritten at
    // the top of every pass, so a body write never moves the loop.
    let source = "repeat for i from 1 to 10\n    say i\n    set i as i + 3\nend";
    assert_eq!(
        run_lines(source),
        ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]
    );
}

#[test]
fn test_function_call_returns_value() {
    let source = "define function add with (a, b)\n    return a + b\nend\nsay call add(2, 3)";
    assert_eq!(run_lines(source), ["5"]);
}

#[test]
fn test_falling_off_a_function_yields_void() {
    let source = "define function greet with ()\n    say \"hi\"\nend\nsay call greet()";
    assert_eq!(run_lines(source), ["hi", "[void]"]);
}

#[test]
fn test_return_unwinds_through_loops() {
    let source = "define function find with ()\n    repeat for i from 1 to 10\n        when i == 3 then\n            return i\n        end\n    end\n    return 0\nend\nsay call find()";
    assert_eq!(run_lines(source), ["3"]);
}

#[test]
fn test_recursive_function() {
    let source = "define function fact with (n)\n    when n > 1 then\n        return n * call fact(n - 1)\n    end\n    return 1\nend\nsay call fact(5)";
    assert_eq!(run_lines(source), ["120"]);
}

#[test]
fn test_list_renders_with_brackets() {
    assert_eq!(run_lines("let xs be [1, 2, 3]\nsay xs"), ["[1, 2, 3]"]);
}

#[test]
fn test_nested_strings_render_quoted() {
    assert_eq!(
        run_lines("let xs be [\"a\", \"b\"]\nsay xs"),
        ["[\"a\", \"b\"]"]
    );
}

#[test]
fn test_list_index_reads_an_element() {
    assert_eq!(run_lines("let xs be [4, 5, 6]\nsay xs[1]"), ["5"]);
}

#[test]
fn test_list_index_out_of_bounds() {
    let error = run_error("let xs be [1]\nsay xs[3]");

    assert_eq!(error.get_error_name(), "IndexOutOfBounds");
    assert_eq!(
        error.message(),
        "index 3 is out of bounds for a list of length 1"
    );
}

#[test]
fn test_list_element_assignment_mutates_in_place() {
    assert_eq!(
        run_lines("let xs be [1, 2, 3]\nset xs[0] as 9\nsay xs"),
        ["[9, 2, 3]"]
    );
}

#[test]
fn test_nested_index_assignment() {
    let source = "let grid be [[1, 2], [3, 4]]\nset grid[1][0] as 9\nsay grid";
    assert_eq!(run_lines(source), ["[[1, 2], [9, 4]]"]);
}

#[test]
fn test_index_chain_evaluates_left_to_right() {
    // The first bracket's `i = 1` runs before the second bracket reads i.
    let source = "let i be 0\nlet grid be [[1, 2], [3, 4]]\nset grid[i = 1][i] as 9\nsay grid";
    assert_eq!(run_lines(source), ["[[1, 2], [3, 9]]"]);
}

#[test]
fn test_index_target_must_be_a_container() {
    let error = run_error("let x be 1\nsay x[0]");

    assert_eq!(error.get_error_name(), "IndexTargetNotIndexable");
}

#[test]
fn test_dict_key_read() {
    assert_eq!(run_lines("let d be {\"a\", 1}\nsay d[\"a\"]"), ["1"]);
}

#[test]
fn test_dict_renders_quoted_keys() {
    assert_eq!(run_lines("let d be {\"a\", 1}\nsay d"), ["{\"a\": 1}"]);
}

#[test]
fn test_missing_dict_key_is_reported() {
    let error = run_error("let d be {\"a\", 1}\nsay d[\"b\"]");

    assert_eq!(error.get_error_name(), "KeyNotFound");
    assert_eq!(error.message(), "key \"b\" not found in dictionary");
}

#[test]
fn test_dict_assignment_inserts_fresh_key() {
    assert_eq!(
        run_lines("let d be {\"a\", 1}\nset d[\"b\"] as 2\nsay d[\"b\"]"),
        ["2"]
    );
}

#[test]
fn test_throw_and_catch() {
    let source = "try\n    throw \"boom\"\ncatch (e)\n    say e\nend";
    assert_eq!(run_lines(source), ["boom"]);
}

#[test]
fn test_runtime_error_is_caught() {
    let source = "try\n    say 1 / 0\ncatch (e)\n    say e\nend";
    assert_eq!(run_lines(source), ["division by zero"]);
}

#[test]
fn test_uncaught_throw_surfaces() {
    let error = run_error("throw \"boom\"");

    assert_eq!(error.get_error_name(), "Thrown");
    assert_eq!(error.message(), "boom");
}

#[test]
fn test_shadowed_binding_wins_until_scope_exit() {
    let source = "let x be 1\nwhen 1 then\n    let x be 2\n    say x\nend\nsay x";
    assert_eq!(run_lines(source), ["2", "1"]);
}

#[test]
fn test_assignment_writes_through_to_outer_scope() {
    let source = "let x be 1\nwhen 1 then\n    set x as 5\nend\nsay x";
    assert_eq!(run_lines(source), ["5"]);
}

#[test]
fn test_top_level_return_stops_the_program() {
    assert_eq!(run_lines("say 1\nreturn\nsay 2"), ["1"]);
}

#[test]
fn test_assignment_expression_yields_its_value() {
    let source = "let x be 1\nlet y be x = 5\nsay y\nsay x";
    assert_eq!(run_lines(source), ["5", "5"]);
}

#[test]
fn test_scopes_unwind_after_a_caught_error() {
    let source = "try\n    when 1 then\n        say 1 / 0\n    end\ncatch (e)\n    say e\nend\nsay 2";
    let (interpreter, outcome) = run(source);

    assert!(outcome.is_ok());
    assert_eq!(interpreter.buffered_lines(), ["division by zero", "2"]);
    assert_eq!(interpreter.environment.depth(), 1);
}
