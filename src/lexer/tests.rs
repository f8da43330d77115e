//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Reserved words and identifiers
//! - Numeric and string literals
//! - Operators and punctuation
//! - Indentation (Indent/Dedent/Newline structure)
//! - Comments
//! - Malformed-input recovery

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "let set be as say when then otherwise match case repeat while for from to until step starting in at define function call return throw end try catch";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Set);
    assert_eq!(tokens[2].kind, TokenKind::Be);
    assert_eq!(tokens[3].kind, TokenKind::As);
    assert_eq!(tokens[4].kind, TokenKind::Say);
    assert_eq!(tokens[5].kind, TokenKind::When);
    assert_eq!(tokens[6].kind, TokenKind::Then);
    assert_eq!(tokens[7].kind, TokenKind::Otherwise);
    assert_eq!(tokens[8].kind, TokenKind::Match);
    assert_eq!(tokens[9].kind, TokenKind::Case);
    assert_eq!(tokens[10].kind, TokenKind::Repeat);
    assert_eq!(tokens[11].kind, TokenKind::While);
    assert_eq!(tokens[12].kind, TokenKind::For);
    assert_eq!(tokens[13].kind, TokenKind::From);
    assert_eq!(tokens[14].kind, TokenKind::To);
    assert_eq!(tokens[15].kind, TokenKind::Until);
    assert_eq!(tokens[16].kind, TokenKind::Step);
    assert_eq!(tokens[17].kind, TokenKind::Starting);
    assert_eq!(tokens[18].kind, TokenKind::In);
    assert_eq!(tokens[19].kind, TokenKind::At);
    assert_eq!(tokens[20].kind, TokenKind::Define);
    assert_eq!(tokens[21].kind, TokenKind::Function);
    assert_eq!(tokens[22].kind, TokenKind::Call);
    assert_eq!(tokens[23].kind, TokenKind::Return);
    assert_eq!(tokens[24].kind, TokenKind::Throw);
    assert_eq!(tokens[25].kind, TokenKind::End);
    assert_eq!(tokens[26].kind, TokenKind::Try);
    assert_eq!(tokens[27].kind, TokenKind::Catch);
    assert_eq!(tokens[28].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unparsed_keywords_still_recognized() {
    let source = "increase by with create model open file";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Increase);
    assert_eq!(tokens[1].kind, TokenKind::By);
    assert_eq!(tokens[2].kind, TokenKind::With);
    assert_eq!(tokens[3].kind, TokenKind::Create);
    assert_eq!(tokens[4].kind, TokenKind::Model);
    assert_eq!(tokens[5].kind, TokenKind::Open);
    assert_eq!(tokens[6].kind, TokenKind::File);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].lexeme, "bar");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].lexeme, "baz_123");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].lexeme, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].lexeme, "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100000L 1.";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, "42");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].lexeme, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].lexeme, "0");
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[3].lexeme, "100000L");
    assert_eq!(tokens[4].kind, TokenKind::Number);
    assert_eq!(tokens[4].lexeme, "1.");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings() {
    let source = "\"hello\" 'world' \"multiple words\"";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].lexeme, "world");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].lexeme, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_keep_backslashes_raw() {
    let source = r#""a\nb""#;
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, r"a\nb");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / > < >= <= == != =";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Plus);
    assert_eq!(tokens[1].kind, TokenKind::Dash);
    assert_eq!(tokens[2].kind, TokenKind::Star);
    assert_eq!(tokens[3].kind, TokenKind::Slash);
    assert_eq!(tokens[4].kind, TokenKind::Greater);
    assert_eq!(tokens[5].kind, TokenKind::Less);
    assert_eq!(tokens[6].kind, TokenKind::GreaterEquals);
    assert_eq!(tokens[7].kind, TokenKind::LessEquals);
    assert_eq!(tokens[8].kind, TokenKind::Equals);
    assert_eq!(tokens[9].kind, TokenKind::NotEquals);
    assert_eq!(tokens[10].kind, TokenKind::Assignment);
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } [ ] ; ,";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[5].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[6].kind, TokenKind::Semicolon);
    assert_eq!(tokens[7].kind, TokenKind::Comma);
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_when_block() {
    let source = "when x > 0 then\n  say 1\nend\n";
    let tokens = tokenize(source);

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::When,
            TokenKind::Identifier,
            TokenKind::Greater,
            TokenKind::Number,
            TokenKind::Then,
            TokenKind::Indent,
            TokenKind::Say,
            TokenKind::Number,
            TokenKind::Dedent,
            TokenKind::End,
            TokenKind::EOF,
        ]
    );

    // The Indent replaces the Newline for that line break.
    assert_eq!(tokens[5].line, 2);
    assert_eq!(tokens[6].line, 2);
    assert_eq!(tokens[8].line, 3);
    assert_eq!(tokens[9].line, 3);
}

#[test]
fn test_tokenize_multiword_phrases_stay_separate() {
    let source = "repeat with (k) starting at 10";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Repeat);
    assert_eq!(tokens[1].kind, TokenKind::With);
    assert_eq!(tokens[2].kind, TokenKind::OpenParen);
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].kind, TokenKind::CloseParen);
    assert_eq!(tokens[5].kind, TokenKind::Starting);
    assert_eq!(tokens[6].kind, TokenKind::At);
    assert_eq!(tokens[7].kind, TokenKind::Number);
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_newline_carries_line_just_ended() {
    let source = "say 1\nsay 2\n";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Say);
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[2].kind, TokenKind::Newline);
    assert_eq!(tokens[2].line, 1);
    assert_eq!(tokens[3].kind, TokenKind::Say);
    assert_eq!(tokens[4].kind, TokenKind::Number);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_blank_lines_yield_newlines_without_indent_logic() {
    let source = "say 1\n\nsay 2";
    let tokens = tokenize(source);

    assert_eq!(tokens[2].kind, TokenKind::Newline);
    assert_eq!(tokens[2].line, 1);
    assert_eq!(tokens[3].kind, TokenKind::Newline);
    assert_eq!(tokens[3].line, 2);
    assert_eq!(tokens[4].kind, TokenKind::Say);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_multilevel_dedents_arrive_one_per_pop() {
    let source = "when x > 0 then\n  when y > 0 then\n    say 1\nend\nend\n";
    let tokens = tokenize(source);

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::When,
            TokenKind::Identifier,
            TokenKind::Greater,
            TokenKind::Number,
            TokenKind::Then,
            TokenKind::Indent,
            TokenKind::When,
            TokenKind::Identifier,
            TokenKind::Greater,
            TokenKind::Number,
            TokenKind::Then,
            TokenKind::Indent,
            TokenKind::Say,
            TokenKind::Number,
            TokenKind::Dedent,
            TokenKind::Dedent,
            TokenKind::End,
            TokenKind::Newline,
            TokenKind::End,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_same_level_line_after_then_opens_block() {
    let source = "when x > 0 then\nsay 1\nend";
    let tokens = tokenize(source);

    assert_eq!(tokens[4].kind, TokenKind::Then);
    assert_eq!(tokens[5].kind, TokenKind::Indent);
    assert_eq!(tokens[6].kind, TokenKind::Say);
    assert_eq!(tokens[7].kind, TokenKind::Number);
    assert_eq!(tokens[8].kind, TokenKind::Dedent);
    assert_eq!(tokens[9].kind, TokenKind::End);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_open_blocks_flushed_as_dedents_at_eof() {
    let source = "when x > 0 then\n  say 1";
    let tokens = tokenize(source);

    let n = tokens.len();
    assert_eq!(tokens[n - 1].kind, TokenKind::EOF);
    assert_eq!(tokens[n - 2].kind, TokenKind::Dedent);
    assert_eq!(tokens[n - 3].kind, TokenKind::Number);
}

#[test]
fn test_first_line_leading_whitespace_opens_no_level() {
    let tokens = tokenize("  say 1");

    assert_eq!(tokens[0].kind, TokenKind::Say);
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_indents_and_dedents_balance() {
    let source = "when x > 0 then\n  say 1\n  when y > 0 then\n    say 2\nend\nsay 3\n";
    let tokens = tokenize(source);

    let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
    let dedents = tokens.iter().filter(|t| t.kind == TokenKind::Dedent).count();
    assert_eq!(indents, dedents);
}

#[test]
fn test_dedent_to_unseen_width_reports_but_continues() {
    let source = "when x > 0 then\n    say 1\n  say 2\nend";
    let tokens = tokenize(source);

    let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
    let dedents = tokens.iter().filter(|t| t.kind == TokenKind::Dedent).count();
    assert_eq!(indents, dedents);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_tab_counts_as_four_spaces() {
    let source = "when x > 0 then\n\tsay 1\nend";
    let tokens = tokenize(source);

    assert_eq!(tokens[5].kind, TokenKind::Indent);
    assert_eq!(tokens[6].kind, TokenKind::Say);
    assert_eq!(tokens[8].kind, TokenKind::Dedent);
}

#[test]
fn test_unknown_character_becomes_unknown_token() {
    let source = "let x be @ 5";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Be);
    assert_eq!(tokens[3].kind, TokenKind::Unknown);
    assert_eq!(tokens[3].lexeme, "@");
    assert_eq!(tokens[4].kind, TokenKind::Number);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_bare_bang_is_unknown() {
    let source = "say !x";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Say);
    assert_eq!(tokens[1].kind, TokenKind::Unknown);
    assert_eq!(tokens[1].lexeme, "!");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn test_unterminated_string_recovers() {
    let source = "say \"abc";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Say);
    assert_eq!(tokens[1].kind, TokenKind::Unknown);
    assert_eq!(tokens[1].lexeme, "abc");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_string_with_embedded_newline_tracks_lines() {
    let source = "say \"a\nb\"\nsay 2";
    let tokens = tokenize(source);

    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].lexeme, "a\nb");
    assert_eq!(tokens[1].line, 1);
    // The line counter moved past the embedded break.
    assert_eq!(tokens[2].kind, TokenKind::Newline);
    assert_eq!(tokens[2].line, 2);
    assert_eq!(tokens[3].kind, TokenKind::Say);
    assert_eq!(tokens[3].line, 3);
}

#[test]
fn test_tokenize_comments() {
    let source = "# full line\nsay 1 // trailing\nsay 2";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Newline);
    assert_eq!(tokens[1].kind, TokenKind::Say);
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].lexeme, "1");
    assert_eq!(tokens[3].kind, TokenKind::Newline);
    assert_eq!(tokens[4].kind, TokenKind::Say);
    assert_eq!(tokens[5].kind, TokenKind::Number);
    assert_eq!(tokens[5].lexeme, "2");
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_multiline_comment_advances_lines() {
    let source = "say /* spans\nlines */ 1";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Say);
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_unterminated_multiline_comment_is_unknown() {
    let source = "say 1 /* never closed";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Say);
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[2].kind, TokenKind::Unknown);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_overlong_token_truncated_to_unknown() {
    let source = "x".repeat(300);
    let tokens = tokenize(&source);

    assert_eq!(tokens[0].kind, TokenKind::Unknown);
    assert_eq!(tokens[0].lexeme.len(), 256);
    // The tail is re-lexed as an ordinary identifier.
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].lexeme.len(), 44);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_retokenizing_is_deterministic() {
    let source = "let x be 5\nwhen x > 0 then\n  say \"yes\"\nend\n";
    let first = tokenize(source);
    let second = tokenize(source);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.lexeme, b.lexeme);
        assert_eq!(a.line, b.line);
    }
}

#[test]
fn test_exactly_one_eof_and_it_is_last() {
    let source = "when x > 0 then\n  say 1\nend\n";
    let tokens = tokenize(source);

    let eofs = tokens.iter().filter(|t| t.kind == TokenKind::EOF).count();
    assert_eq!(eofs, 1);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);
}
