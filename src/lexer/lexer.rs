use lazy_static::lazy_static;
use regex::Regex;

use crate::MK_TOKEN;

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

const MAX_TOKEN_LENGTH: usize = 256;
const TAB_WIDTH: usize = 4;

lazy_static! {
    static ref IDENTIFIER_PATTERN: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
}

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: u32,
    indent_stack: Vec<usize>,
    pending_dedents: usize,
    at_line_start: bool,
    last_emitted: Option<TokenKind>,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            indent_stack: vec![0],
            pending_dedents: 0,
            at_line_start: true,
            last_emitted: None,
        }
    }

    pub fn at(&self) -> char {
        self.source[self.pos]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn remainder(&self) -> String {
        self.source[self.pos..].iter().collect()
    }

    /// Pulls the next token from the stream. Never fails: malformed input
    /// becomes an `Unknown` token plus a diagnostic on stderr.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan();
        self.last_emitted = Some(token.kind);
        token
    }

    fn scan(&mut self) -> Token {
        // Queued dedents are delivered one per call.
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            return MK_TOKEN!(TokenKind::Dedent, String::new(), self.line);
        }

        loop {
            if self.at_eof() {
                if self.indent_stack.len() > 1 {
                    self.indent_stack.pop();
                    return MK_TOKEN!(TokenKind::Dedent, String::new(), self.line);
                }
                return MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.line);
            }

            if self.at_line_start {
                // Leading whitespace on the first line is skipped without
                // entering the indent logic; levels only open at a line
                // break.
                self.at_line_start = false;
                self.measure_indent();
                continue;
            }

            match self.at() {
                '\n' => {
                    if let Some(token) = self.line_break() {
                        return token;
                    }
                }
                ' ' | '\t' | '\r' => self.advance_n(1),
                '#' => self.skip_line_comment(),
                '/' => match self.peek_next() {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => {
                        if let Some(token) = self.multiline_comment() {
                            return token;
                        }
                    }
                    _ => {
                        self.advance_n(1);
                        return MK_TOKEN!(TokenKind::Slash, String::from("/"), self.line);
                    }
                },
                '"' | '\'' => return self.string_literal(),
                c if c.is_ascii_digit() => return self.number(),
                c if c.is_ascii_alphabetic() || c == '_' => return self.identifier(),
                _ => return self.operator_or_unknown(),
            }
        }
    }

    /// Handles a line break. The token for the break depends on the line
    /// that follows: deeper means `Indent`, shallower means the first of the
    /// queued `Dedent`s, same depth means `Newline` carrying the line just
    /// ended. A break right before the end of input yields nothing.
    fn line_break(&mut self) -> Option<Token> {
        let ended = self.line;
        self.advance_n(1);
        self.line += 1;

        let width = self.measure_indent();
        if self.at_eof() {
            return None;
        }

        let c = self.at();
        if c == '\n' || c == '#' {
            // Blank and comment-led lines do not take part in indent logic.
            return Some(MK_TOKEN!(TokenKind::Newline, String::new(), ended));
        }

        let top = *self.indent_stack.last().unwrap();
        if width > top {
            self.indent_stack.push(width);
            return Some(MK_TOKEN!(TokenKind::Indent, String::new(), self.line));
        }
        if width < top {
            let mut pops = 0;
            while *self.indent_stack.last().unwrap() > width {
                self.indent_stack.pop();
                pops += 1;
            }
            let landed = *self.indent_stack.last().unwrap();
            if landed != width {
                eprintln!(
                    "Indentation error at line {}: expected {} spaces, got {}",
                    self.line, landed, width
                );
            }
            self.pending_dedents = pops - 1;
            return Some(MK_TOKEN!(TokenKind::Dedent, String::new(), self.line));
        }

        // A then/catch line followed by a same-depth line opens a one-level
        // block anyway, so a single unindented statement can follow it.
        if matches!(self.last_emitted, Some(TokenKind::Then) | Some(TokenKind::Catch)) {
            self.indent_stack.push(width + 1);
            return Some(MK_TOKEN!(TokenKind::Indent, String::new(), self.line));
        }

        Some(MK_TOKEN!(TokenKind::Newline, String::new(), ended))
    }

    fn measure_indent(&mut self) -> usize {
        let mut width = 0;
        while !self.at_eof() {
            match self.at() {
                ' ' => width += 1,
                '\t' => width += TAB_WIDTH,
                '\r' => {}
                _ => break,
            }
            self.advance_n(1);
        }
        width
    }

    fn skip_line_comment(&mut self) {
        while !self.at_eof() && self.at() != '\n' {
            self.advance_n(1);
        }
    }

    fn multiline_comment(&mut self) -> Option<Token> {
        let start_line = self.line;
        let start = self.pos;
        self.advance_n(2);
        while !self.at_eof() {
            if self.at() == '*' && self.peek_next() == Some('/') {
                self.advance_n(2);
                return None;
            }
            if self.at() == '\n' {
                self.line += 1;
            }
            self.advance_n(1);
        }
        eprintln!("Unterminated multi-line comment at line {}", start_line);
        let lexeme: String = self.source[start..self.pos].iter().collect();
        Some(MK_TOKEN!(TokenKind::Unknown, lexeme, start_line))
    }

    fn identifier(&mut self) -> Token {
        let remaining = self.remainder();
        let matched = IDENTIFIER_PATTERN.find(&remaining).unwrap().as_str();

        if matched.len() > MAX_TOKEN_LENGTH {
            eprintln!("Token too long at line {}", self.line);
            let lexeme: String = matched.chars().take(MAX_TOKEN_LENGTH).collect();
            self.advance_n(MAX_TOKEN_LENGTH);
            return MK_TOKEN!(TokenKind::Unknown, lexeme, self.line);
        }

        let lexeme = String::from(matched);
        self.advance_n(lexeme.len());

        if let Some(kind) = RESERVED_LOOKUP.get(lexeme.as_str()) {
            MK_TOKEN!(*kind, lexeme, self.line)
        } else {
            MK_TOKEN!(TokenKind::Identifier, lexeme, self.line)
        }
    }

    fn number(&mut self) -> Token {
        let mut lexeme = String::new();
        let mut has_decimal = false;

        while !self.at_eof() {
            let c = self.at();
            if c.is_ascii_digit() {
                lexeme.push(c);
            } else if c == '.' && !has_decimal {
                has_decimal = true;
                lexeme.push(c);
            } else {
                break;
            }
            self.advance_n(1);
        }
        if !self.at_eof() && self.at() == 'L' {
            lexeme.push('L');
            self.advance_n(1);
        }

        if lexeme.len() > MAX_TOKEN_LENGTH {
            eprintln!("Token too long at line {}", self.line);
            let truncated: String = lexeme.chars().take(MAX_TOKEN_LENGTH).collect();
            return MK_TOKEN!(TokenKind::Unknown, truncated, self.line);
        }

        MK_TOKEN!(TokenKind::Number, lexeme, self.line)
    }

    fn string_literal(&mut self) -> Token {
        let delimiter = self.at();
        let start_line = self.line;
        self.advance_n(1);

        // Content is taken raw: no escape processing, embedded line breaks
        // are kept and advance the line counter.
        let mut content = String::new();
        while !self.at_eof() && self.at() != delimiter {
            let c = self.at();
            if c == '\n' {
                self.line += 1;
            }
            content.push(c);
            self.advance_n(1);
        }

        if self.at_eof() {
            eprintln!("Unterminated string starting at line {}", start_line);
            return MK_TOKEN!(TokenKind::Unknown, content, start_line);
        }
        self.advance_n(1);

        if content.chars().count() > MAX_TOKEN_LENGTH {
            eprintln!("Token too long at line {}", start_line);
            let truncated: String = content.chars().take(MAX_TOKEN_LENGTH).collect();
            return MK_TOKEN!(TokenKind::Unknown, truncated, start_line);
        }

        MK_TOKEN!(TokenKind::String, content, start_line)
    }

    fn operator_or_unknown(&mut self) -> Token {
        let c = self.at();
        self.advance_n(1);

        let two_char = |lexer: &mut Lexer, second: char| -> bool {
            if !lexer.at_eof() && lexer.at() == second {
                lexer.advance_n(1);
                return true;
            }
            false
        };

        let (kind, lexeme) = match c {
            '+' => (TokenKind::Plus, String::from("+")),
            '-' => (TokenKind::Dash, String::from("-")),
            '*' => (TokenKind::Star, String::from("*")),
            '(' => (TokenKind::OpenParen, String::from("(")),
            ')' => (TokenKind::CloseParen, String::from(")")),
            '{' => (TokenKind::OpenCurly, String::from("{")),
            '}' => (TokenKind::CloseCurly, String::from("}")),
            '[' => (TokenKind::OpenBracket, String::from("[")),
            ']' => (TokenKind::CloseBracket, String::from("]")),
            ';' => (TokenKind::Semicolon, String::from(";")),
            ',' => (TokenKind::Comma, String::from(",")),
            '>' => {
                if two_char(self, '=') {
                    (TokenKind::GreaterEquals, String::from(">="))
                } else {
                    (TokenKind::Greater, String::from(">"))
                }
            }
            '<' => {
                if two_char(self, '=') {
                    (TokenKind::LessEquals, String::from("<="))
                } else {
                    (TokenKind::Less, String::from("<"))
                }
            }
            '=' => {
                if two_char(self, '=') {
                    (TokenKind::Equals, String::from("=="))
                } else {
                    (TokenKind::Assignment, String::from("="))
                }
            }
            '!' => {
                if two_char(self, '=') {
                    (TokenKind::NotEquals, String::from("!="))
                } else {
                    eprintln!("Unknown character '!' at line {}", self.line);
                    (TokenKind::Unknown, String::from("!"))
                }
            }
            _ => {
                eprintln!("Unknown character '{}' at line {}", c, self.line);
                (TokenKind::Unknown, c.to_string())
            }
        };

        MK_TOKEN!(kind, lexeme, self.line)
    }
}

/// Drains the whole stream, ending with exactly one `EOF` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);
        if done {
            break;
        }
    }

    tokens
}
