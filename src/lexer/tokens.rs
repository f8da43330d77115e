use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("set", TokenKind::Set);
        map.insert("be", TokenKind::Be);
        map.insert("as", TokenKind::As);
        map.insert("say", TokenKind::Say);
        map.insert("when", TokenKind::When);
        map.insert("then", TokenKind::Then);
        map.insert("otherwise", TokenKind::Otherwise);
        map.insert("match", TokenKind::Match);
        map.insert("case", TokenKind::Case);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("from", TokenKind::From);
        map.insert("to", TokenKind::To);
        map.insert("until", TokenKind::Until);
        map.insert("step", TokenKind::Step);
        map.insert("starting", TokenKind::Starting);
        map.insert("in", TokenKind::In);
        map.insert("at", TokenKind::At);
        map.insert("define", TokenKind::Define);
        map.insert("function", TokenKind::Function);
        map.insert("call", TokenKind::Call);
        map.insert("return", TokenKind::Return);
        map.insert("throw", TokenKind::Throw);
        map.insert("end", TokenKind::End);
        map.insert("try", TokenKind::Try);
        map.insert("catch", TokenKind::Catch);
        map.insert("increase", TokenKind::Increase);
        map.insert("by", TokenKind::By);
        map.insert("with", TokenKind::With);
        map.insert("create", TokenKind::Create);
        map.insert("model", TokenKind::Model);
        map.insert("open", TokenKind::Open);
        map.insert("file", TokenKind::File);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Unknown,

    Newline,
    Indent,
    Dedent,

    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Let,
    Set,
    Be,
    As,
    Say,
    When,
    Then,
    Otherwise,
    Match,
    Case,
    Repeat,
    While,
    For,
    From,
    To,
    Until,
    Step,
    Starting,
    In,
    At,
    Define,
    Function,
    Call,
    Return,
    Throw,
    End,
    Try,
    Catch,
    Increase,
    By,
    With,
    Create,
    Model,
    Open,
    File,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token {{ kind: {}, lexeme: {:?}, line: {} }}",
            self.kind, self.lexeme, self.line
        )
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if *kind == self.kind {
                return true;
            }
        }

        false
    }
}
