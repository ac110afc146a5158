use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        // basic type names
        set.insert("void");
        set.insert("char");
        set.insert("int");
        set.insert("float");
        set.insert("double");
        // type modifiers
        set.insert("short");
        set.insert("long");
        set.insert("signed");
        set.insert("unsigned");
        // aggregate types
        set.insert("struct");
        set.insert("union");
        set.insert("enum");
        set.insert("typedef");
        set.insert("sizeof");
        // storage classes
        set.insert("auto");
        set.insert("static");
        set.insert("register");
        set.insert("extern");
        set.insert("const");
        set.insert("volatile");
        // jumps
        set.insert("return");
        set.insert("continue");
        set.insert("break");
        set.insert("goto");
        // branches
        set.insert("if");
        set.insert("else");
        set.insert("switch");
        set.insert("case");
        set.insert("default");
        // loops
        set.insert("for");
        set.insert("do");
        set.insert("while");
        set.insert("__ignore_typecheck");
        set.insert("include");
        set.insert("restrict");
        set
    };
}

/// Returns true if the text is a reserved word of the language.
pub fn is_reserved(text: &str) -> bool {
    RESERVED_KEYWORDS.contains(text)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NumberType {
    Normal,
    Long,
    Float,
    Double,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    Identifier(String),
    Keyword(String),
    Operator(String),
    Symbol(char),
    Number { value: u64, num_type: NumberType },
    Str(String),
    Comment(String),
    Newline,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Identifier(text) => write!(f, "<type: identifier, value: {}>", text),
            TokenKind::Keyword(text) => write!(f, "<type: keyword, value: {}>", text),
            TokenKind::Operator(text) => write!(f, "<type: operator, value: {}>", text),
            TokenKind::Symbol(c) => write!(f, "<type: symbol, value: {}>", c),
            TokenKind::Number { value, .. } => write!(f, "<type: number, value: {}>", value),
            TokenKind::Str(text) => write!(f, "<type: string, value: {}>", text),
            TokenKind::Comment(_) => write!(f, "<type: comment>"),
            TokenKind::Newline => write!(f, "<type: newline, value: \\n>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
    // True when whitespace followed this token
    pub whitespace: bool,
    // Text read inside the enclosing brackets so far, for debugging
    pub between_brackets: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Position) -> Self {
        Token {
            kind,
            pos,
            whitespace: false,
            between_brackets: None,
        }
    }

    /// Returns true if this token is the given keyword.
    pub fn is_keyword(&self, value: &str) -> bool {
        matches!(&self.kind, TokenKind::Keyword(text) if text == value)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}
