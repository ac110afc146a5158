use std::collections::HashSet;
use std::rc::Rc;

use lazy_static::lazy_static;

use crate::{
    errors::errors::{Error, ErrorImpl},
    source::source::{BufferSource, CharSource},
    Position,
};

use super::tokens::{is_reserved, NumberType, Token, TokenKind};

lazy_static! {
    /// Every operator spelling the language accepts, single- and
    /// multi-character forms alike.
    static ref VALID_OPERATORS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("(");
        set.insert("[");
        set.insert("->");
        set.insert(".");
        set.insert("...");
        set.insert("!");
        set.insert("~");
        set.insert("++");
        set.insert("--");
        set.insert("+");
        set.insert("-");
        set.insert("*");
        set.insert("/");
        set.insert("%");
        set.insert("<<");
        set.insert(">>");
        set.insert("<");
        set.insert(">");
        set.insert("<=");
        set.insert(">=");
        set.insert("==");
        set.insert("!=");
        set.insert("&");
        set.insert("^");
        set.insert("|");
        set.insert("&&");
        set.insert("||");
        set.insert("?");
        set.insert(",");
        set.insert("=");
        set.insert("+=");
        set.insert("-=");
        set.insert("*=");
        set.insert("/=");
        set.insert("%=");
        set.insert(">>=");
        set.insert("<<=");
        set.insert("&=");
        set.insert("^=");
        set.insert("|=");
        set
    };
}

/// Operators that are complete after their first character; no second
/// character is ever considered.
fn op_treated_as_one(op: char) -> bool {
    op == '(' || op == '[' || op == ',' || op == '.' || op == '*' || op == '?'
}

/// Characters that may appear as the second half of a two-character operator.
fn is_single_operator(op: char) -> bool {
    matches!(
        op,
        '+' | '-'
            | '*'
            | '/'
            | '='
            | '&'
            | '|'
            | '!'
            | '~'
            | '^'
            | '>'
            | '<'
            | '%'
            | '('
            | '['
            | ','
            | '.'
            | '?'
    )
}

/// Tokenizer for one lexical pass over one character source.
///
/// All mutable lexing state lives here: the current position, the
/// expression depth, the bracket capture buffer and the tokens emitted so
/// far. A nested sub-lex builds its own `Lexer` and never touches the
/// outer one.
pub struct Lexer<'a> {
    source: &'a mut dyn CharSource,
    tokens: Vec<Token>,
    pos: Position,
    // position snapshot taken before the current token's first character
    token_pos: Position,
    expression_depth: i32,
    parentheses_buffer: Option<String>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a mut dyn CharSource, filename: Rc<String>) -> Self {
        let pos = Position::start(filename);
        Lexer {
            source,
            tokens: vec![],
            token_pos: pos.clone(),
            pos,
            expression_depth: 0,
            parentheses_buffer: None,
        }
    }

    fn next_c(&mut self) -> Option<char> {
        let c = self.source.next_char()?;
        if self.is_in_expression() {
            if let Some(buffer) = self.parentheses_buffer.as_mut() {
                buffer.push(c);
            }
        }

        self.pos.col += 1;
        if c == '\n' {
            self.pos.col = 1;
            self.pos.line += 1;
        }

        Some(c)
    }

    fn peek_c(&mut self) -> Option<char> {
        self.source.peek_char()
    }

    fn push_c(&mut self, c: char) {
        if self.is_in_expression() {
            if let Some(buffer) = self.parentheses_buffer.as_mut() {
                buffer.pop();
            }
        }

        if self.pos.col > 1 {
            self.pos.col -= 1;
        }
        self.source.push_char(c);
    }

    fn assert_next_char(&mut self, expected: char) {
        let c = self.next_c();
        debug_assert_eq!(c, Some(expected));
    }

    fn file_position(&self) -> Position {
        self.token_pos.clone()
    }

    fn token_create(&mut self, kind: TokenKind) -> Token {
        let mut token = Token::new(kind, self.file_position());
        if self.is_in_expression() {
            token.between_brackets = self.parentheses_buffer.clone();
        }

        token
    }

    fn last_token_is_bare_zero(&self) -> bool {
        match self.tokens.last() {
            Some(token) => {
                !token.whitespace
                    && matches!(
                        token.kind,
                        TokenKind::Number {
                            value: 0,
                            num_type: NumberType::Normal
                        }
                    )
            }
            None => false,
        }
    }

    fn handle_whitespace(&mut self) -> Result<Option<Token>, Error> {
        if let Some(last_token) = self.tokens.last_mut() {
            last_token.whitespace = true;
        }

        self.next_c();
        self.read_next_token()
    }

    fn read_number_str(&mut self) -> String {
        let mut buffer = String::new();
        while let Some(c) = self.peek_c() {
            if !c.is_ascii_digit() {
                break;
            }
            buffer.push(c);
            self.next_c();
        }

        buffer
    }

    fn parse_number(&self, literal: &str, radix: u32) -> Result<u64, Error> {
        if literal.is_empty() {
            return Ok(0);
        }

        u64::from_str_radix(literal, radix).map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    literal: literal.to_string(),
                },
                self.file_position(),
            )
        })
    }

    fn number_type_for(c: Option<char>) -> NumberType {
        match c {
            Some('l') | Some('L') => NumberType::Long,
            Some('f') | Some('F') => NumberType::Float,
            Some('d') | Some('D') => NumberType::Double,
            _ => NumberType::Normal,
        }
    }

    fn token_make_number_for_value(&mut self, value: u64) -> Token {
        let num_type = Self::number_type_for(self.peek_c());
        if num_type != NumberType::Normal {
            // skip the suffix letter l, f, d...
            self.next_c();
        }

        self.token_create(TokenKind::Number { value, num_type })
    }

    fn token_make_number(&mut self) -> Result<Token, Error> {
        let literal = self.read_number_str();
        let value = self.parse_number(&literal, 10)?;
        Ok(self.token_make_number_for_value(value))
    }

    fn read_hex_number_str(&mut self) -> String {
        let mut buffer = String::new();
        while let Some(c) = self.peek_c() {
            if !c.is_ascii_hexdigit() {
                break;
            }
            buffer.push(c);
            self.next_c();
        }

        buffer
    }

    fn token_make_special_number_hexadecimal(&mut self) -> Result<Token, Error> {
        // skip x
        self.next_c();

        let literal = self.read_hex_number_str();
        let value = self.parse_number(&literal, 16)?;
        Ok(self.token_make_number_for_value(value))
    }

    fn validate_binary_string(&self, literal: &str) -> Result<(), Error> {
        for c in literal.chars() {
            if c != '0' && c != '1' {
                return Err(Error::new(
                    ErrorImpl::InvalidBinaryNumber {
                        literal: literal.to_string(),
                    },
                    self.file_position(),
                ));
            }
        }

        Ok(())
    }

    fn token_make_special_number_binary(&mut self) -> Result<Token, Error> {
        // skip b
        self.next_c();

        let literal = self.read_number_str();
        self.validate_binary_string(&literal)?;
        let value = self.parse_number(&literal, 2)?;
        Ok(self.token_make_number_for_value(value))
    }

    /// Rebuilds a hex or binary literal out of an already emitted bare `0`.
    /// The `0` was a complete Number token of its own until the `x`/`b`
    /// arrived; it is popped off the sequence and replaced, not amended.
    /// The replacement keeps the popped token's position, since the `0` is
    /// the literal's first character.
    fn token_make_special_number(&mut self) -> Result<Token, Error> {
        if let Some(zero) = self.tokens.pop() {
            self.token_pos = zero.pos;
        }

        if self.peek_c() == Some('x') {
            self.token_make_special_number_hexadecimal()
        } else {
            self.token_make_special_number_binary()
        }
    }

    fn token_make_string(&mut self, start_delim: char, end_delim: char) -> Token {
        let mut buffer = String::new();
        self.assert_next_char(start_delim);

        while let Some(c) = self.next_c() {
            if c == end_delim {
                break;
            }

            if c == '\\' {
                // the escaped character is stored verbatim and cannot
                // terminate the string
                buffer.push(c);
                if let Some(escaped) = self.next_c() {
                    buffer.push(escaped);
                }
                continue;
            }

            buffer.push(c);
        }

        self.token_create(TokenKind::Str(buffer))
    }

    fn read_op(&mut self) -> Result<String, Error> {
        let mut op = String::new();
        let first = match self.next_c() {
            Some(c) => c,
            None => {
                return Err(Error::new(
                    ErrorImpl::InvalidOperator { op },
                    self.file_position(),
                ))
            }
        };
        op.push(first);

        let mut single_operator = true;
        if !op_treated_as_one(first) {
            if let Some(second) = self.peek_c() {
                if is_single_operator(second) {
                    op.push(second);
                    self.next_c();
                    single_operator = false;
                }
            }
        }

        if !single_operator && !VALID_OPERATORS.contains(op.as_str()) {
            // not a real two-character operator, give the second half back
            if let Some(second) = op.pop() {
                self.push_c(second);
            }
            single_operator = true;
        }

        if single_operator && !VALID_OPERATORS.contains(op.as_str()) {
            return Err(Error::new(
                ErrorImpl::InvalidOperator { op },
                self.file_position(),
            ));
        }

        Ok(op)
    }

    fn token_make_operator_or_string(&mut self) -> Result<Token, Error> {
        if self.peek_c() == Some('<') {
            // handle include paths: include<abc.h>
            let after_include = self
                .tokens
                .last()
                .map(|token| token.is_keyword("include"))
                .unwrap_or(false);
            if after_include {
                return Ok(self.token_make_string('<', '>'));
            }
        }

        let op = self.read_op()?;
        let opens_expression = op == "(";
        let token = self.token_create(TokenKind::Operator(op));
        if opens_expression {
            self.lex_new_expression();
        }

        Ok(token)
    }

    fn lex_new_expression(&mut self) {
        self.expression_depth += 1;
        if self.expression_depth == 1 {
            self.parentheses_buffer = Some(String::new());
        }
    }

    fn lex_finish_expression(&mut self) -> Result<(), Error> {
        self.expression_depth -= 1;
        if self.expression_depth < 0 {
            return Err(Error::new(
                ErrorImpl::UnbalancedExpression,
                self.file_position(),
            ));
        }

        Ok(())
    }

    fn is_in_expression(&self) -> bool {
        self.expression_depth > 0
    }

    fn token_make_symbol(&mut self, c: char) -> Result<Token, Error> {
        self.next_c();
        if c == ')' {
            self.lex_finish_expression()?;
        }

        Ok(self.token_create(TokenKind::Symbol(c)))
    }

    fn token_make_identifier_or_keyword(&mut self) -> Token {
        let mut buffer = String::new();
        while let Some(c) = self.peek_c() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            buffer.push(c);
            self.next_c();
        }

        if is_reserved(&buffer) {
            self.token_create(TokenKind::Keyword(buffer))
        } else {
            self.token_create(TokenKind::Identifier(buffer))
        }
    }

    fn token_make_one_line_comment(&mut self) -> Token {
        let mut buffer = String::new();
        while let Some(c) = self.peek_c() {
            if c == '\n' {
                break;
            }
            buffer.push(c);
            self.next_c();
        }

        self.token_create(TokenKind::Comment(buffer))
    }

    fn token_make_multi_line_comment(&mut self) -> Result<Token, Error> {
        let mut buffer = String::new();
        loop {
            while let Some(c) = self.peek_c() {
                if c == '*' {
                    break;
                }
                buffer.push(c);
                self.next_c();
            }

            if self.peek_c().is_none() {
                return Err(Error::new(ErrorImpl::UnclosedComment, self.file_position()));
            }

            // consume the '*' and check whether '/' closes the comment
            self.next_c();
            if self.peek_c() == Some('/') {
                self.next_c();
                break;
            }
        }

        Ok(self.token_create(TokenKind::Comment(buffer)))
    }

    fn handle_comment(&mut self) -> Result<Option<Token>, Error> {
        if self.peek_c() != Some('/') {
            return Ok(None);
        }

        self.next_c();
        if self.peek_c() == Some('/') {
            self.next_c();
            return Ok(Some(self.token_make_one_line_comment()));
        }
        if self.peek_c() == Some('*') {
            self.next_c();
            return Ok(Some(self.token_make_multi_line_comment()?));
        }

        // a lone '/' is the division operator
        self.push_c('/');
        Ok(Some(self.token_make_operator_or_string()?))
    }

    fn escaped_char(c: char) -> char {
        match c {
            'n' => '\n',
            '\\' => '\\',
            't' => '\t',
            '\'' => '\'',
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'r' => '\r',
            'v' => '\x0b',
            _ => '\0',
        }
    }

    fn token_make_quote(&mut self) -> Result<Token, Error> {
        self.assert_next_char('\'');

        let mut c = match self.next_c() {
            Some(c) => c,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnterminatedQuote,
                    self.file_position(),
                ))
            }
        };
        if c == '\\' {
            c = match self.next_c() {
                Some(escaped) => Self::escaped_char(escaped),
                None => {
                    return Err(Error::new(
                        ErrorImpl::UnterminatedQuote,
                        self.file_position(),
                    ))
                }
            };
        }

        if self.next_c() != Some('\'') {
            return Err(Error::new(
                ErrorImpl::UnterminatedQuote,
                self.file_position(),
            ));
        }

        Ok(self.token_create(TokenKind::Number {
            value: c as u64,
            num_type: NumberType::Normal,
        }))
    }

    fn token_make_newline(&mut self) -> Token {
        self.next_c();
        self.token_create(TokenKind::Newline)
    }

    fn read_next_token(&mut self) -> Result<Option<Token>, Error> {
        self.token_pos = self.pos.clone();

        if let Some(token) = self.handle_comment()? {
            return Ok(Some(token));
        }

        let c = match self.peek_c() {
            Some(c) => c,
            None => return Ok(None),
        };

        let token = match c {
            '0'..='9' => self.token_make_number()?,

            'x' | 'b' if self.last_token_is_bare_zero() => self.token_make_special_number()?,

            '+' | '-' | '*' | '>' | '<' | '^' | '%' | '!' | '=' | '~' | '|' | '&' | '(' | '['
            | ',' | '.' | '?' => self.token_make_operator_or_string()?,

            '{' | '}' | ':' | ';' | '#' | '\\' | ')' | ']' => self.token_make_symbol(c)?,

            '"' => self.token_make_string('"', '"'),

            '\'' => self.token_make_quote()?,

            ' ' | '\t' => return self.handle_whitespace(),

            '\n' => self.token_make_newline(),

            c if c.is_ascii_alphabetic() || c == '_' => self.token_make_identifier_or_keyword(),

            c => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedChar { c },
                    self.file_position(),
                ))
            }
        };

        Ok(Some(token))
    }

    /// Runs the pass to end of input, returning the token sequence.
    pub fn lex(mut self) -> Result<Vec<Token>, Error> {
        while let Some(token) = self.read_next_token()? {
            self.tokens.push(token);
        }

        Ok(self.tokens)
    }
}

/// Tokenizes one character source to end of input or the first fatal error.
pub fn tokenize(source: &mut dyn CharSource, filename: Rc<String>) -> Result<Vec<Token>, Error> {
    Lexer::new(source, filename).lex()
}

/// Runs a fully nested lexical pass over an in-memory fragment, such as a
/// token's bracket capture, producing that fragment's own token sequence.
pub fn tokens_build_for_string(text: &str, filename: Rc<String>) -> Result<Vec<Token>, Error> {
    let mut buffer = BufferSource::new(text);
    tokenize(&mut buffer, filename)
}
