//=====================================================
// File: tokenizer.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Code-Lang lexical scanner
// Objective: Turn UTF-8 source bytes into positioned tokens, skipping
//            whitespace and comments along the way
//=====================================================

use std::collections::HashMap;
use std::fmt;

/// Line/column of a token's first byte. Both are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, Column {}", self.line, self.column)
    }
}

/// All token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    // Identifiers and literals
    Ident,
    Int,
    Float,
    String,
    Char,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Percent,
    Power,
    FloorDiv,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    PowAssign,
    FloorDivAssign,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Let,
    Const,
    True,
    False,
    Null,
    If,
    ElseIf,
    Else,
    Return,
    For,
    While,
    Break,
    Continue,
    Struct,
    Import,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Char => "CHAR",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Power => "**",
            TokenKind::FloorDiv => "//",
            TokenKind::AddAssign => "+=",
            TokenKind::SubAssign => "-=",
            TokenKind::MulAssign => "*=",
            TokenKind::QuoAssign => "/=",
            TokenKind::RemAssign => "%=",
            TokenKind::PowAssign => "**=",
            TokenKind::FloorDivAssign => "//=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::Const => "CONST",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::If => "IF",
            TokenKind::ElseIf => "ELSE_IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::For => "FOR",
            TokenKind::While => "WHILE",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Struct => "STRUCT",
            TokenKind::Import => "IMPORT",
        };
        f.write_str(name)
    }
}

/// A token together with its literal text and source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            column,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Single-pass scanner over a UTF-8 source string.
///
/// The scanner is byte-oriented: `position` is the byte under inspection,
/// `read_position` the next one. Newlines bump `line` and reset `column`.
pub struct Tokenizer {
    input: Vec<u8>,
    position: usize,
    read_position: usize,
    ch: u8,
    line: usize,
    column: usize,
    keywords: HashMap<&'static str, TokenKind>,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("fn", TokenKind::Function);
        keywords.insert("let", TokenKind::Let);
        keywords.insert("const", TokenKind::Const);
        keywords.insert("true", TokenKind::True);
        keywords.insert("false", TokenKind::False);
        keywords.insert("null", TokenKind::Null);
        keywords.insert("if", TokenKind::If);
        keywords.insert("elseif", TokenKind::ElseIf);
        keywords.insert("else", TokenKind::Else);
        keywords.insert("return", TokenKind::Return);
        keywords.insert("for", TokenKind::For);
        keywords.insert("while", TokenKind::While);
        keywords.insert("break", TokenKind::Break);
        keywords.insert("continue", TokenKind::Continue);
        keywords.insert("struct", TokenKind::Struct);
        keywords.insert("import", TokenKind::Import);

        let mut tokenizer = Self {
            input: input.as_bytes().to_vec(),
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
            column: 0,
            keywords,
        };
        tokenizer.read_char();
        tokenizer
    }

    /// Collect every token up to and including EOF. Convenience for tests
    /// and tooling that want the whole stream at once.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        let token = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.two_char_token(TokenKind::Eq, line, column)
                } else {
                    Token::new(TokenKind::Assign, "=", line, column)
                }
            }
            b'+' => {
                if self.peek_char() == b'=' {
                    self.two_char_token(TokenKind::AddAssign, line, column)
                } else {
                    Token::new(TokenKind::Plus, "+", line, column)
                }
            }
            b'-' => {
                if self.peek_char() == b'=' {
                    self.two_char_token(TokenKind::SubAssign, line, column)
                } else {
                    Token::new(TokenKind::Minus, "-", line, column)
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.two_char_token(TokenKind::NotEq, line, column)
                } else {
                    Token::new(TokenKind::Bang, "!", line, column)
                }
            }
            b'*' => {
                if self.peek_char() == b'*' {
                    let token = self.two_char_token(TokenKind::Power, line, column);
                    if self.peek_char() == b'=' {
                        self.read_char();
                        Token::new(TokenKind::PowAssign, "**=", line, column)
                    } else {
                        token
                    }
                } else if self.peek_char() == b'=' {
                    self.two_char_token(TokenKind::MulAssign, line, column)
                } else {
                    Token::new(TokenKind::Asterisk, "*", line, column)
                }
            }
            b'/' => {
                if self.peek_char() == b'/' {
                    let token = self.two_char_token(TokenKind::FloorDiv, line, column);
                    if self.peek_char() == b'=' {
                        self.read_char();
                        Token::new(TokenKind::FloorDivAssign, "//=", line, column)
                    } else {
                        token
                    }
                } else if self.peek_char() == b'*' {
                    self.read_char();
                    self.read_char();
                    self.skip_block_comment();
                    return self.next_token();
                } else if self.peek_char() == b'=' {
                    self.two_char_token(TokenKind::QuoAssign, line, column)
                } else {
                    Token::new(TokenKind::Slash, "/", line, column)
                }
            }
            b'%' => {
                if self.peek_char() == b'=' {
                    self.two_char_token(TokenKind::RemAssign, line, column)
                } else {
                    Token::new(TokenKind::Percent, "%", line, column)
                }
            }
            b'<' => {
                if self.peek_char() == b'=' {
                    self.two_char_token(TokenKind::LtEq, line, column)
                } else {
                    Token::new(TokenKind::Lt, "<", line, column)
                }
            }
            b'>' => {
                if self.peek_char() == b'=' {
                    self.two_char_token(TokenKind::GtEq, line, column)
                } else {
                    Token::new(TokenKind::Gt, ">", line, column)
                }
            }
            b'&' => {
                if self.peek_char() == b'&' {
                    self.two_char_token(TokenKind::And, line, column)
                } else {
                    Token::new(TokenKind::Illegal, "&", line, column)
                }
            }
            b'|' => {
                if self.peek_char() == b'|' {
                    self.two_char_token(TokenKind::Or, line, column)
                } else {
                    Token::new(TokenKind::Illegal, "|", line, column)
                }
            }
            b'#' => {
                self.skip_line_comment();
                return self.next_token();
            }
            b'(' => Token::new(TokenKind::LParen, "(", line, column),
            b')' => Token::new(TokenKind::RParen, ")", line, column),
            b'{' => Token::new(TokenKind::LBrace, "{", line, column),
            b'}' => Token::new(TokenKind::RBrace, "}", line, column),
            b'[' => Token::new(TokenKind::LBracket, "[", line, column),
            b']' => Token::new(TokenKind::RBracket, "]", line, column),
            b',' => Token::new(TokenKind::Comma, ",", line, column),
            b';' => Token::new(TokenKind::Semicolon, ";", line, column),
            b':' => Token::new(TokenKind::Colon, ":", line, column),
            b'"' => {
                let literal = self.read_string();
                Token::new(TokenKind::String, literal, line, column)
            }
            b'\'' => {
                let (kind, literal) = self.read_char_literal();
                Token::new(kind, literal, line, column)
            }
            b'.' => {
                if self.peek_char().is_ascii_digit() {
                    let literal = self.read_float();
                    return Token::new(TokenKind::Float, literal, line, column);
                }
                Token::new(TokenKind::Dot, ".", line, column)
            }
            0 => Token::new(TokenKind::Eof, "", line, column),
            _ => {
                if is_letter(self.ch) {
                    let literal = self.read_identifier();
                    let kind = self.lookup_ident(&literal);
                    return Token::new(kind, literal, line, column);
                } else if self.ch.is_ascii_digit() {
                    let literal = self.read_number();
                    let kind = if literal.contains('.') {
                        TokenKind::Float
                    } else {
                        TokenKind::Int
                    };
                    return Token::new(kind, literal, line, column);
                }
                Token::new(TokenKind::Illegal, (self.ch as char).to_string(), line, column)
            }
        };

        self.read_char();
        token
    }

    fn lookup_ident(&self, ident: &str) -> TokenKind {
        self.keywords.get(ident).copied().unwrap_or(TokenKind::Ident)
    }

    fn read_char(&mut self) {
        if self.read_position >= self.input.len() {
            self.ch = 0;
            self.column += 1;
        } else {
            self.ch = self.input[self.read_position];
            if self.ch == b'\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        }
    }

    fn two_char_token(&mut self, kind: TokenKind, line: usize, column: usize) -> Token {
        let first = self.ch as char;
        self.read_char();
        let literal = format!("{}{}", first, self.ch as char);
        Token::new(kind, literal, line, column)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn skip_line_comment(&mut self) {
        while self.ch != b'\n' && self.ch != 0 {
            self.read_char();
        }
    }

    // Block comments do not nest. An unterminated comment runs to EOF.
    fn skip_block_comment(&mut self) {
        loop {
            if self.ch == 0 {
                break;
            }
            if self.ch == b'*' && self.peek_char() == b'/' {
                self.read_char();
                self.read_char();
                break;
            }
            self.read_char();
        }
    }

    // Literal bytes between the quotes; no escape processing. An
    // unterminated string runs to EOF.
    fn read_string(&mut self) -> String {
        let start = self.position + 1;
        loop {
            self.read_char();
            if self.ch == b'"' || self.ch == 0 {
                break;
            }
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    // Exactly one byte between single quotes; anything else is ILLEGAL.
    fn read_char_literal(&mut self) -> (TokenKind, String) {
        self.read_char();
        if self.ch == 0 || self.ch == b'\'' {
            return (TokenKind::Illegal, "ILLEGAL".to_string());
        }

        let value = self.ch;
        self.read_char();

        if self.ch != b'\'' {
            self.read_char();
            return (TokenKind::Illegal, "ILLEGAL".to_string());
        }
        (TokenKind::Char, (value as char).to_string())
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while is_letter(self.ch) || self.ch.is_ascii_digit() {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }

        if self.ch == b'.' {
            self.read_char();
            while self.ch.is_ascii_digit() {
                self.read_char();
            }
        }

        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn read_float(&mut self) -> String {
        let start = self.position;
        self.read_char();
        while self.ch.is_ascii_digit() {
            self.read_char();
        }

        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}
